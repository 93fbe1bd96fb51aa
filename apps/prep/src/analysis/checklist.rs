//! Round-wise checklist generation: static base templates merged with
//! category-gated extras, truncated to 8 items per round.

use crate::analysis::extraction::ExtractionResult;
use crate::analysis::taxonomy::SkillCategory;

/// One generated preparation round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistRound {
    pub title: String,
    pub items: Vec<String>,
}

pub const MAX_ITEMS_PER_ROUND: usize = 8;

struct RoundTemplate {
    title: &'static str,
    base: &'static [&'static str],
    /// Gated extras, appended in declared order when the category matched.
    extras: &'static [(SkillCategory, &'static str)],
}

const ROUND_TEMPLATES: &[RoundTemplate] = &[
    RoundTemplate {
        title: "Round 1: Aptitude / Basics",
        base: &[
            "Revise quantitative aptitude: percentages, ratios, time-speed-distance.",
            "Practice logical reasoning and pattern recognition.",
            "Review verbal ability: grammar, comprehension.",
            "Time yourself on mock aptitude tests.",
            "Brush up on basic numerical puzzles.",
        ],
        extras: &[
            (
                SkillCategory::CoreCs,
                "Add: basic CS fundamentals (binary, number systems).",
            ),
            (SkillCategory::Languages, "Add: language syntax quick reference."),
        ],
    },
    RoundTemplate {
        title: "Round 2: DSA + Core CS",
        base: &[
            "Revise arrays, strings, and two-pointer techniques.",
            "Practice trees and graphs (BFS/DFS).",
            "Review hash maps and sliding window patterns.",
            "Solve 2–3 medium problems daily.",
            "Revise time/space complexity for common patterns.",
        ],
        extras: &[
            (
                SkillCategory::CoreCs,
                "Revise OS: processes, threads, scheduling. Revise DBMS: normalization, indexes.",
            ),
            (
                SkillCategory::Languages,
                "Practice coding in your primary language (syntax + STL/library).",
            ),
            (SkillCategory::Data, "Revise SQL joins, subqueries, and indexing."),
        ],
    },
    RoundTemplate {
        title: "Round 3: Tech interview (projects + stack)",
        base: &[
            "Prepare 2–3 project deep-dives (problem, solution, your role).",
            "Align resume bullet points with JD keywords.",
            "Prepare STAR examples for behavioral questions.",
            "Review system design basics: scalability, load balancing.",
        ],
        extras: &[
            (
                SkillCategory::Data,
                "Prepare: database design, indexing, transactions.",
            ),
            (
                SkillCategory::Web,
                "Prepare: React/Vue lifecycle, REST vs GraphQL, state management.",
            ),
            (
                SkillCategory::CloudDevOps,
                "Prepare: Docker, CI/CD, cloud services used.",
            ),
            (
                SkillCategory::Testing,
                "Prepare: testing strategy, unit vs integration tests.",
            ),
        ],
    },
    RoundTemplate {
        title: "Round 4: Managerial / HR",
        base: &[
            "Prepare \"Tell me about yourself\" (1–2 min).",
            "List strengths and weaknesses with examples.",
            "Prepare \"Why this company?\" and \"Why this role?\"",
            "Prepare questions to ask the interviewer.",
            "Practice confidence and clarity; avoid badmouthing.",
        ],
        extras: &[],
    },
];

fn merge_items(
    base: &[&'static str],
    extras: &[(SkillCategory, &'static str)],
    extraction: &ExtractionResult,
) -> Vec<String> {
    let mut items: Vec<String> = base.iter().map(|s| s.to_string()).collect();
    for (category, line) in extras {
        if items.len() >= MAX_ITEMS_PER_ROUND {
            break;
        }
        if extraction.has_category(*category) {
            items.push((*line).to_string());
        }
    }
    items.truncate(MAX_ITEMS_PER_ROUND);
    items
}

/// Builds the four fixed rounds, identical extraction in → identical checklist out.
pub fn generate_checklist(extraction: &ExtractionResult) -> Vec<ChecklistRound> {
    ROUND_TEMPLATES
        .iter()
        .map(|t| ChecklistRound {
            title: t.title.to_string(),
            items: merge_items(t.base, t.extras, extraction),
        })
        .collect()
}
