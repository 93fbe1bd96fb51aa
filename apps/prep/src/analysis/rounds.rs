//! Company-aware round mapping. A small decision table over size category
//! and three skill signals; first matching rule wins.

use serde::{Deserialize, Serialize};

use crate::analysis::company_intel::SizeCategory;
use crate::analysis::extraction::ExtractionResult;
use crate::analysis::taxonomy::SkillCategory;

/// One interview round in the company-aware pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedRound {
    pub round_number: u32,
    pub title: String,
    pub description: String,
    pub why_it_matters: String,
}

fn skill_signal(extraction: &ExtractionResult, needles: &[&str]) -> bool {
    extraction.all.iter().any(|s| {
        let lower = s.to_lowercase();
        needles.iter().any(|n| lower.contains(n))
    })
}

fn has_dsa(extraction: &ExtractionResult) -> bool {
    extraction.has_category(SkillCategory::CoreCs)
        || skill_signal(extraction, &["dsa", "algorithm", "data structure"])
}

fn has_web_stack(extraction: &ExtractionResult) -> bool {
    extraction.has_category(SkillCategory::Web)
        || extraction.has_category(SkillCategory::Languages)
}

fn has_system_design(extraction: &ExtractionResult) -> bool {
    skill_signal(extraction, &["system design", "scalability", "distributed"])
        || extraction.has_category(SkillCategory::CloudDevOps)
}

fn rounds(specs: &[(&str, &str, &str)]) -> Vec<MappedRound> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (title, description, why))| MappedRound {
            round_number: (i + 1) as u32,
            title: (*title).to_string(),
            description: (*description).to_string(),
            why_it_matters: (*why).to_string(),
        })
        .collect()
}

/// Maps a size category + extraction to an expected round sequence.
/// Enterprise pipelines have 4 rounds, the rest 3.
pub fn round_mapping(size: SizeCategory, extraction: &ExtractionResult) -> Vec<MappedRound> {
    let dsa = has_dsa(extraction);
    let web = has_web_stack(extraction);
    let sys = has_system_design(extraction);

    if size == SizeCategory::Enterprise && dsa {
        return rounds(&[
            (
                "Round 1: Online Test",
                "DSA + Aptitude. Timed coding and MCQ.",
                "Screens for fundamentals and speed; most candidates are filtered here.",
            ),
            (
                "Round 2: Technical (DSA + Core CS)",
                "DSA problems, OS, DBMS, networks.",
                "Validates depth in computer science basics and problem-solving approach.",
            ),
            (
                "Round 3: Tech + Projects",
                "Project deep-dive, system design basics.",
                "Shows how you apply knowledge in real scenarios and own outcomes.",
            ),
            (
                "Round 4: HR",
                "Behavioral, fit, and expectations.",
                "Final check on communication, values, and long-term fit.",
            ),
        ]);
    }

    if size == SizeCategory::Enterprise {
        return rounds(&[
            (
                "Round 1: Aptitude / Screening",
                "Aptitude and basic technical MCQs.",
                "First filter for logical and verbal ability.",
            ),
            (
                "Round 2: Technical",
                "Core CS and role-specific topics.",
                "Assesses technical depth for the role.",
            ),
            (
                "Round 3: Projects & Discussion",
                "Project walkthrough and design discussion.",
                "Evaluates practical experience and communication.",
            ),
            (
                "Round 4: HR",
                "Behavioral and culture fit.",
                "Ensures alignment with company values and team.",
            ),
        ]);
    }

    if (size == SizeCategory::Startup || size == SizeCategory::MidSize) && (web || sys) {
        return rounds(&[
            (
                "Round 1: Practical coding",
                "Hands-on coding or take-home; stack-aligned.",
                "Proves you can ship; often the main technical signal.",
            ),
            (
                "Round 2: System / Design discussion",
                "Architecture, trade-offs, or past system decisions.",
                "Shows how you think about scale and trade-offs.",
            ),
            (
                "Round 3: Culture fit",
                "Values, working style, and motivation.",
                "Small teams need strong fit and ownership mindset.",
            ),
        ]);
    }

    if size == SizeCategory::MidSize {
        return rounds(&[
            (
                "Round 1: Technical screening",
                "Coding or technical discussion.",
                "Quick validation of core skills.",
            ),
            (
                "Round 2: Deep dive",
                "Projects and problem-solving.",
                "Assesses depth and how you approach problems.",
            ),
            (
                "Round 3: Team / HR",
                "Team fit and behavioral.",
                "Confirms alignment with role and team.",
            ),
        ]);
    }

    rounds(&[
        (
            "Round 1: Technical",
            "Coding or practical problem-solving.",
            "Core signal on whether you can contribute quickly.",
        ),
        (
            "Round 2: Discussion",
            "Projects, approach, or system thinking.",
            "Tests communication and depth of experience.",
        ),
        (
            "Round 3: Culture fit",
            "Values and working style.",
            "Ensures mutual fit for a small team.",
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extraction::extract_skills;

    #[test]
    fn test_enterprise_with_dsa_gets_online_test_pipeline() {
        let extraction = extract_skills("strong DSA and problem solving");
        let mapping = round_mapping(SizeCategory::Enterprise, &extraction);
        assert_eq!(mapping.len(), 4);
        assert_eq!(mapping[0].title, "Round 1: Online Test");
        assert_eq!(mapping[1].title, "Round 2: Technical (DSA + Core CS)");
    }

    #[test]
    fn test_enterprise_without_dsa_gets_screening_pipeline() {
        // "we want a smart intern" fires no keyword at all.
        let extraction = extract_skills("we want a smart intern");
        let mapping = round_mapping(SizeCategory::Enterprise, &extraction);
        assert_eq!(mapping.len(), 4);
        assert_eq!(mapping[0].title, "Round 1: Aptitude / Screening");
    }

    #[test]
    fn test_startup_with_web_stack_gets_practical_coding() {
        let extraction = extract_skills("React and Node.js");
        let mapping = round_mapping(SizeCategory::Startup, &extraction);
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping[0].title, "Round 1: Practical coding");
        assert_eq!(mapping[1].title, "Round 2: System / Design discussion");
    }

    #[test]
    fn test_system_design_signal_from_cloud_category() {
        let extraction = extract_skills("Kubernetes and Terraform");
        let mapping = round_mapping(SizeCategory::MidSize, &extraction);
        assert_eq!(mapping[0].title, "Round 1: Practical coding");
    }

    #[test]
    fn test_mid_size_without_signals_gets_screening_pipeline() {
        let extraction = extract_skills("we want a smart intern");
        let mapping = round_mapping(SizeCategory::MidSize, &extraction);
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping[0].title, "Round 1: Technical screening");
    }

    #[test]
    fn test_startup_without_signals_gets_generic_pipeline() {
        let extraction = extract_skills("we want a smart intern");
        let mapping = round_mapping(SizeCategory::Startup, &extraction);
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping[0].title, "Round 1: Technical");
        assert_eq!(mapping[2].title, "Round 3: Culture fit");
    }

    #[test]
    fn test_round_numbers_are_sequential_from_one() {
        let extraction = extract_skills("DSA heavy");
        let mapping = round_mapping(SizeCategory::Enterprise, &extraction);
        let numbers: Vec<u32> = mapping.iter().map(|r| r.round_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }
}
