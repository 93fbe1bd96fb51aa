//! 7-day study plan generation: five fixed day blocks, base items plus
//! category-gated extras. Unlike the checklist, there is no truncation cap.

use crate::analysis::extraction::ExtractionResult;
use crate::analysis::taxonomy::SkillCategory;

/// One plan block. Five blocks span the 7 calendar days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDay {
    pub day: u32,
    pub title: String,
    pub items: Vec<String>,
}

struct DayTemplate {
    day: u32,
    title: &'static str,
    base: &'static [&'static str],
    /// Gated extras, appended in declared order when the category matched.
    extras: &'static [(SkillCategory, &'static str)],
}

const DAY_TEMPLATES: &[DayTemplate] = &[
    DayTemplate {
        day: 1,
        title: "Day 1–2: Basics + Core CS",
        base: &[
            "Aptitude practice (30 min).",
            "Revise OS: processes, memory.",
            "Revise DBMS: SQL basics, normalization.",
        ],
        extras: &[
            (SkillCategory::CoreCs, "Deep dive OS/Networks/DBMS topics from JD."),
            (SkillCategory::Languages, "Language syntax and common APIs."),
        ],
    },
    DayTemplate {
        day: 2,
        title: "Day 3–4: DSA + Coding practice",
        base: &[
            "Solve 3–4 problems (arrays, strings, trees).",
            "Revise recursion and DP basics.",
            "Time yourself on 2 medium problems.",
        ],
        extras: &[(
            SkillCategory::CoreCs,
            "Focus on algorithm patterns mentioned in JD.",
        )],
    },
    DayTemplate {
        day: 3,
        title: "Day 5: Project + Resume alignment",
        base: &[
            "Document 2 projects with problem–solution–impact.",
            "Align resume bullets with JD keywords.",
            "Prepare 2-min project pitch.",
        ],
        extras: &[
            (SkillCategory::Web, "Frontend/backend talking points and demo flow."),
            (SkillCategory::Data, "Database choices and schema highlights."),
            (SkillCategory::CloudDevOps, "Deployment and infra you used."),
        ],
    },
    DayTemplate {
        day: 4,
        title: "Day 6: Mock interview questions",
        base: &[
            "Practice 5 behavioral questions (STAR).",
            "Prepare \"Tell me about yourself\".",
            "Mock 1 tech round with a friend or timer.",
        ],
        extras: &[
            (SkillCategory::Web, "React/Node/API design questions."),
            (SkillCategory::Data, "SQL and schema design questions."),
            (SkillCategory::Testing, "How you test your code."),
        ],
    },
    DayTemplate {
        day: 5,
        title: "Day 7: Revision + Weak areas",
        base: &[
            "Revise weak topics from the week.",
            "Quick recap of DSA patterns.",
            "Rest and stay calm before interview.",
        ],
        extras: &[
            (SkillCategory::CoreCs, "Last-minute core CS revision."),
            (SkillCategory::Web, "Frontend revision if React/Next in JD."),
        ],
    },
];

/// Builds the five fixed day blocks. Base items first, then every applicable
/// extra in the block's declared order.
pub fn generate_plan(extraction: &ExtractionResult) -> Vec<PlanDay> {
    DAY_TEMPLATES
        .iter()
        .map(|t| {
            let mut items: Vec<String> = t.base.iter().map(|s| s.to_string()).collect();
            for (category, line) in t.extras {
                if extraction.has_category(*category) {
                    items.push((*line).to_string());
                }
            }
            PlanDay {
                day: t.day,
                title: t.title.to_string(),
                items,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extraction::extract_skills;

    #[test]
    fn test_always_five_blocks_days_one_to_five() {
        let plan = generate_plan(&extract_skills(""));
        assert_eq!(plan.len(), 5);
        let days: Vec<u32> = plan.iter().map(|d| d.day).collect();
        assert_eq!(days, vec![1, 2, 3, 4, 5]);
        assert_eq!(plan[4].title, "Day 7: Revision + Weak areas");
    }

    #[test]
    fn test_fresher_gets_base_items_only() {
        let plan = generate_plan(&extract_skills("we want a smart intern"));
        for day in plan {
            assert_eq!(day.items.len(), 3, "day {}", day.day);
        }
    }

    #[test]
    fn test_extras_follow_base_in_declared_order() {
        // Final block declares coreCS before web.
        let extraction = extract_skills("DSA plus React work");
        let last = &generate_plan(&extraction)[4];
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.items[3], "Last-minute core CS revision.");
        assert_eq!(last.items[4], "Frontend revision if React/Next in JD.");
    }

    #[test]
    fn test_no_truncation_cap_on_plan_items() {
        let extraction = extract_skills("React SQL Docker stack");
        let day3 = &generate_plan(&extraction)[2];
        // 3 base + web + data + cloudDevOps extras, all kept.
        assert_eq!(day3.items.len(), 6);
        assert_eq!(day3.items[3], "Frontend/backend talking points and demo flow.");
        assert_eq!(day3.items[4], "Database choices and schema highlights.");
        assert_eq!(day3.items[5], "Deployment and infra you used.");
    }

    #[test]
    fn test_testing_extra_only_on_mock_interview_day() {
        let extraction = extract_skills("Selenium testing role");
        let plan = generate_plan(&extraction);
        assert!(plan[3].items.contains(&"How you test your code.".to_string()));
        assert_eq!(plan[2].items.len(), 3);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let extraction = extract_skills("Java, SQL and AWS");
        assert_eq!(generate_plan(&extraction), generate_plan(&extraction));
    }
}
