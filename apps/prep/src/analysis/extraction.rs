//! Skill extraction from JD text (case-insensitive keyword containment).
//! No external APIs. Heuristic only.

use crate::analysis::taxonomy::{SkillCategory, CATEGORIES, DEFAULT_FRESHER_SKILLS};

/// One matched taxonomy bucket with its de-duplicated keyword hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryHit {
    pub category: SkillCategory,
    pub skills: Vec<String>,
}

/// Output of the extractor. Immutable after creation; built fresh per analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Matched categories in taxonomy scan order.
    pub categories: Vec<CategoryHit>,
    /// Union of every category's skills, first-seen order, de-duplicated.
    /// Synthetic fresher skills are NOT part of this union.
    pub all: Vec<String>,
    pub is_general_fresher: bool,
}

impl ExtractionResult {
    pub fn category(&self, category: SkillCategory) -> Option<&CategoryHit> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// True when the category matched with at least one skill.
    pub fn has_category(&self, category: SkillCategory) -> bool {
        self.category(category).map_or(false, |c| !c.skills.is_empty())
    }
}

fn find_matches(text_lower: &str, keywords: &[&'static str]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for kw in keywords {
        if text_lower.contains(&kw.to_lowercase()) && !found.iter().any(|f| f == kw) {
            found.push((*kw).to_string());
        }
    }
    found
}

/// Extracts skills from raw JD text.
///
/// A category is included only when at least one keyword matched. If nothing
/// matched across all categories, a synthetic `Other` bucket with four
/// default soft-skill labels is injected and `is_general_fresher` is set.
pub fn extract_skills(jd_text: &str) -> ExtractionResult {
    let lower = jd_text.to_lowercase();
    let mut categories = Vec::new();
    let mut all: Vec<String> = Vec::new();

    for spec in CATEGORIES {
        let skills = find_matches(&lower, spec.keywords);
        if skills.is_empty() {
            continue;
        }
        for s in &skills {
            if !all.iter().any(|a| a == s) {
                all.push(s.clone());
            }
        }
        categories.push(CategoryHit {
            category: spec.category,
            skills,
        });
    }

    let is_general_fresher = all.is_empty();
    if is_general_fresher {
        categories.push(CategoryHit {
            category: SkillCategory::Other,
            skills: DEFAULT_FRESHER_SKILLS.iter().map(|s| s.to_string()).collect(),
        });
    }

    ExtractionResult {
        categories,
        all,
        is_general_fresher,
    }
}
