//! Readiness scoring: pure, deterministic functions over extraction + metadata.
//!
//! Base score: start 35, +5 per matched category (max +30), +10 company,
//! +10 role, +10 JD length > 800. Clamped to [0, 100].
//! Final score: base adjusted by per-skill confidence toggles, recomputed
//! from the full map every time, never drifted incrementally.

use std::collections::HashMap;

use crate::analysis::extraction::ExtractionResult;
use crate::analysis::taxonomy::SkillCategory;
use crate::models::entry::SkillConfidence;

const BASE_SCORE: i64 = 35;
const CATEGORY_BONUS: i64 = 5;
const CATEGORY_BONUS_CAP: i64 = 30;
const METADATA_BONUS: i64 = 10;
const LONG_JD_THRESHOLD: usize = 800;

const SCORE_DELTA_KNOW: i64 = 2;
const SCORE_DELTA_PRACTICE: i64 = -2;

fn clamp_score(score: i64) -> u32 {
    score.clamp(0, 100) as u32
}

/// Computes the immutable base readiness score for one analysis.
///
/// The synthetic `Other` fresher bucket earns no category bonus: a JD with
/// zero recognized keywords, blank company and role, scores exactly 35.
pub fn readiness_score(
    extraction: &ExtractionResult,
    company: &str,
    role: &str,
    jd_text: &str,
) -> u32 {
    let mut score = BASE_SCORE;

    let category_count = extraction
        .categories
        .iter()
        .filter(|c| c.category != SkillCategory::Other)
        .count() as i64;
    score += (category_count * CATEGORY_BONUS).min(CATEGORY_BONUS_CAP);

    if !company.trim().is_empty() {
        score += METADATA_BONUS;
    }
    if !role.trim().is_empty() {
        score += METADATA_BONUS;
    }
    if jd_text.trim().chars().count() > LONG_JD_THRESHOLD {
        score += METADATA_BONUS;
    }

    clamp_score(score)
}

/// Recomputes the live final score from the base score and the FULL
/// confidence map: +2 per skill marked `know`, -2 otherwise (a missing key
/// means `practice`). Idempotent and order-independent over the skill set.
pub fn compute_final_score(
    base_score: u32,
    confidence: &HashMap<String, SkillConfidence>,
    all_skills: &[String],
) -> u32 {
    let mut score = base_score as i64;
    for skill in all_skills {
        score += match confidence.get(skill) {
            Some(SkillConfidence::Know) => SCORE_DELTA_KNOW,
            _ => SCORE_DELTA_PRACTICE,
        };
    }
    clamp_score(score)
}
