//! Entry building, structural validation, and legacy-shape repair.
//!
//! Every entry written to disk has the canonical shape from `entry.rs`.
//! Reads must tolerate older shapes: `round` vs `roundTitle`, `items` vs
//! `tasks`, `title` vs `focus`, `description` vs `focusAreas`, and a single
//! `readinessScore` standing in for `baseScore`/`finalScore`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::analysis::company_intel::CompanyIntel;
use crate::analysis::extraction::ExtractionResult;
use crate::analysis::taxonomy::{SkillCategory, DEFAULT_FRESHER_SKILLS};
use crate::analysis::AnalysisBundle;
use crate::models::entry::{
    AnalysisEntry, ChecklistRecord, ExtractedSkills, MappedRoundRecord, PlanDayRecord,
    SkillConfidence,
};

/// Maps extractor output to the seven fixed storage buckets
/// (`cloudDevOps` lands under `cloud`, the synthetic bucket under `other`).
pub fn normalize_extracted_skills(extraction: &ExtractionResult) -> ExtractedSkills {
    let mut out = ExtractedSkills::default();
    for hit in &extraction.categories {
        let bucket = match hit.category {
            SkillCategory::CoreCs => &mut out.core_cs,
            SkillCategory::Languages => &mut out.languages,
            SkillCategory::Web => &mut out.web,
            SkillCategory::Data => &mut out.data,
            SkillCategory::CloudDevOps => &mut out.cloud,
            SkillCategory::Testing => &mut out.testing,
            SkillCategory::Other => &mut out.other,
        };
        for skill in &hit.skills {
            if !bucket.iter().any(|s| s == skill) {
                bucket.push(skill.clone());
            }
        }
    }
    if extraction.is_general_fresher || out.is_empty() {
        out.other = DEFAULT_FRESHER_SKILLS.iter().map(|s| s.to_string()).collect();
    }
    out
}

/// Shapes one pipeline run into a canonical entry. The live score starts
/// equal to the base score; the confidence map starts empty.
pub fn build_entry(
    bundle: &AnalysisBundle,
    company: &str,
    role: &str,
    jd_text: &str,
    id: String,
    now: DateTime<Utc>,
) -> AnalysisEntry {
    AnalysisEntry {
        id,
        created_at: now,
        updated_at: now,
        company: company.trim().to_string(),
        role: role.trim().to_string(),
        jd_text: jd_text.to_string(),
        extracted_skills: normalize_extracted_skills(&bundle.extraction),
        round_mapping: bundle
            .round_mapping
            .iter()
            .map(|r| MappedRoundRecord {
                round_title: r.title.clone(),
                focus_areas: vec![r.description.clone()],
                why_it_matters: r.why_it_matters.clone(),
            })
            .collect(),
        checklist: bundle
            .checklist
            .iter()
            .map(|c| ChecklistRecord {
                round_title: c.title.clone(),
                items: c.items.clone(),
            })
            .collect(),
        plan_7_days: bundle
            .plan
            .iter()
            .map(|p| PlanDayRecord {
                day: p.day,
                focus: p.title.clone(),
                tasks: p.items.clone(),
            })
            .collect(),
        questions: bundle.questions.clone(),
        base_score: bundle.readiness_score.min(100),
        final_score: bundle.readiness_score.min(100),
        skill_confidence_map: HashMap::new(),
        company_intel: bundle.company_intel.clone(),
    }
}

/// Cheap structural gate over a raw stored record. True means the record is
/// worth attempting to normalize.
pub fn validate_entry(raw: &Value) -> bool {
    let Some(obj) = raw.as_object() else {
        return false;
    };
    let id_ok = obj
        .get("id")
        .and_then(Value::as_str)
        .map_or(false, |id| !id.is_empty());
    if !id_ok {
        return false;
    }
    if !obj.get("jdText").map_or(false, Value::is_string) {
        return false;
    }
    if !obj.get("extractedSkills").map_or(false, Value::is_object) {
        return false;
    }
    if !obj.get("questions").map_or(false, Value::is_array) {
        return false;
    }
    obj.get("baseScore").map_or(false, Value::is_number)
        || obj.get("readinessScore").map_or(false, Value::is_number)
}

// ── legacy shapes ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredChecklistRound {
    Canonical {
        #[serde(rename = "roundTitle")]
        round_title: String,
        #[serde(default)]
        items: Vec<String>,
    },
    LegacyRound {
        round: String,
        #[serde(default)]
        items: Vec<String>,
    },
}

impl StoredChecklistRound {
    fn migrate(self) -> ChecklistRecord {
        match self {
            StoredChecklistRound::Canonical { round_title, items }
            | StoredChecklistRound::LegacyRound {
                round: round_title,
                items,
            } => ChecklistRecord { round_title, items },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPlanDay {
    Canonical {
        #[serde(default)]
        day: u32,
        focus: String,
        #[serde(default)]
        tasks: Vec<String>,
    },
    LegacyItems {
        #[serde(default)]
        day: u32,
        title: String,
        #[serde(default)]
        items: Vec<String>,
    },
}

impl StoredPlanDay {
    fn migrate(self) -> PlanDayRecord {
        match self {
            StoredPlanDay::Canonical { day, focus, tasks } => PlanDayRecord { day, focus, tasks },
            StoredPlanDay::LegacyItems { day, title, items } => PlanDayRecord {
                day,
                focus: title,
                tasks: items,
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredMappedRound {
    Canonical {
        #[serde(rename = "roundTitle")]
        round_title: String,
        #[serde(default, rename = "focusAreas")]
        focus_areas: Vec<String>,
        #[serde(default, rename = "whyItMatters")]
        why_it_matters: String,
    },
    LegacyPipeline {
        title: String,
        description: Option<String>,
        #[serde(default, rename = "whyItMatters")]
        why_it_matters: String,
    },
}

impl StoredMappedRound {
    fn migrate(self) -> MappedRoundRecord {
        match self {
            StoredMappedRound::Canonical {
                round_title,
                focus_areas,
                why_it_matters,
            } => MappedRoundRecord {
                round_title,
                focus_areas,
                why_it_matters,
            },
            StoredMappedRound::LegacyPipeline {
                title,
                description,
                why_it_matters,
            } => MappedRoundRecord {
                round_title: title,
                focus_areas: description.into_iter().collect(),
                why_it_matters,
            },
        }
    }
}

// Elements that fit no known shape degrade to an empty record rather than
// dropping the whole entry.
fn migrate_checklist(value: Option<&Value>) -> Vec<ChecklistRecord> {
    let Some(arr) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    arr.iter()
        .map(|el| {
            serde_json::from_value::<StoredChecklistRound>(el.clone())
                .map(StoredChecklistRound::migrate)
                .unwrap_or(ChecklistRecord {
                    round_title: String::new(),
                    items: Vec::new(),
                })
        })
        .collect()
}

fn migrate_plan(plan_7_days: Option<&Value>, legacy_plan: Option<&Value>) -> Vec<PlanDayRecord> {
    let source = plan_7_days
        .filter(|v| v.is_array())
        .or(legacy_plan.filter(|v| v.is_array()));
    let Some(arr) = source.and_then(Value::as_array) else {
        return Vec::new();
    };
    arr.iter()
        .map(|el| {
            serde_json::from_value::<StoredPlanDay>(el.clone())
                .map(StoredPlanDay::migrate)
                .unwrap_or(PlanDayRecord {
                    day: 0,
                    focus: String::new(),
                    tasks: Vec::new(),
                })
        })
        .collect()
}

fn migrate_round_mapping(value: Option<&Value>) -> Vec<MappedRoundRecord> {
    let Some(arr) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    arr.iter()
        .map(|el| {
            serde_json::from_value::<StoredMappedRound>(el.clone())
                .map(StoredMappedRound::migrate)
                .unwrap_or(MappedRoundRecord {
                    round_title: String::new(),
                    focus_areas: Vec::new(),
                    why_it_matters: String::new(),
                })
        })
        .collect()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn score_field(raw: &Value, keys: &[&str], fallback: u32) -> u32 {
    for key in keys {
        if let Some(n) = raw.get(*key).and_then(Value::as_f64) {
            return n.round().clamp(0.0, 100.0) as u32;
        }
    }
    fallback
}

fn timestamp_field(raw: &Value, keys: &[&str], now: DateTime<Utc>) -> DateTime<Utc> {
    for key in keys {
        if let Some(ts) = raw
            .get(*key)
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        {
            return ts.with_timezone(&Utc);
        }
    }
    now
}

fn migrate_extracted_skills(value: Option<&Value>) -> ExtractedSkills {
    let Some(obj) = value.and_then(Value::as_object) else {
        return ExtractedSkills {
            other: DEFAULT_FRESHER_SKILLS.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
    };
    // Legacy key aliases seen in the wild.
    let pick = |keys: &[&str]| -> Vec<String> {
        keys.iter()
            .find_map(|k| obj.get(*k).filter(|v| v.is_array()))
            .map(|v| string_list(Some(v)))
            .unwrap_or_default()
    };
    ExtractedSkills {
        core_cs: pick(&["coreCS"]),
        languages: pick(&["languages"]),
        web: pick(&["web"]),
        data: pick(&["data"]),
        cloud: pick(&["cloud", "cloudDevOps"]),
        testing: pick(&["testing"]),
        other: pick(&["other", "general"]),
    }
}

fn migrate_confidence_map(value: Option<&Value>) -> HashMap<String, SkillConfidence> {
    let Some(obj) = value.and_then(Value::as_object) else {
        return HashMap::new();
    };
    obj.iter()
        .filter_map(|(skill, v)| {
            let confidence = serde_json::from_value::<SkillConfidence>(v.clone()).ok()?;
            Some((skill.clone(), confidence))
        })
        .collect()
}

/// Repairs a raw stored record into the canonical shape. Returns `None`
/// only when the record is unusable (no id).
pub fn normalize_stored_entry(raw: &Value) -> Option<AnalysisEntry> {
    let id = raw.get("id").and_then(Value::as_str)?;
    if id.is_empty() {
        return None;
    }
    let now = Utc::now();
    let created_at = timestamp_field(raw, &["createdAt"], now);
    let updated_at = timestamp_field(raw, &["updatedAt", "createdAt"], now);
    let base_score = score_field(raw, &["baseScore", "readinessScore"], 0);
    let final_score = score_field(raw, &["finalScore", "readinessScore"], base_score);
    let company_intel = raw
        .get("companyIntel")
        .and_then(|v| serde_json::from_value::<CompanyIntel>(v.clone()).ok());

    Some(AnalysisEntry {
        id: id.to_string(),
        created_at,
        updated_at,
        company: raw
            .get("company")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        role: raw
            .get("role")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        jd_text: raw
            .get("jdText")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        extracted_skills: migrate_extracted_skills(raw.get("extractedSkills")),
        round_mapping: migrate_round_mapping(raw.get("roundMapping")),
        checklist: migrate_checklist(raw.get("checklist")),
        plan_7_days: migrate_plan(raw.get("plan7Days"), raw.get("plan")),
        questions: string_list(raw.get("questions")),
        base_score,
        final_score,
        skill_confidence_map: migrate_confidence_map(raw.get("skillConfidenceMap")),
        company_intel,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_analysis;
    use serde_json::json;

    fn sample_entry() -> AnalysisEntry {
        let bundle = run_analysis("React frontend with SQL and Docker", "Globex", "SDE").unwrap();
        build_entry(
            &bundle,
            "Globex",
            "SDE",
            "React frontend with SQL and Docker",
            "analysis-1-abc".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn test_built_entry_round_trips_through_normalization() {
        let entry = sample_entry();
        let raw = serde_json::to_value(&entry).unwrap();
        assert!(validate_entry(&raw));
        let normalized = normalize_stored_entry(&raw).unwrap();
        assert_eq!(normalized, entry);
    }

    #[test]
    fn test_built_entry_initializes_final_score_to_base() {
        let entry = sample_entry();
        assert_eq!(entry.final_score, entry.base_score);
        assert!(entry.skill_confidence_map.is_empty());
    }

    #[test]
    fn test_fresher_extraction_fills_other_bucket() {
        let bundle = run_analysis("we want a smart intern", "", "").unwrap();
        let skills = normalize_extracted_skills(&bundle.extraction);
        assert_eq!(
            skills.other,
            vec!["Communication", "Problem solving", "Basic coding", "Projects"]
        );
        assert!(skills.core_cs.is_empty());
    }

    #[test]
    fn test_validate_rejects_structurally_broken_records() {
        assert!(!validate_entry(&json!("not an object")));
        assert!(!validate_entry(&json!({ "jdText": "x" })));
        assert!(!validate_entry(&json!({ "id": "a", "jdText": 42 })));
        assert!(!validate_entry(&json!({
            "id": "a", "jdText": "x", "extractedSkills": {}, "questions": "nope",
        })));
        assert!(!validate_entry(&json!({
            "id": "a", "jdText": "x", "extractedSkills": {}, "questions": [],
        })));
    }

    #[test]
    fn test_validate_accepts_legacy_readiness_score() {
        assert!(validate_entry(&json!({
            "id": "a", "jdText": "x", "extractedSkills": {}, "questions": [],
            "readinessScore": 55,
        })));
    }

    #[test]
    fn test_legacy_round_key_in_checklist() {
        let raw = json!({
            "id": "legacy-1", "jdText": "x", "extractedSkills": {}, "questions": [],
            "readinessScore": 40,
            "checklist": [{ "round": "Round 1: Aptitude / Basics", "items": ["a", "b"] }],
        });
        let entry = normalize_stored_entry(&raw).unwrap();
        assert_eq!(entry.checklist[0].round_title, "Round 1: Aptitude / Basics");
        assert_eq!(entry.checklist[0].items, vec!["a", "b"]);
    }

    #[test]
    fn test_legacy_plan_with_title_and_items() {
        let raw = json!({
            "id": "legacy-2", "jdText": "x", "extractedSkills": {}, "questions": [],
            "readinessScore": 40,
            "plan": [{ "day": 1, "title": "Day 1–2: Basics + Core CS", "items": ["t"] }],
        });
        let entry = normalize_stored_entry(&raw).unwrap();
        assert_eq!(entry.plan_7_days[0].focus, "Day 1–2: Basics + Core CS");
        assert_eq!(entry.plan_7_days[0].tasks, vec!["t"]);
    }

    #[test]
    fn test_legacy_round_mapping_with_description() {
        let raw = json!({
            "id": "legacy-3", "jdText": "x", "extractedSkills": {}, "questions": [],
            "readinessScore": 40,
            "roundMapping": [{
                "roundNumber": 1,
                "title": "Round 1: Online Test",
                "description": "DSA + Aptitude. Timed coding and MCQ.",
                "whyItMatters": "Screens for fundamentals.",
            }],
        });
        let entry = normalize_stored_entry(&raw).unwrap();
        assert_eq!(entry.round_mapping[0].round_title, "Round 1: Online Test");
        assert_eq!(
            entry.round_mapping[0].focus_areas,
            vec!["DSA + Aptitude. Timed coding and MCQ."]
        );
    }

    #[test]
    fn test_readiness_score_feeds_both_scores() {
        let raw = json!({
            "id": "legacy-4", "jdText": "x", "extractedSkills": {}, "questions": [],
            "readinessScore": 62,
        });
        let entry = normalize_stored_entry(&raw).unwrap();
        assert_eq!(entry.base_score, 62);
        assert_eq!(entry.final_score, 62);
    }

    #[test]
    fn test_cloud_dev_ops_alias_repaired() {
        let raw = json!({
            "id": "legacy-5", "jdText": "x", "questions": [], "readinessScore": 40,
            "extractedSkills": { "cloudDevOps": ["Docker"], "general": ["Projects"] },
        });
        let entry = normalize_stored_entry(&raw).unwrap();
        assert_eq!(entry.extracted_skills.cloud, vec!["Docker"]);
        assert_eq!(entry.extracted_skills.other, vec!["Projects"]);
    }

    #[test]
    fn test_unknown_confidence_values_are_dropped() {
        let raw = json!({
            "id": "legacy-6", "jdText": "x", "extractedSkills": {}, "questions": [],
            "readinessScore": 40,
            "skillConfidenceMap": { "SQL": "know", "React": "maybe", "Go": 3 },
        });
        let entry = normalize_stored_entry(&raw).unwrap();
        assert_eq!(entry.skill_confidence_map.len(), 1);
        assert_eq!(entry.skill_confidence_map["SQL"], SkillConfidence::Know);
    }

    #[test]
    fn test_missing_id_is_unusable() {
        assert!(normalize_stored_entry(&json!({ "jdText": "x" })).is_none());
        assert!(normalize_stored_entry(&json!({ "id": "" })).is_none());
    }

    #[test]
    fn test_scores_are_clamped_and_rounded() {
        let raw = json!({
            "id": "legacy-7", "jdText": "x", "extractedSkills": {}, "questions": [],
            "baseScore": 140.6, "finalScore": -3,
        });
        let entry = normalize_stored_entry(&raw).unwrap();
        assert_eq!(entry.base_score, 100);
        assert_eq!(entry.final_score, 0);
    }
}
