//! Canonical persisted analysis entry. Field names on the wire are
//! camelCase and match the historical on-disk format exactly.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::company_intel::CompanyIntel;

/// Per-skill self-assessment. A missing key means `Practice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillConfidence {
    Know,
    Practice,
}

impl std::str::FromStr for SkillConfidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "know" => Ok(SkillConfidence::Know),
            "practice" => Ok(SkillConfidence::Practice),
            other => Err(format!("expected 'know' or 'practice', got '{other}'")),
        }
    }
}

/// The seven fixed skill buckets of a saved entry. `cloudDevOps` is stored
/// under its canonical key `cloud`; the synthetic fresher bucket under `other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSkills {
    #[serde(rename = "coreCS", default)]
    pub core_cs: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub web: Vec<String>,
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default)]
    pub cloud: Vec<String>,
    #[serde(default)]
    pub testing: Vec<String>,
    #[serde(default)]
    pub other: Vec<String>,
}

impl ExtractedSkills {
    /// Union across all buckets in key order, de-duplicated first-seen.
    pub fn all_skills(&self) -> Vec<String> {
        let buckets = [
            &self.core_cs,
            &self.languages,
            &self.web,
            &self.data,
            &self.cloud,
            &self.testing,
            &self.other,
        ];
        let mut all: Vec<String> = Vec::new();
        for bucket in buckets {
            for skill in bucket {
                if !all.iter().any(|s| s == skill) {
                    all.push(skill.clone());
                }
            }
        }
        all
    }

    pub fn is_empty(&self) -> bool {
        self.all_skills().is_empty()
    }
}

/// One round of the canonical persisted round mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedRoundRecord {
    pub round_title: String,
    pub focus_areas: Vec<String>,
    pub why_it_matters: String,
}

/// One persisted checklist round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistRecord {
    pub round_title: String,
    pub items: Vec<String>,
}

/// One persisted plan block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDayRecord {
    pub day: u32,
    pub focus: String,
    pub tasks: Vec<String>,
}

/// A complete saved analysis. This is the only shape ever written back to
/// the history collection; legacy shapes are repaired on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub company: String,
    pub role: String,
    pub jd_text: String,
    pub extracted_skills: ExtractedSkills,
    pub round_mapping: Vec<MappedRoundRecord>,
    pub checklist: Vec<ChecklistRecord>,
    #[serde(rename = "plan7Days")]
    pub plan_7_days: Vec<PlanDayRecord>,
    pub questions: Vec<String>,
    pub base_score: u32,
    pub final_score: u32,
    pub skill_confidence_map: HashMap<String, SkillConfidence>,
    pub company_intel: Option<CompanyIntel>,
}

impl AnalysisEntry {
    /// Score shown in list views: the live score, falling back to base.
    pub fn readiness_score(&self) -> u32 {
        self.final_score
    }
}

/// Lightweight row for history listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub company: String,
    pub role: String,
    pub readiness_score: u32,
}
