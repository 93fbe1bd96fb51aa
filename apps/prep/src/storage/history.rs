//! Analysis history: an array collection, most recent first.
//!
//! Reads are defensive: invalid records are skipped and counted, never
//! propagated as errors. Writes always emit the canonical entry shape.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::scoring::compute_final_score;
use crate::analysis::AnalysisBundle;
use crate::errors::{AppError, Result};
use crate::models::entry::{AnalysisEntry, HistorySummary, SkillConfidence};
use crate::models::schema::{build_entry, normalize_stored_entry, validate_entry};
use crate::storage::CollectionStore;

pub const HISTORY_COLLECTION: &str = "placement-prep-analysis-history";

fn new_entry_id(millis: i64) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(7).collect();
    format!("analysis-{millis}-{suffix}")
}

pub struct HistoryStore {
    store: Arc<dyn CollectionStore>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    /// Raw payload as an array; anything else reads as empty.
    async fn load_raw(&self) -> Result<Vec<Value>> {
        Ok(self
            .store
            .get(HISTORY_COLLECTION)
            .await?
            .and_then(|v| match v {
                Value::Array(entries) => Some(entries),
                _ => None,
            })
            .unwrap_or_default())
    }

    async fn save_raw(&self, entries: Vec<Value>) -> Result<()> {
        self.store.set(HISTORY_COLLECTION, Value::Array(entries)).await
    }

    /// Persists one analysis run as a new entry at the front of the history.
    /// The live score starts equal to the base score.
    pub async fn save(
        &self,
        bundle: &AnalysisBundle,
        company: &str,
        role: &str,
        jd_text: &str,
    ) -> Result<AnalysisEntry> {
        let now = Utc::now();
        let id = new_entry_id(now.timestamp_millis());
        let entry = build_entry(bundle, company, role, jd_text, id, now);

        let mut entries = self.load_raw().await?;
        entries.insert(0, serde_json::to_value(&entry)?);
        self.save_raw(entries).await?;
        info!(id = %entry.id, score = entry.base_score, "analysis saved");
        Ok(entry)
    }

    /// Summaries in stored order plus the count of records that could not be
    /// read. A non-array payload counts as one skipped blob.
    pub async fn list(&self) -> Result<(Vec<HistorySummary>, usize)> {
        let raw = match self.store.get(HISTORY_COLLECTION).await? {
            None => return Ok((Vec::new(), 0)),
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                warn!("history payload is not an array, reporting it as skipped");
                return Ok((Vec::new(), 1));
            }
        };

        let mut list = Vec::new();
        let mut skipped = 0usize;
        for value in &raw {
            if !validate_entry(value) {
                skipped += 1;
                continue;
            }
            let Some(entry) = normalize_stored_entry(value) else {
                skipped += 1;
                continue;
            };
            list.push(HistorySummary {
                id: entry.id.clone(),
                created_at: entry.created_at,
                company: entry.company.clone(),
                role: entry.role.clone(),
                readiness_score: entry.readiness_score(),
            });
        }
        if skipped > 0 {
            warn!(skipped, "skipped unreadable history records");
        }
        Ok((list, skipped))
    }

    /// Full normalized entry, or `None` for a blank or unknown id.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<AnalysisEntry>> {
        if id.trim().is_empty() {
            return Ok(None);
        }
        let entries = self.load_raw().await?;
        let found = entries
            .iter()
            .find(|e| e.get("id").and_then(Value::as_str) == Some(id));
        Ok(found
            .filter(|e| validate_entry(e))
            .and_then(normalize_stored_entry))
    }

    /// Most recent entry that normalizes, if any.
    pub async fn latest(&self) -> Result<Option<AnalysisEntry>> {
        let entries = self.load_raw().await?;
        Ok(entries
            .iter()
            .filter(|e| validate_entry(e))
            .find_map(normalize_stored_entry))
    }

    /// Sets one skill's confidence and recomputes the live score from the
    /// base score and the full map. The stored record is rewritten in place
    /// in its canonical shape.
    pub async fn set_skill_confidence(
        &self,
        id: &str,
        skill: &str,
        confidence: SkillConfidence,
    ) -> Result<AnalysisEntry> {
        let mut entries = self.load_raw().await?;
        let idx = entries
            .iter()
            .position(|e| e.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| AppError::NotFound(format!("no analysis with id '{id}'")))?;

        let mut entry = normalize_stored_entry(&entries[idx])
            .ok_or_else(|| AppError::NotFound(format!("analysis '{id}' is unreadable")))?;

        entry
            .skill_confidence_map
            .insert(skill.to_string(), confidence);
        let all_skills = entry.extracted_skills.all_skills();
        entry.final_score = compute_final_score(
            entry.base_score,
            &entry.skill_confidence_map,
            &all_skills,
        );
        entry.updated_at = Utc::now();

        entries[idx] = serde_json::to_value(&entry)?;
        self.save_raw(entries).await?;
        info!(id, skill, score = entry.final_score, "confidence updated");
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_analysis;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn history() -> HistoryStore {
        HistoryStore::new(Arc::new(MemoryStore::new()))
    }

    async fn saved_entry(store: &HistoryStore, jd: &str, company: &str) -> AnalysisEntry {
        let bundle = run_analysis(jd, company, "SDE").unwrap();
        store.save(&bundle, company, "SDE", jd).await.unwrap()
    }

    #[tokio::test]
    async fn test_save_prepends_and_list_preserves_order() {
        let store = history();
        let first = saved_entry(&store, "SQL role", "Globex").await;
        let second = saved_entry(&store, "React role", "Initech").await;
        let (list, skipped) = store.list().await.unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, second.id);
        assert_eq!(list[1].id, first.id);
    }

    #[tokio::test]
    async fn test_entry_ids_have_the_analysis_prefix() {
        let store = history();
        let entry = saved_entry(&store, "SQL role", "").await;
        assert!(entry.id.starts_with("analysis-"));
        assert_eq!(entry.id.split('-').count(), 3);
    }

    #[tokio::test]
    async fn test_saved_entry_round_trips_by_id() {
        let store = history();
        let entry = saved_entry(&store, "Java backend with SQL", "Globex").await;
        let loaded = store.get_by_id(&entry.id).await.unwrap().unwrap();
        assert_eq!(loaded, entry);
    }

    #[tokio::test]
    async fn test_blank_or_unknown_id_is_none_not_error() {
        let store = history();
        saved_entry(&store, "SQL role", "").await;
        assert!(store.get_by_id("").await.unwrap().is_none());
        assert!(store.get_by_id("  ").await.unwrap().is_none());
        assert!(store.get_by_id("analysis-0-zzzzzzz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_skips_and_counts_invalid_records() {
        let backing = Arc::new(MemoryStore::new());
        backing
            .set(
                HISTORY_COLLECTION,
                json!([
                    { "id": "ok-1", "jdText": "x", "extractedSkills": {}, "questions": [], "readinessScore": 40 },
                    { "garbage": true },
                    "not even an object",
                ]),
            )
            .await
            .unwrap();
        let store = HistoryStore::new(backing);
        let (list, skipped) = store.list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(skipped, 2);
        assert_eq!(list[0].id, "ok-1");
        assert_eq!(list[0].readiness_score, 40);
    }

    #[tokio::test]
    async fn test_non_array_payload_counts_as_one_skipped_blob() {
        let backing = Arc::new(MemoryStore::new());
        backing
            .set(HISTORY_COLLECTION, json!({ "oops": "object" }))
            .await
            .unwrap();
        let store = HistoryStore::new(backing);
        let (list, skipped) = store.list().await.unwrap();
        assert!(list.is_empty());
        assert_eq!(skipped, 1);
    }

    #[tokio::test]
    async fn test_confidence_toggle_recomputes_live_score() {
        let store = history();
        let entry = saved_entry(&store, "SQL and React work", "").await;
        let all = entry.extracted_skills.all_skills();
        let skill = all[0].clone();

        // All skills default to practice: base - 2 per skill.
        let updated = store
            .set_skill_confidence(&entry.id, &skill, SkillConfidence::Practice)
            .await
            .unwrap();
        let after_practice = updated.final_score;

        let updated = store
            .set_skill_confidence(&entry.id, &skill, SkillConfidence::Know)
            .await
            .unwrap();
        assert_eq!(updated.final_score, after_practice + 4);
        assert_eq!(updated.skill_confidence_map[&skill], SkillConfidence::Know);

        // Idempotent: setting the same value again changes nothing.
        let again = store
            .set_skill_confidence(&entry.id, &skill, SkillConfidence::Know)
            .await
            .unwrap();
        assert_eq!(again.final_score, updated.final_score);
    }

    #[tokio::test]
    async fn test_confidence_update_persists() {
        let store = history();
        let entry = saved_entry(&store, "Docker and Kubernetes", "").await;
        let skill = entry.extracted_skills.all_skills()[0].clone();
        store
            .set_skill_confidence(&entry.id, &skill, SkillConfidence::Know)
            .await
            .unwrap();
        let reloaded = store.get_by_id(&entry.id).await.unwrap().unwrap();
        assert_eq!(reloaded.skill_confidence_map[&skill], SkillConfidence::Know);
        assert!(reloaded.updated_at >= entry.updated_at);
    }

    #[tokio::test]
    async fn test_confidence_on_unknown_id_is_not_found() {
        let store = history();
        let err = store
            .set_skill_confidence("analysis-0-nothere", "SQL", SkillConfidence::Know)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_latest_returns_most_recent_entry() {
        let store = history();
        saved_entry(&store, "SQL role", "").await;
        let newest = saved_entry(&store, "React role", "").await;
        assert_eq!(store.latest().await.unwrap().unwrap().id, newest.id);
    }
}
