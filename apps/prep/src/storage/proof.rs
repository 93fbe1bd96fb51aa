//! Proof-of-build submission: three links plus eight completion steps, and
//! the shipped gate that ties them to the test checklist.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::errors::{AppError, Result};
use crate::storage::test_checklist::TestSummary;
use crate::storage::CollectionStore;

pub const PROOF_COLLECTION: &str = "prp_final_submission";
pub const TOTAL_STEPS: usize = 8;

/// The submission record. Steps are always exactly eight booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofSubmission {
    pub lovable_url: String,
    pub github_url: String,
    pub deployed_url: String,
    pub steps: Vec<bool>,
}

impl Default for ProofSubmission {
    fn default() -> Self {
        Self {
            lovable_url: String::new(),
            github_url: String::new(),
            deployed_url: String::new(),
            steps: vec![false; TOTAL_STEPS],
        }
    }
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct ProofUpdate {
    pub lovable_url: Option<String>,
    pub github_url: Option<String>,
    pub deployed_url: Option<String>,
    pub steps: Option<Vec<bool>>,
}

/// Checks a link the way the submission form does: http or https scheme and
/// a host of at least two characters. Returns a human message on failure.
pub fn validate_url(value: &str) -> std::result::Result<(), &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Required");
    }
    let Ok(parsed) = Url::parse(trimmed) else {
        return Err("Invalid URL");
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err("Must use http or https");
    }
    match parsed.host_str() {
        Some(host) if host.len() >= 2 => Ok(()),
        _ => Err("Invalid host"),
    }
}

fn pad_steps(mut steps: Vec<bool>) -> Vec<bool> {
    steps.truncate(TOTAL_STEPS);
    steps.resize(TOTAL_STEPS, false);
    steps
}

pub struct ProofStore {
    store: Arc<dyn CollectionStore>,
}

impl ProofStore {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    /// Current submission; anything unreadable degrades to the default.
    pub async fn get(&self) -> Result<ProofSubmission> {
        let Some(raw) = self.store.get(PROOF_COLLECTION).await? else {
            return Ok(ProofSubmission::default());
        };
        Ok(normalize_submission(&raw))
    }

    /// Applies a partial update on top of the stored submission.
    pub async fn set(&self, update: ProofUpdate) -> Result<ProofSubmission> {
        let mut current = self.get().await?;
        if let Some(url) = update.lovable_url {
            current.lovable_url = url.trim().to_string();
        }
        if let Some(url) = update.github_url {
            current.github_url = url.trim().to_string();
        }
        if let Some(url) = update.deployed_url {
            current.deployed_url = url.trim().to_string();
        }
        if let Some(steps) = update.steps {
            current.steps = pad_steps(steps);
        }
        self.store
            .set(PROOF_COLLECTION, serde_json::to_value(&current)?)
            .await?;
        Ok(current)
    }

    /// Marks one step done or not. Out-of-range indexes are rejected.
    pub async fn set_step(&self, index: usize, done: bool) -> Result<ProofSubmission> {
        if index >= TOTAL_STEPS {
            return Err(AppError::Validation(format!(
                "step index must be 0–{}, got {index}",
                TOTAL_STEPS - 1
            )));
        }
        let mut steps = self.get().await?.steps;
        steps[index] = done;
        self.set(ProofUpdate {
            steps: Some(steps),
            ..Default::default()
        })
        .await
    }
}

fn normalize_submission(raw: &Value) -> ProofSubmission {
    let Some(obj) = raw.as_object() else {
        return ProofSubmission::default();
    };
    let url_field = |key: &str| -> String {
        obj.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string()
    };
    let steps = obj
        .get("steps")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().map(|v| v.as_bool().unwrap_or(false)).collect())
        .unwrap_or_else(|| vec![false; TOTAL_STEPS]);
    ProofSubmission {
        lovable_url: url_field("lovableUrl"),
        github_url: url_field("githubUrl"),
        deployed_url: url_field("deployedUrl"),
        steps: pad_steps(steps),
    }
}

/// Shipped only if all 8 steps are done, all 10 tests pass, and all three
/// links validate.
pub fn is_shipped(tests: &TestSummary, submission: &ProofSubmission) -> bool {
    let steps_complete =
        submission.steps.len() >= TOTAL_STEPS && submission.steps.iter().all(|&s| s);
    steps_complete
        && tests.all_passed
        && validate_url(&submission.lovable_url).is_ok()
        && validate_url(&submission.github_url).is_ok()
        && validate_url(&submission.deployed_url).is_ok()
}
