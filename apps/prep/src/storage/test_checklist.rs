//! Manual test checklist: exactly ten booleans. Any stored payload of the
//! wrong length or shape reads as the all-false default.

use std::sync::Arc;

use serde_json::Value;

use crate::errors::{AppError, Result};
use crate::storage::CollectionStore;

pub const TEST_CHECKLIST_COLLECTION: &str = "placement-prep-test-checklist";
pub const TOTAL_TESTS: usize = 10;

/// Pass counts for the checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestSummary {
    pub passed: usize,
    pub total: usize,
    pub all_passed: bool,
}

pub struct TestChecklistStore {
    store: Arc<dyn CollectionStore>,
}

impl TestChecklistStore {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    /// The ten checked states. Missing, corrupt, or wrong-length payloads
    /// all read as all-false.
    pub async fn get(&self) -> Result<[bool; TOTAL_TESTS]> {
        let Some(Value::Array(raw)) = self.store.get(TEST_CHECKLIST_COLLECTION).await? else {
            return Ok([false; TOTAL_TESTS]);
        };
        if raw.len() != TOTAL_TESTS {
            return Ok([false; TOTAL_TESTS]);
        }
        let mut out = [false; TOTAL_TESTS];
        for (slot, value) in out.iter_mut().zip(&raw) {
            *slot = value.as_bool().unwrap_or(false);
        }
        Ok(out)
    }

    /// Stores a checklist, truncating or padding with false to length ten.
    pub async fn set(&self, checklist: &[bool]) -> Result<()> {
        let mut padded = [false; TOTAL_TESTS];
        for (slot, value) in padded.iter_mut().zip(checklist) {
            *slot = *value;
        }
        self.store
            .set(TEST_CHECKLIST_COLLECTION, serde_json::to_value(padded)?)
            .await
    }

    /// Checks or unchecks one test. Out-of-range indexes are rejected.
    pub async fn set_checked(&self, index: usize, value: bool) -> Result<[bool; TOTAL_TESTS]> {
        if index >= TOTAL_TESTS {
            return Err(AppError::Validation(format!(
                "test index must be 0–{}, got {index}",
                TOTAL_TESTS - 1
            )));
        }
        let mut list = self.get().await?;
        list[index] = value;
        self.set(&list).await?;
        Ok(list)
    }

    pub async fn reset(&self) -> Result<()> {
        self.set(&[false; TOTAL_TESTS]).await
    }

    pub async fn summary(&self) -> Result<TestSummary> {
        let list = self.get().await?;
        let passed = list.iter().filter(|&&b| b).count();
        Ok(TestSummary {
            passed,
            total: TOTAL_TESTS,
            all_passed: passed == TOTAL_TESTS,
        })
    }
}
