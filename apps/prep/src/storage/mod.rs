//! Persistence port and backends.
//!
//! Collections are opaque named JSON documents. The port knows nothing about
//! entry shapes; the stores layered on top own validation and repair.

pub mod history;
pub mod proof;
pub mod test_checklist;

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

use crate::errors::Result;

/// Get/set/delete of one JSON document per named collection.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// `None` when the collection does not exist or its payload is unreadable.
    async fn get(&self, collection: &str) -> Result<Option<Value>>;
    async fn set(&self, collection: &str, value: Value) -> Result<()>;
    async fn delete(&self, collection: &str) -> Result<()>;
}

/// In-memory backend for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn get(&self, collection: &str) -> Result<Option<Value>> {
        Ok(self.collections.lock().await.get(collection).cloned())
    }

    async fn set(&self, collection: &str, value: Value) -> Result<()> {
        self.collections
            .lock()
            .await
            .insert(collection.to_string(), value);
        Ok(())
    }

    async fn delete(&self, collection: &str) -> Result<()> {
        self.collections.lock().await.remove(collection);
        Ok(())
    }
}

/// File backend: one `<collection>.json` under the data directory.
///
/// Reads tolerate missing files and corrupt JSON (both read as absent, with
/// a warn for the corrupt case). Writes go through a temp file + rename so a
/// crash mid-write never leaves a half-written collection behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }
}

#[async_trait]
impl CollectionStore for FileStore {
    async fn get(&self, collection: &str) -> Result<Option<Value>> {
        let path = self.collection_path(collection);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(collection, error = %e, "collection file is corrupt, treating as absent");
                Ok(None)
            }
        }
    }

    async fn set(&self, collection: &str, value: Value) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        let path = self.collection_path(collection);
        let temp_path = self.root.join(format!(".{}.{}.tmp", collection, Uuid::new_v4()));

        let bytes = serde_json::to_vec_pretty(&value)?;
        let mut file = fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&temp_path)
            .await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn delete(&self, collection: &str) -> Result<()> {
        let path = self.collection_path(collection);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
