// Dataset persistence behind a small adapter trait. The canonical backing is
// a single JSON document on disk, replaced wholesale on every write and
// gated by a shared admin secret on writes and deletes.
use crate::types::Dataset;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unauthorized: admin password mismatch")]
    Unauthorized,
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Storage boundary for the published dataset. One document, one fixed key;
/// the core pipeline never knows which backing store is active.
pub trait DatasetStore {
    /// Fetch the stored dataset. `None` is the "no data" signal.
    fn get(&self) -> Result<Option<Dataset>, StoreError>;
    /// Replace the stored dataset wholesale (create if absent). The secret
    /// is checked before any mutation.
    fn put(&self, dataset: &Dataset, secret: &str) -> Result<(), StoreError>;
    /// Remove the stored dataset entirely; a later `get` returns `None`.
    fn delete(&self, secret: &str) -> Result<(), StoreError>;
}

/// Persisted document shape: `{ "data": Dataset|null, "updatedAt": ... }`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument {
    data: Option<Dataset>,
    updated_at: DateTime<Utc>,
}

/// File-backed store: one pretty-printed JSON document at a fixed path.
pub struct JsonFileStore {
    path: PathBuf,
    secret: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, secret: impl Into<String>) -> Self {
        JsonFileStore {
            path: path.into(),
            secret: secret.into(),
        }
    }

    fn authorize(&self, secret: &str) -> Result<(), StoreError> {
        if secret != self.secret {
            return Err(StoreError::Unauthorized);
        }
        Ok(())
    }
}

impl DatasetStore for JsonFileStore {
    fn get(&self) -> Result<Option<Dataset>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let document: StoredDocument = serde_json::from_str(&raw)?;
        Ok(document.data)
    }

    fn put(&self, dataset: &Dataset, secret: &str) -> Result<(), StoreError> {
        self.authorize(secret)?;
        let document = StoredDocument {
            data: Some(dataset.clone()),
            updated_at: Utc::now(),
        };
        let serialized = serde_json::to_string_pretty(&document)?;
        std::fs::write(&self.path, serialized)?;
        Ok(())
    }

    fn delete(&self, secret: &str) -> Result<(), StoreError> {
        self.authorize(secret)?;
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
