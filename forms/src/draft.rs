//! Best-effort local drafts.
//!
//! A draft is an opaque JSON blob stored under a string key. Nothing else in
//! the crate depends on a draft being present or readable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::Result;

/// Saved form values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub values: BTreeMap<String, String>,
    pub saved_at: DateTime<Utc>,
}

impl Draft {
    /// A draft stamped with the current time.
    pub fn now(values: BTreeMap<String, String>) -> Self {
        Self {
            values,
            saved_at: Utc::now(),
        }
    }
}

/// Key to draft storage.
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<Draft>>;

    async fn save(&self, key: &str, draft: &Draft) -> Result<()>;

    /// Remove a draft. Missing drafts are not an error.
    async fn discard(&self, key: &str) -> Result<()>;
}

/// Load a draft, logging and swallowing any failure.
pub async fn load_or_none(store: &dyn DraftStore, key: &str) -> Option<Draft> {
    match store.load(key).await {
        Ok(draft) => draft,
        Err(e) => {
            warn!(key = %key, error = %e, "Ignoring unreadable draft");
            None
        }
    }
}

/// Drafts held in memory as JSON text.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    blobs: RwLock<HashMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn load(&self, key: &str) -> Result<Option<Draft>> {
        let blobs = self.blobs.read().await;
        match blobs.get(key) {
            Some(blob) => Ok(Some(serde_json::from_str(blob)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, key: &str, draft: &Draft) -> Result<()> {
        let blob = serde_json::to_string(draft)?;
        self.blobs.write().await.insert(key.to_string(), blob);
        Ok(())
    }

    async fn discard(&self, key: &str) -> Result<()> {
        self.blobs.write().await.remove(key);
        Ok(())
    }
}

/// One JSON file per draft under a directory.
///
/// File names are the hex SHA-256 of the key, so any key is a safe name.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a key is stored at.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }
}

#[async_trait]
impl DraftStore for FileDraftStore {
    async fn load(&self, key: &str) -> Result<Option<Draft>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &str, draft: &Draft) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        let blob = serde_json::to_vec(draft)?;
        tokio::fs::write(&path, blob).await?;
        debug!(key = %key, path = %path.display(), "Saved draft");
        Ok(())
    }

    async fn discard(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
