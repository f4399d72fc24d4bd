//! # Page storage
//!
//! The editor never talks to a database. It hands the persisted form of a page
//! to a [`PageStore`] and gets it back the same way. The hosting application
//! supplies the real store; the two here cover tests, tools and local use.

use crate::serializer::SerializedNode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid page key: {0}")]
    InvalidKey(String),
}

/// Address of one page: the site it belongs to and its id within the site
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageKey {
    pub site_id: String,
    pub page_id: String,
}

impl PageKey {
    pub fn new(site_id: impl Into<String>, page_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            page_id: page_id.into(),
        }
    }

    /// Keys become path segments in file stores, so they must be plain names
    pub fn validate(&self) -> Result<(), StorageError> {
        for part in [&self.site_id, &self.page_id] {
            let plain = !part.is_empty()
                && part != "."
                && part != ".."
                && !part.contains(['/', '\\', '\0']);
            if !plain {
                return Err(StorageError::InvalidKey(self.to_string()));
            }
        }
        Ok(())
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.site_id, self.page_id)
    }
}

/// Storage collaborator for persisted pages
pub trait PageStore: Send + Sync {
    /// Store `page` under `key`, replacing any previous version
    fn save(&self, key: &PageKey, page: &SerializedNode) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Fetch the page stored under `key`, `None` when there is none
    fn load(&self, key: &PageKey) -> impl Future<Output = Result<Option<SerializedNode>, StorageError>> + Send;
}

/// In-memory store; pages are kept in their JSON wire form
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    pages: RwLock<HashMap<PageKey, String>>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.pages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pages.read().await.is_empty()
    }
}

impl PageStore for MemoryPageStore {
    async fn save(&self, key: &PageKey, page: &SerializedNode) -> Result<(), StorageError> {
        key.validate()?;
        let json = serde_json::to_string(page)?;
        self.pages.write().await.insert(key.clone(), json);
        Ok(())
    }

    async fn load(&self, key: &PageKey) -> Result<Option<SerializedNode>, StorageError> {
        key.validate()?;
        let pages = self.pages.read().await;
        match pages.get(key) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }
}

/// File-backed store: `<root>/<site>/<page>.json`
#[derive(Debug, Clone)]
pub struct FilePageStore {
    root: PathBuf,
}

impl FilePageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &PageKey) -> Result<PathBuf, StorageError> {
        key.validate()?;
        Ok(self
            .root
            .join(&key.site_id)
            .join(format!("{}.json", key.page_id)))
    }

    /// Page ids stored for `site_id`, sorted
    pub async fn list(&self, site_id: &str) -> Result<Vec<String>, StorageError> {
        PageKey::new(site_id, "_").validate()?;
        let mut entries = match tokio::fs::read_dir(self.root.join(site_id)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut pages = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    pages.push(stem.to_string());
                }
            }
        }
        pages.sort();
        Ok(pages)
    }
}

impl PageStore for FilePageStore {
    #[instrument(skip(self, page), fields(key = %key))]
    async fn save(&self, key: &PageKey, page: &SerializedNode) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        // Write then rename so readers never observe a half-written page
        let json = serde_json::to_vec_pretty(page)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(bytes = json.len(), path = %path.display(), "Saved page");
        Ok(())
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn load(&self, key: &PageKey) -> Result<Option<SerializedNode>, StorageError> {
        let path = self.path_for(key)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        debug!(bytes = bytes.len(), path = %path.display(), "Loaded page");
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}
