//! Sources of bundled lesson pages.
//!
//! A missing or unreadable asset is reported as `Ok(None)`; callers show a
//! message and move on.

use async_trait::async_trait;
use codelearn_core::model::AssetPath;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::repository::StorageError;

#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Raw text of the asset at `path`, or `None` if there is nothing readable there.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for backend failures unrelated to the asset itself.
    async fn read_text(&self, path: &AssetPath) -> Result<Option<String>, StorageError>;
}

/// Reads assets from a directory on disk; `content/...` resolves under `root`.
#[derive(Debug, Clone)]
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins `path` onto the root, refusing anything that could escape it.
    fn resolve(&self, path: &AssetPath) -> Option<PathBuf> {
        let relative = Path::new(path.as_str());
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !plain || path.segments().any(str::is_empty) {
            return None;
        }
        Some(self.root.join(relative))
    }
}

#[async_trait]
impl AssetSource for DirAssetSource {
    async fn read_text(&self, path: &AssetPath) -> Result<Option<String>, StorageError> {
        let Some(full) = self.resolve(path) else {
            tracing::warn!(%path, "rejected asset path outside content root");
            return Ok(None);
        };
        match tokio::fs::read_to_string(&full).await {
            Ok(text) => Ok(Some(text)),
            Err(err) => {
                tracing::warn!(%path, file = %full.display(), error = %err, "asset not readable");
                Ok(None)
            }
        }
    }
}

/// Assets held in memory, keyed by asset path.
#[derive(Clone, Default)]
pub struct InMemoryAssets {
    files: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryAssets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn files(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.files
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert(&self, path: &AssetPath, text: impl Into<String>) -> Result<(), StorageError> {
        self.files()?.insert(path.as_str().to_owned(), text.into());
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.files()?.len())
    }

    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.files()?.is_empty())
    }
}

#[async_trait]
impl AssetSource for InMemoryAssets {
    async fn read_text(&self, path: &AssetPath) -> Result<Option<String>, StorageError> {
        Ok(self.files()?.get(path.as_str()).cloned())
    }
}
