//! JSON file document store.
//!
//! Each document is one pretty-printed JSON file, rewritten wholesale on every
//! save. Writes go to a sibling temp file which is then renamed over the target,
//! so readers never observe a half-written document.

use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::domain::{DocumentStore, StoreError};

/// A [`DocumentStore`] backed by a single JSON file
pub struct JsonFileStore<D> {
    /// Path of the JSON document
    path: PathBuf,
    /// Document returned while the file does not exist yet
    initial: D,
    _document: PhantomData<fn() -> D>,
}

impl<D> JsonFileStore<D>
where
    D: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Create a store for `path`. Nothing is written until the first `save`.
    pub fn new(path: impl Into<PathBuf>, initial: D) -> Self {
        Self {
            path: path.into(),
            initial,
            _document: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl<D> DocumentStore<D> for JsonFileStore<D>
where
    D: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn load(&self) -> Result<D, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    "Document '{}' does not exist yet, using initial document",
                    self.path.display()
                );
                return Ok(self.initial.clone());
            }
            Err(e) => {
                tracing::error!("Failed to read document '{}': {}", self.path.display(), e);
                return Err(StoreError::Read(e.to_string()));
            }
        };

        serde_json::from_str(&raw).map_err(|e| {
            tracing::error!(
                "Failed to decode document '{}': {}",
                self.path.display(),
                e
            );
            StoreError::Decode(e.to_string())
        })
    }

    async fn save(&self, document: &D) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Write(format!("failed to prepare directory: {e}")))?;
        }

        let payload =
            serde_json::to_vec_pretty(document).map_err(|e| StoreError::Encode(e.to_string()))?;

        let temp_path = self
            .path
            .with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        if let Err(e) = tokio::fs::write(&temp_path, payload).await {
            tracing::error!(
                "Failed to write document '{}': {}",
                temp_path.display(),
                e
            );
            return Err(StoreError::Write(e.to_string()));
        }

        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            tracing::error!(
                "Failed to replace document '{}': {}",
                self.path.display(),
                e
            );
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StoreError::Write(e.to_string()));
        }

        tracing::debug!("Saved document '{}'", self.path.display());
        Ok(())
    }
}
