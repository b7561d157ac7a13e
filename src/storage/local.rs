use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::naming::{create_stored_name, is_single_component};
use super::{StoreError, StoreResult};
use crate::models::{UploadFile, UploadPayload};

/// Stores uploads as flat `<uuid>.<ext>` files under one directory.
///
/// The store keeps no state besides the directory path. It never reads or
/// writes item metadata.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open a store over an existing directory, verifying it is writable.
    pub fn open(base_path: impl Into<PathBuf>) -> StoreResult<Self> {
        let base_path = base_path.into();
        let unusable = |reason: String| StoreError::Unusable {
            path: base_path.clone(),
            reason,
        };

        let metadata = std::fs::metadata(&base_path).map_err(|e| unusable(e.to_string()))?;
        if !metadata.is_dir() {
            return Err(unusable("not a directory".to_string()));
        }

        let probe = base_path.join(format!(".probe-{}", Uuid::new_v4()));
        std::fs::write(&probe, b"").map_err(|e| unusable(format!("not writable: {}", e)))?;
        let _ = std::fs::remove_file(&probe);

        tracing::info!("File store opened at {:?}", base_path);
        Ok(Self { base_path })
    }

    /// Full path of a stored name, always under the storage directory's
    /// path. Leading separators are dropped, so an absolute name such as
    /// `/etc/passwd` resolves to `<base>/etc/passwd` instead of replacing the
    /// base. Nothing else is normalized and existence is not checked, so
    /// callers handling external input should use
    /// [`FileStore::resolve_contained`].
    pub fn resolve_path(&self, stored_name: &str) -> PathBuf {
        self.base_path.join(stored_name.trim_start_matches(['/', '\\']))
    }

    /// Like [`FileStore::resolve_path`], but only for names that cannot leave
    /// the storage directory.
    pub fn resolve_contained(&self, stored_name: &str) -> StoreResult<PathBuf> {
        if !is_single_component(stored_name) {
            return Err(StoreError::InvalidName(stored_name.to_string()));
        }
        Ok(self.resolve_path(stored_name))
    }

    /// Store a single upload. An empty payload stores nothing and yields `None`.
    pub async fn store_one(&self, payload: UploadPayload) -> StoreResult<Option<UploadFile>> {
        if payload.is_empty() {
            return Ok(None);
        }

        let stored_name = create_stored_name(&payload.original_name);
        let full_path = self.resolve_path(&stored_name);

        if let Err(source) = write_file(&full_path, &payload.content).await {
            let _ = fs::remove_file(&full_path).await;
            return Err(StoreError::Write {
                path: full_path,
                source,
            });
        }

        tracing::debug!(
            "Stored {:?} ({} bytes) as {:?}",
            payload.original_name,
            payload.content.len(),
            full_path
        );

        Ok(Some(UploadFile {
            original_name: payload.original_name,
            stored_name,
        }))
    }

    /// Store uploads in order, skipping empty ones.
    ///
    /// Stops at the first failure; files already written by this call are
    /// removed before the error is returned.
    pub async fn store_many(&self, payloads: Vec<UploadPayload>) -> StoreResult<Vec<UploadFile>> {
        let mut stored = Vec::with_capacity(payloads.len());

        for payload in payloads {
            match self.store_one(payload).await {
                Ok(Some(file)) => stored.push(file),
                Ok(None) => {}
                Err(e) => {
                    self.discard(&stored).await;
                    return Err(e);
                }
            }
        }

        Ok(stored)
    }

    /// Best-effort removal of stored files.
    pub async fn discard(&self, files: &[UploadFile]) {
        for file in files {
            let full_path = self.resolve_path(&file.stored_name);
            match fs::remove_file(&full_path).await {
                Ok(()) => tracing::debug!("Discarded {:?}", full_path),
                Err(e) => tracing::warn!("Failed to discard {:?}: {}", full_path, e),
            }
        }
    }
}

async fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.flush().await?;
    Ok(())
}
