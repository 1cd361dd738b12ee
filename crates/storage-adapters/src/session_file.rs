//! File-backed session storage.
//!
//! Stands in for the browser's durable client storage: one well-known
//! JSON file holding the non-secret identity record, written on
//! login/signup and removed on logout.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use domains::{DomainError, Identity, Result, SessionStorage};

/// Well-known storage key, mirrored as a file name.
pub const SESSION_FILE_NAME: &str = "mushaira_session.json";

pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Stores the session record under `data_dir/mushaira_session.json`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(SESSION_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn storage_err(err: impl std::fmt::Display) -> DomainError {
    DomainError::Storage(err.to_string())
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn save(&self, identity: &Identity) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(storage_err)?;
        }
        let json = serde_json::to_vec_pretty(identity).map_err(storage_err)?;
        tokio::fs::write(&self.path, json).await.map_err(storage_err)?;
        debug!(path = %self.path.display(), "session record written");
        Ok(())
    }

    async fn load(&self) -> Result<Option<Identity>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let identity = serde_json::from_slice(&bytes).map_err(storage_err)?;
                Ok(Some(identity))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(storage_err(err)),
        }
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_err(err)),
        }
    }
}
