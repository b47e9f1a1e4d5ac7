//! Local filesystem session storage
//!
//! Stores the session as a single JSON file.

use super::{SessionStore, StorageError, StorageResult};
use crate::Session;
use crate::codec;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Local filesystem session storage
pub struct LocalSessionStore {
    /// Session file
    path: PathBuf,
}

impl LocalSessionStore {
    /// Create storage backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ensure the parent directory exists
    async fn ensure_dir(&self) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Sibling file used for write-then-rename
    fn temp_path(&self) -> StorageResult<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| StorageError::InvalidPath(self.path.display().to_string()))?;
        let mut temp_name = file_name.to_os_string();
        temp_name.push(".tmp");
        Ok(self.path.with_file_name(temp_name))
    }
}

#[async_trait]
impl SessionStore for LocalSessionStore {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Session {
        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                let session = codec::decode(Some(&content));
                debug!(
                    "Loaded session from {:?} ({} turn(s))",
                    self.path, session.turn_count
                );
                session
            }
            Err(e) if e.kind() == ErrorKind::NotFound => codec::decode(None),
            Err(e) => {
                warn!("Failed to read session file {:?}: {}", self.path, e);
                codec::decode(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> StorageResult<()> {
        self.ensure_dir().await?;

        let content = codec::encode(session)?;
        let temp = self.temp_path()?;

        fs::write(&temp, content).await?;
        fs::rename(&temp, &self.path).await?;
        debug!(
            "Saved session ({} turn(s)) to {:?}",
            session.turn_count, self.path
        );

        Ok(())
    }

    async fn reset(&self) -> StorageResult<Session> {
        match fs::remove_file(&self.path).await {
            Ok(()) => debug!("Removed session file {:?}", self.path),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(Session::new())
    }
}
