//! Session storage abstraction and implementations
//!
//! Provides trait-based storage for the active session with a local
//! filesystem implementation.

mod local;

pub use local::LocalSessionStore;

use crate::{Session, SessionSummary};
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid session path: {0}")]
    InvalidPath(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage for a single conversation session.
///
/// Single writer only: there is no locking, concurrent writers are
/// last-writer-wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Location of the backing file
    fn path(&self) -> &Path;

    /// Load the session. Missing or unreadable data yields an empty session.
    async fn load(&self) -> Session;

    /// Replace the stored session
    async fn save(&self, session: &Session) -> StorageResult<()>;

    /// Remove the stored session and return a fresh one
    async fn reset(&self) -> StorageResult<Session>;

    /// Turn count and outputs, or `None` when there is no active session
    async fn describe(&self) -> Option<SessionSummary> {
        self.load().await.summary()
    }
}
