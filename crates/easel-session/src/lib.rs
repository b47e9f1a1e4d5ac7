//! Session management and persistence for Easel
//!
//! This crate provides the conversation session state used by the image
//! generation workflow:
//! - Live conversation types (`Content`, `Part`) with opaque thought signatures
//! - The persisted session aggregate and its JSON records
//! - Reconstruction of live history from persisted records
//! - Local file storage with load-or-default semantics

pub mod codec;
pub mod history;
pub mod session;
pub mod storage;

pub use codec::{InlineDataRecord, PartRecord, TurnRecord};
pub use history::expand;
pub use session::{Content, Part, Role, Session, SessionSummary};
pub use storage::{LocalSessionStore, SessionStore, StorageError, StorageResult};
