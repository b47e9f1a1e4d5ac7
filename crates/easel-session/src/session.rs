//! Session data structures
//!
//! Defines the core types for session management:
//! - Role: Who produced a turn
//! - Part / Content: Live conversation values exchanged with the model
//! - Session: The persisted aggregate (history records, outputs, turn count)
//! - SessionSummary: Lightweight view used for status output

use crate::codec::TurnRecord;
use serde::{Deserialize, Serialize};

/// Turn role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Prompt sent by the caller
    User,
    /// Response produced by the image model
    Model,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Model => write!(f, "model"),
        }
    }
}

/// A single unit of conversation content.
///
/// Exactly one payload kind is active. The optional thought signature is an
/// opaque token emitted by the model; it is carried verbatim and never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// Plain text
    Text {
        text: String,
        thought_signature: Option<Vec<u8>>,
    },
    /// Binary media (typically an image)
    Blob {
        mime_type: String,
        data: Vec<u8>,
        thought_signature: Option<Vec<u8>>,
    },
}

impl Part {
    /// Create a text part without a signature
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            thought_signature: None,
        }
    }

    /// Create a binary part without a signature
    pub fn blob(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self::Blob {
            mime_type: mime_type.into(),
            data,
            thought_signature: None,
        }
    }

    /// Attach a thought signature
    pub fn with_thought_signature(mut self, signature: Vec<u8>) -> Self {
        match &mut self {
            Self::Text {
                thought_signature, ..
            }
            | Self::Blob {
                thought_signature, ..
            } => *thought_signature = Some(signature),
        }
        self
    }

    /// Get the thought signature, if any
    pub fn thought_signature(&self) -> Option<&[u8]> {
        match self {
            Self::Text {
                thought_signature, ..
            }
            | Self::Blob {
                thought_signature, ..
            } => thought_signature.as_deref(),
        }
    }

    /// Get the text payload if this is a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            Self::Blob { .. } => None,
        }
    }

    /// Check if this part carries binary media
    pub fn is_blob(&self) -> bool {
        matches!(self, Self::Blob { .. })
    }
}

/// A role-tagged turn in a live conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a user turn
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Role::User,
            parts,
        }
    }

    /// Create a model turn
    pub fn model(parts: Vec<Part>) -> Self {
        Self {
            role: Role::Model,
            parts,
        }
    }
}

/// Persisted conversation session
///
/// `history` holds two records per completed turn (user, then model) in
/// chronological order. `outputs` lists the image written by each turn that
/// produced one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Turn records, oldest first
    #[serde(default)]
    pub history: Vec<TurnRecord>,

    /// Output file paths, oldest first
    #[serde(default)]
    pub outputs: Vec<String>,

    /// Number of completed user/model turn pairs
    #[serde(default, rename = "turn")]
    pub turn_count: u32,
}

impl Session {
    /// Create a new empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the session has no completed turns
    pub fn is_empty(&self) -> bool {
        self.turn_count == 0
    }

    /// Most recent output path
    pub fn last_output(&self) -> Option<&str> {
        self.outputs.last().map(String::as_str)
    }

    /// Whether `history` and `outputs` agree with the turn count
    pub fn is_consistent(&self) -> bool {
        self.history.len() == 2 * self.turn_count as usize
            && self.outputs.len() <= self.turn_count as usize
    }

    /// Summary for display, or `None` when there is no active session
    pub fn summary(&self) -> Option<SessionSummary> {
        if self.is_empty() {
            return None;
        }
        Some(SessionSummary {
            turn_count: self.turn_count,
            outputs: self.outputs.clone(),
        })
    }
}

/// Status view of an active session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub turn_count: u32,
    pub outputs: Vec<String>,
}
