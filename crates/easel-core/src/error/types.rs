//! Core error type for Easel

use thiserror::Error;

/// Result type alias for Easel operations
pub type EaselResult<T> = Result<T, EaselError>;

/// Main error type for Easel
#[derive(Error, Debug, Clone)]
pub enum EaselError {
    /// Missing or invalid configuration (e.g. no API key)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// Conversation service failures
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        provider: Option<String>,
    },

    /// HTTP transport errors
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        status_code: Option<u16>,
    },

    /// IO errors outside the session store
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// Session persistence errors
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Invalid caller input
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },
}

impl EaselError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "EASEL_CONFIG",
            Self::Llm { .. } => "EASEL_LLM",
            Self::Http { .. } => "EASEL_HTTP",
            Self::Io { .. } => "EASEL_IO",
            Self::Storage { .. } => "EASEL_STORAGE",
            Self::InvalidInput { .. } => "EASEL_INVALID_INPUT",
        }
    }

    /// Whether the error came from the conversation service round trip
    pub fn is_service_failure(&self) -> bool {
        matches!(self, Self::Llm { .. } | Self::Http { .. })
    }
}
