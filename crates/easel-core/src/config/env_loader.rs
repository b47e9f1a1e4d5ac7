//! Environment variable-based configuration loading

use crate::error::{EaselError, EaselResult};
use std::env;
use std::path::PathBuf;

/// Default session file location
pub const DEFAULT_SESSION_FILE: &str = "tools/.image_session.json";

/// Default directory for generated images
pub const DEFAULT_OUTPUT_DIR: &str = "recipes/photos";

/// Default Gemini API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default request timeout; image generation is slow
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EaselConfig {
    /// Gemini API key (`GEMINI_API_KEY`)
    pub api_key: Option<String>,
    /// API base URL (`GEMINI_BASE_URL`)
    pub base_url: String,
    /// HTTP timeout in seconds (`GEMINI_TIMEOUT_SECS`)
    pub timeout_secs: u64,
    /// Session file (`EASEL_SESSION_FILE`)
    pub session_file: PathBuf,
    /// Output directory (`EASEL_OUTPUT_DIR`)
    pub output_dir: PathBuf,
}

impl Default for EaselConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl EaselConfig {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory (or a parent) is read first;
    /// variables already set in the environment take precedence.
    pub fn from_env() -> EaselResult<Self> {
        if let Ok(path) = dotenv::dotenv() {
            tracing::debug!("Loaded environment from {:?}", path);
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> EaselResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.api_key = get("GEMINI_API_KEY");

        if let Some(base_url) = get("GEMINI_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(timeout) = get("GEMINI_TIMEOUT_SECS") {
            config.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|_| EaselError::config("Invalid GEMINI_TIMEOUT_SECS value"))?;
        }

        if let Some(path) = get("EASEL_SESSION_FILE") {
            config.session_file = PathBuf::from(path);
        }

        if let Some(path) = get("EASEL_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(path);
        }

        Ok(config)
    }

    /// API key, or a configuration error when it is not set
    pub fn require_api_key(&self) -> EaselResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            EaselError::config_with_context(
                "GEMINI_API_KEY not found in environment",
                "Set it in your shell or in a .env file",
            )
        })
    }
}
