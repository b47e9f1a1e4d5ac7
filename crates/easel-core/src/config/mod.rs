//! Configuration for Easel
//!
//! Runtime settings come from the environment (optionally seeded from a
//! `.env` file). Generation options are enumerated values, not free-form
//! strings.

mod env_loader;
mod options;

pub use env_loader::{
    DEFAULT_BASE_URL, DEFAULT_OUTPUT_DIR, DEFAULT_SESSION_FILE, DEFAULT_TIMEOUT_SECS, EaselConfig,
};
pub use options::{AspectRatio, GenerationOptions, ImageModel, Resolution};
