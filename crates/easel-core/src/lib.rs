//! Easel Core Library
//!
//! Turn orchestration for iterative image generation: configuration, the
//! conversation service abstraction with its Gemini implementation, the
//! turn controller and the revert engine. Session data and persistence live
//! in `easel-session`.

pub mod config;
pub mod error;
pub mod llm;
pub mod revert;
pub mod turn;

// Re-export commonly used types
pub use config::{AspectRatio, EaselConfig, GenerationOptions, ImageModel, Resolution};
pub use error::{EaselError, EaselResult};
pub use llm::{ConversationService, GeminiImageProvider};
pub use revert::{RevertEngine, RevertOutcome};
pub use turn::{TurnController, TurnOutcome};
