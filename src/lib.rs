//! Easel: iterative, session-based image generation
//!
//! Facade over the workspace crates. [`session`] exposes the session model,
//! persistence and history reconstruction; the turn controller, revert
//! engine, configuration and Gemini client are re-exported at the top level.

pub use easel_core::{config, llm};
pub use easel_session as session;

pub use easel_core::{
    AspectRatio, ConversationService, EaselConfig, EaselError, EaselResult, GeminiImageProvider,
    GenerationOptions, ImageModel, Resolution, RevertEngine, RevertOutcome, TurnController,
    TurnOutcome,
};
pub use easel_session::{
    Content, LocalSessionStore, Part, Role, Session, SessionStore, SessionSummary,
};
