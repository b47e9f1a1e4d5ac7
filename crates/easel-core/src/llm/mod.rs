//! Conversation service abstraction and the Gemini implementation

pub mod google;
mod service;
mod wire;

pub use google::GeminiImageProvider;
pub use service::ConversationService;
