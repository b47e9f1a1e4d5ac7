use crate::config::GenerationOptions;
use crate::error::EaselResult;
use async_trait::async_trait;
use easel_session::{Content, Part};

/// Turn-taking image model.
///
/// Receives the prior conversation (empty for a fresh conversation) and the
/// new outgoing message, and returns the response parts in order. Model
/// parts may carry thought signatures that must be replayed verbatim in
/// later `history`.
///
/// # Example
///
/// ```ignore
/// struct EchoService;
///
/// #[async_trait]
/// impl ConversationService for EchoService {
///     async fn generate(&self, _history: &[Content], message: &Content, _options: &GenerationOptions) -> EaselResult<Vec<Part>> {
///         Ok(message.parts.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait ConversationService: Send + Sync {
    /// Send one message and wait for the full response
    async fn generate(
        &self,
        history: &[Content],
        message: &Content,
        options: &GenerationOptions,
    ) -> EaselResult<Vec<Part>>;
}
