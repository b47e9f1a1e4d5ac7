//! Google (Gemini) image provider implementation

use super::service::ConversationService;
use super::wire::{GenerateContentResponse, build_request, parse_response};
use crate::config::{EaselConfig, GenerationOptions};
use crate::error::{EaselError, EaselResult};
use async_trait::async_trait;
use easel_session::{Content, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::instrument;

/// Gemini `generateContent` client for image models
pub struct GeminiImageProvider {
    api_key: String,
    base_url: String,
    http_client: Client,
}

impl GeminiImageProvider {
    /// Create a provider from configuration.
    ///
    /// Fails with a configuration error when no API key is set, so callers
    /// can build the provider before touching any session state.
    pub fn new(config: &EaselConfig) -> EaselResult<Self> {
        let api_key = config.require_api_key()?.to_string();
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EaselError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            http_client,
        })
    }

    fn endpoint(&self, options: &GenerationOptions) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            options.model.id()
        )
    }
}

#[async_trait]
impl ConversationService for GeminiImageProvider {
    #[instrument(skip(self, history, message), fields(model = %options.model), level = "debug")]
    async fn generate(
        &self,
        history: &[Content],
        message: &Content,
        options: &GenerationOptions,
    ) -> EaselResult<Vec<Part>> {
        let request_body = build_request(history, message, options);
        tracing::debug!(
            "Sending {} content item(s) to Gemini",
            request_body.contents.len()
        );

        let response = self
            .http_client
            .post(self.endpoint(options))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| EaselError::http(format!("Google request failed: {}", e), None))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(EaselError::http(
                format!("Google API error (status {}): {}", status, error_text),
                Some(status.as_u16()),
            ));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            EaselError::llm_with_provider(format!("Failed to parse Google response: {}", e), "google")
        })?;

        let parts = parse_response(parsed)?;
        tracing::debug!("Gemini returned {} part(s)", parts.len());
        Ok(parts)
    }
}
