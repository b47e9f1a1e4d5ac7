//! Gemini `generateContent` wire format

use crate::config::GenerationOptions;
use crate::error::{EaselError, EaselResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use easel_session::{Content, Part};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<WireContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_modalities: Vec<&'static str>,
    pub image_config: ImageConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageConfig {
    pub aspect_ratio: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<&'static str>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<WirePart>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WirePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<WireBlob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought_signature: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireBlob {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<WireContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl From<&Content> for WireContent {
    fn from(content: &Content) -> Self {
        Self {
            role: Some(content.role.to_string()),
            parts: content.parts.iter().map(WirePart::from).collect(),
        }
    }
}

impl From<&Part> for WirePart {
    fn from(part: &Part) -> Self {
        let thought_signature = part.thought_signature().map(|s| BASE64_STANDARD.encode(s));
        match part {
            Part::Text { text, .. } => Self {
                text: Some(text.clone()),
                inline_data: None,
                thought_signature,
            },
            Part::Blob {
                mime_type, data, ..
            } => Self {
                text: None,
                inline_data: Some(WireBlob {
                    mime_type: mime_type.clone(),
                    data: BASE64_STANDARD.encode(data),
                }),
                thought_signature,
            },
        }
    }
}

/// Build the request body for one turn
pub(crate) fn build_request(
    history: &[Content],
    message: &Content,
    options: &GenerationOptions,
) -> GenerateContentRequest {
    let contents = history
        .iter()
        .chain(std::iter::once(message))
        .map(WireContent::from)
        .collect();

    let image_size = options
        .model
        .supports_image_size()
        .then(|| options.resolution.as_str());

    GenerateContentRequest {
        contents,
        generation_config: GenerationConfig {
            response_modalities: vec!["TEXT", "IMAGE"],
            image_config: ImageConfig {
                aspect_ratio: options.aspect_ratio.as_str(),
                image_size,
            },
        },
    }
}

/// Convert the first candidate of a response into ordered parts
pub(crate) fn parse_response(response: GenerateContentResponse) -> EaselResult<Vec<Part>> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(EaselError::llm_with_provider(
            format!("Gemini returned no content: {}", reason),
            "google",
        ));
    };

    let Some(content) = candidate.content else {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "unknown".to_string());
        return Err(EaselError::llm_with_provider(
            format!("Gemini candidate has no content (finish reason: {})", reason),
            "google",
        ));
    };

    let mut parts = Vec::with_capacity(content.parts.len());
    for wire in content.parts {
        let part = if let Some(text) = wire.text {
            Part::text(text)
        } else if let Some(blob) = wire.inline_data {
            Part::blob(blob.mime_type, decode("inline data", &blob.data)?)
        } else {
            tracing::debug!("Skipping response part without text or inline data");
            continue;
        };

        let part = match wire.thought_signature {
            Some(signature) => part.with_thought_signature(decode("thought signature", &signature)?),
            None => part,
        };
        parts.push(part);
    }

    Ok(parts)
}

fn decode(what: &str, encoded: &str) -> EaselResult<Vec<u8>> {
    BASE64_STANDARD.decode(encoded).map_err(|e| {
        EaselError::llm_with_provider(format!("Invalid base64 {} in response: {}", what, e), "google")
    })
}
