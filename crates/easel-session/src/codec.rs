//! Persisted session records
//!
//! The on-disk session is plain JSON so it can be inspected and hand-edited.
//! Binary payloads and thought signatures are stored as standard base64.

use crate::session::{Part, Role, Session};
use crate::storage::StorageResult;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// One persisted turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub role: Role,
    #[serde(default, deserialize_with = "deserialize_parts")]
    pub parts: Vec<PartRecord>,
}

/// Read part records one at a time.
///
/// A record of the wrong shape becomes an empty `PartRecord`, which history
/// reconstruction drops, instead of failing the whole session.
fn deserialize_parts<'de, D>(deserializer: D) -> Result<Vec<PartRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<PartRecord>(value).unwrap_or_else(|e| {
                warn!("Unreadable part record {}: {}", index, e);
                PartRecord::default()
            })
        })
        .collect())
}

impl TurnRecord {
    pub fn new(role: Role, parts: Vec<PartRecord>) -> Self {
        Self { role, parts }
    }

    /// Build a record from live parts
    pub fn from_parts(role: Role, parts: &[Part]) -> Self {
        Self {
            role,
            parts: parts.iter().map(PartRecord::from_part).collect(),
        }
    }

    /// Whether any part of this turn carries binary media
    pub fn has_inline_data(&self) -> bool {
        self.parts.iter().any(|p| p.inline_data.is_some())
    }
}

/// One persisted part.
///
/// Well-formed records carry exactly one of `text` or `inline_data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineDataRecord>,

    /// Base64 thought signature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought_signature: Option<String>,
}

/// Persisted binary payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineDataRecord {
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

impl PartRecord {
    /// Encode a live part for persistence
    pub fn from_part(part: &Part) -> Self {
        match part {
            Part::Text {
                text,
                thought_signature,
            } => Self {
                text: Some(text.clone()),
                inline_data: None,
                thought_signature: thought_signature.as_deref().map(encode_bytes),
            },
            Part::Blob {
                mime_type,
                data,
                thought_signature,
            } => Self {
                text: None,
                inline_data: Some(InlineDataRecord {
                    mime_type: mime_type.clone(),
                    data: encode_bytes(data),
                }),
                thought_signature: thought_signature.as_deref().map(encode_bytes),
            },
        }
    }
}

pub(crate) fn encode_bytes(bytes: &[u8]) -> String {
    BASE64_STANDARD.encode(bytes)
}

pub(crate) fn decode_bytes(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    BASE64_STANDARD.decode(encoded)
}

/// Serialize a session to its durable JSON form
pub fn encode(session: &Session) -> StorageResult<String> {
    Ok(serde_json::to_string_pretty(session)?)
}

/// Deserialize a session, falling back to an empty one.
///
/// Absent content, invalid JSON, or JSON of the wrong shape all yield
/// `Session::default()`. A damaged session file must never block generation.
pub fn decode(content: Option<&str>) -> Session {
    let Some(content) = content else {
        return Session::default();
    };

    match serde_json::from_str::<Session>(content) {
        Ok(session) => session,
        Err(e) => {
            warn!("Discarding unreadable session data: {}", e);
            Session::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        let user = TurnRecord::from_parts(Role::User, &[Part::text("a red apple on a table")]);
        let model = TurnRecord::from_parts(
            Role::Model,
            &[
                Part::text("Here is your apple.").with_thought_signature(vec![0, 255, 17, 42]),
                Part::blob("image/png", vec![0x89, b'P', b'N', b'G', 0, 1, 2])
                    .with_thought_signature(vec![9, 8, 7]),
            ],
        );
        Session {
            history: vec![user, model],
            outputs: vec!["recipes/photos/output_001_101010.png".to_string()],
            turn_count: 1,
        }
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let session = sample_session();
        let encoded = encode(&session).unwrap();
        let decoded = decode(Some(&encoded));
        assert_eq!(decoded, session);
    }

    #[test]
    fn test_durable_layout_uses_original_keys() {
        let encoded = encode(&sample_session()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(value["turn"], 1);
        assert_eq!(value["history"][0]["role"], "user");
        assert_eq!(value["history"][1]["role"], "model");
        assert_eq!(
            value["history"][1]["parts"][1]["inline_data"]["mime_type"],
            "image/png"
        );
        assert_eq!(
            value["history"][1]["parts"][0]["thought_signature"],
            BASE64_STANDARD.encode([0u8, 255, 17, 42])
        );
        // User turns never carry a signature
        assert!(value["history"][0]["parts"][0].get("thought_signature").is_none());
    }

    #[test]
    fn test_decode_missing_content() {
        assert_eq!(decode(None), Session::default());
    }

    #[test]
    fn test_decode_invalid_json() {
        let session = decode(Some("{ not json"));
        assert_eq!(session.turn_count, 0);
        assert!(session.history.is_empty());
    }

    #[test]
    fn test_decode_wrong_shape() {
        let session = decode(Some(r#"{"history": "oops", "turn": "three"}"#));
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_decode_keeps_session_with_malformed_parts() {
        let content = r#"{
            "history": [
                {"role": "user", "parts": [{"text": 42}]},
                {"role": "model", "parts": [
                    {"text": "here"},
                    {"inline_data": {"mime_type": "image/png"}}
                ]},
                {"role": "user", "parts": [{"text": "make it blue"}]},
                {"role": "model", "parts": [{"inline_data": {"mime_type": "image/png", "data": "AQID"}}]}
            ],
            "outputs": ["recipes/photos/output_002_101010.png"],
            "turn": 2
        }"#;

        let session = decode(Some(content));
        assert_eq!(session.turn_count, 2);
        assert_eq!(session.history.len(), 4);
        assert_eq!(session.outputs, vec!["recipes/photos/output_002_101010.png"]);
        assert_eq!(session.history[0].parts, vec![PartRecord::default()]);
        assert_eq!(session.history[1].parts.len(), 2);
        assert_eq!(session.history[1].parts[1], PartRecord::default());
        assert!(session.history[3].has_inline_data());

        let contents = crate::history::expand(&session.history);
        assert!(contents[0].parts.is_empty());
        assert_eq!(contents[1].parts, vec![Part::text("here")]);
        assert_eq!(contents[2].parts, vec![Part::text("make it blue")]);
        assert_eq!(contents[3].parts, vec![Part::blob("image/png", vec![1, 2, 3])]);
    }

    #[test]
    fn test_decode_parts_not_a_list_discards_session() {
        let session = decode(Some(
            r#"{"history": [{"role": "user", "parts": "oops"}], "outputs": [], "turn": 1}"#,
        ));
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_decode_missing_keys_default() {
        let session = decode(Some(r#"{"turn": 0}"#));
        assert_eq!(session, Session::default());

        let session = decode(Some(r#"{}"#));
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_has_inline_data() {
        let session = sample_session();
        assert!(!session.history[0].has_inline_data());
        assert!(session.history[1].has_inline_data());
    }
}
