//! Reconstruction of live conversation history from persisted records

use crate::codec::{PartRecord, TurnRecord, decode_bytes};
use crate::session::{Content, Part};
use tracing::warn;

/// Rebuild live turns from persisted records.
///
/// Turn order and part order are preserved. Part records that cannot be
/// turned into a valid part (no payload, or undecodable base64) are dropped
/// with a warning; the rest of the turn is kept. A record carrying both text
/// and inline data is read as text.
pub fn expand(records: &[TurnRecord]) -> Vec<Content> {
    records
        .iter()
        .enumerate()
        .map(|(turn_index, record)| Content {
            role: record.role,
            parts: record
                .parts
                .iter()
                .enumerate()
                .filter_map(|(part_index, part)| match expand_part(part) {
                    Ok(part) => Some(part),
                    Err(reason) => {
                        warn!(
                            "Dropping part {} of history entry {}: {}",
                            part_index, turn_index, reason
                        );
                        None
                    }
                })
                .collect(),
        })
        .collect()
}

fn expand_part(record: &PartRecord) -> Result<Part, String> {
    let part = if let Some(text) = &record.text {
        Part::text(text.clone())
    } else if let Some(inline) = &record.inline_data {
        let data = decode_bytes(&inline.data)
            .map_err(|e| format!("invalid inline data encoding: {}", e))?;
        Part::blob(inline.mime_type.clone(), data)
    } else {
        return Err("record has neither text nor inline data".to_string());
    };

    match &record.thought_signature {
        Some(signature) => {
            let signature = decode_bytes(signature)
                .map_err(|e| format!("invalid thought signature encoding: {}", e))?;
            Ok(part.with_thought_signature(signature))
        }
        None => Ok(part),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::InlineDataRecord;
    use crate::session::Role;

    #[test]
    fn test_expand_restores_parts_and_signatures() {
        let records = vec![
            TurnRecord::from_parts(Role::User, &[Part::text("a red apple")]),
            TurnRecord::from_parts(
                Role::Model,
                &[
                    Part::text("Done").with_thought_signature(b"sig-a".to_vec()),
                    Part::blob("image/png", vec![1, 2, 3, 4]).with_thought_signature(vec![0xff]),
                ],
            ),
        ];

        let contents = expand(&records);
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[0], Content::user(vec![Part::text("a red apple")]));
        assert_eq!(
            contents[1],
            Content::model(vec![
                Part::text("Done").with_thought_signature(b"sig-a".to_vec()),
                Part::blob("image/png", vec![1, 2, 3, 4]).with_thought_signature(vec![0xff]),
            ])
        );
    }

    #[test]
    fn test_expand_drops_empty_record() {
        let records = vec![TurnRecord::new(
            Role::Model,
            vec![
                PartRecord::default(),
                PartRecord {
                    text: Some("kept".to_string()),
                    ..Default::default()
                },
            ],
        )];

        let contents = expand(&records);
        assert_eq!(contents[0].parts, vec![Part::text("kept")]);
    }

    #[test]
    fn test_expand_drops_bad_base64() {
        let records = vec![TurnRecord::new(
            Role::Model,
            vec![
                PartRecord {
                    inline_data: Some(InlineDataRecord {
                        mime_type: "image/png".to_string(),
                        data: "!!not base64!!".to_string(),
                    }),
                    ..Default::default()
                },
                PartRecord {
                    text: Some("caption".to_string()),
                    thought_signature: Some("%%%".to_string()),
                    ..Default::default()
                },
            ],
        )];

        let contents = expand(&records);
        assert_eq!(contents.len(), 1);
        assert!(contents[0].parts.is_empty());
    }

    #[test]
    fn test_expand_prefers_text_when_both_present() {
        let records = vec![TurnRecord::new(
            Role::Model,
            vec![PartRecord {
                text: Some("both".to_string()),
                inline_data: Some(InlineDataRecord {
                    mime_type: "image/png".to_string(),
                    data: "AQID".to_string(),
                }),
                thought_signature: None,
            }],
        )];

        let contents = expand(&records);
        assert_eq!(contents[0].parts, vec![Part::text("both")]);
    }

    #[test]
    fn test_expand_empty() {
        assert!(expand(&[]).is_empty());
    }
}
