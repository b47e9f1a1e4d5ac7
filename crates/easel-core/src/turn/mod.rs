//! Generation turn orchestration
//!
//! One turn loads the stored session, replays its history to the
//! conversation service together with the new prompt, records the response
//! and saves. The session is only written after the service call succeeded
//! and every image was written. A failed turn leaves no trace in the stored
//! session, and images it already wrote are removed again.

mod output;
mod references;

pub use output::{extension_for, output_path};
pub use references::{References, load_references, mime_type_for};

use crate::config::GenerationOptions;
use crate::error::{EaselError, EaselResult};
use crate::llm::ConversationService;
use chrono::Local;
use easel_session::{
    Content, Part, PartRecord, Role, Session, SessionStore, TurnRecord, expand,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

/// Result of a completed turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Turn count after this turn
    pub turn_count: u32,
    /// Image written by this turn, if the response contained one
    pub output_path: Option<PathBuf>,
    /// Text returned by the model, in order
    pub texts: Vec<String>,
    /// Reference images that were skipped because they do not exist
    pub skipped_references: Vec<PathBuf>,
}

/// Runs generation turns against one session
pub struct TurnController {
    store: Arc<dyn SessionStore>,
    service: Arc<dyn ConversationService>,
    output_dir: PathBuf,
}

impl TurnController {
    pub fn new(
        store: Arc<dyn SessionStore>,
        service: Arc<dyn ConversationService>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            service,
            output_dir: output_dir.into(),
        }
    }

    /// Directory generated images are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Generate or refine an image, continuing the stored session if any
    pub async fn submit_turn(
        &self,
        prompt: &str,
        reference_images: &[PathBuf],
        options: &GenerationOptions,
    ) -> EaselResult<TurnOutcome> {
        if prompt.trim().is_empty() {
            return Err(EaselError::invalid_input_field("Prompt must not be empty", "prompt"));
        }

        let mut session = self.store.load().await;
        let next_turn = session.turn_count + 1;

        let history = if session.history.is_empty() {
            info!("Starting new session...");
            Vec::new()
        } else {
            info!("Continuing session (turn {})...", next_turn);
            expand(&session.history)
        };

        let references = load_references(reference_images).await?;
        let mut message_parts = vec![Part::text(prompt)];
        message_parts.extend(references.parts);
        let message = Content::user(message_parts);

        // Only the prompt text is recorded; reference images are not replayed.
        session
            .history
            .push(TurnRecord::from_parts(Role::User, &[Part::text(prompt)]));

        let response = self.service.generate(&history, &message, options).await?;
        if response.is_empty() {
            warn!("Model returned an empty response");
        }

        let mut written = Vec::new();
        let recorded = self
            .record_response(&mut session, &response, next_turn, &mut written)
            .await;
        let (texts, output) = match recorded {
            Ok(recorded) => recorded,
            Err(e) => {
                discard_outputs(&written).await;
                return Err(e);
            }
        };

        Ok(TurnOutcome {
            turn_count: session.turn_count,
            output_path: output,
            texts,
            skipped_references: references.missing,
        })
    }

    /// Write response images, append the model turn and save the session.
    ///
    /// Every image written is pushed to `written`, also on failure.
    async fn record_response(
        &self,
        session: &mut Session,
        response: &[Part],
        turn: u32,
        written: &mut Vec<PathBuf>,
    ) -> EaselResult<(Vec<String>, Option<PathBuf>)> {
        let mut model_parts = Vec::with_capacity(response.len());
        let mut texts = Vec::new();
        let mut output = None;

        for part in response {
            match part {
                Part::Text { text, .. } => {
                    info!("Model: {}", text);
                    texts.push(text.clone());
                }
                Part::Blob {
                    mime_type, data, ..
                } => {
                    let path = output_path(
                        &self.output_dir,
                        turn,
                        Local::now().time(),
                        mime_type,
                        written.len(),
                    );
                    self.write_output(&path, data).await?;
                    info!("Saved: {}", path.display());
                    written.push(path.clone());
                    output = Some(path);
                }
            }
            model_parts.push(PartRecord::from_part(part));
        }

        session
            .history
            .push(TurnRecord::new(Role::Model, model_parts));
        session.turn_count = turn;
        if let Some(path) = &output {
            session.outputs.push(path.to_string_lossy().into_owned());
        }

        self.store.save(session).await?;
        Ok((texts, output))
    }

    async fn write_output(&self, path: &Path, data: &[u8]) -> EaselResult<()> {
        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            EaselError::io_with_path(
                format!("Failed to create output directory: {}", e),
                self.output_dir.display().to_string(),
            )
        })?;
        fs::write(path, data).await.map_err(|e| {
            EaselError::io_with_path(
                format!("Failed to write image: {}", e),
                path.display().to_string(),
            )
        })
    }
}

/// Remove images of a turn that could not be recorded
async fn discard_outputs(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path).await {
            warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}
