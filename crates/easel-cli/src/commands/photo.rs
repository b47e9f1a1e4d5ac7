//! One-shot photo command
//!
//! Composes a prompt from subject, context and style, generates it in a
//! fresh session and moves the result to a name derived from the title.

use super::generate::{controller, report};
use crate::console::CliConsole;
use easel_core::{EaselConfig, EaselError, EaselResult, GenerationOptions};
use easel_session::SessionStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// Photo request assembled from CLI arguments
pub struct PhotoRequest {
    pub title: String,
    pub subject: String,
    pub context: Option<String>,
    pub style: Option<String>,
    pub options: GenerationOptions,
}

impl PhotoRequest {
    /// Subject, context and style separated by blank lines
    pub fn prompt(&self) -> String {
        [Some(&self.subject), self.context.as_ref(), self.style.as_ref()]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Convert a title into a file-name-safe slug
pub fn slugify(title: &str) -> String {
    let lowered: String = title
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2018}' | '\u{2019}' | '`'))
        .collect();

    let mut slug = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// Stable location for a titled photo, keeping the generated extension
fn final_path(output_dir: &Path, title: &str, generated: &Path) -> PathBuf {
    let extension = generated
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");
    output_dir.join(format!("{}.{}", slugify(title), extension))
}

/// Point the session's latest output at the renamed photo
async fn relocate_last_output(store: &dyn SessionStore, from: &Path, to: &Path) -> EaselResult<()> {
    let mut session = store.load().await;
    let from = from.to_string_lossy();
    match session.outputs.last_mut() {
        Some(last) if *last == from => *last = to.to_string_lossy().into_owned(),
        _ => return Ok(()),
    }
    store.save(&session).await?;
    Ok(())
}

/// Execute the photo command
pub async fn execute(
    config: &EaselConfig,
    store: Arc<dyn SessionStore>,
    console: &CliConsole,
    request: PhotoRequest,
) -> EaselResult<()> {
    if slugify(&request.title).is_empty() {
        return Err(EaselError::invalid_input_field(
            "Title must contain at least one letter or digit",
            "title",
        ));
    }

    let controller = controller(config, store.clone())?;
    store.reset().await?;

    let outcome = controller
        .submit_turn(&request.prompt(), &[], &request.options)
        .await?;
    report(console, &outcome);

    let Some(generated) = outcome.output_path else {
        console.warn("No photo was generated.");
        return Ok(());
    };

    let target = final_path(controller.output_dir(), &request.title, &generated);
    if target != generated {
        fs::rename(&generated, &target).await.map_err(|e| {
            EaselError::io_with_path(
                format!("Failed to move photo: {}", e),
                target.display().to_string(),
            )
        })?;
        relocate_last_output(store.as_ref(), &generated, &target).await?;
    }
    console.success(&format!("Photo saved: {}", target.display()));
    Ok(())
}
