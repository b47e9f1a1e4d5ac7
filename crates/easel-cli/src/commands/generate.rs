//! Generate command

use crate::console::CliConsole;
use easel_core::{
    EaselConfig, EaselResult, GeminiImageProvider, GenerationOptions, TurnController, TurnOutcome,
};
use easel_session::SessionStore;
use std::path::PathBuf;
use std::sync::Arc;

/// Build a turn controller. Fails before any session access when the API
/// key is missing.
pub fn controller(
    config: &EaselConfig,
    store: Arc<dyn SessionStore>,
) -> EaselResult<TurnController> {
    let provider = GeminiImageProvider::new(config)?;
    Ok(TurnController::new(
        store,
        Arc::new(provider),
        config.output_dir.clone(),
    ))
}

/// Print what a turn produced
pub fn report(console: &CliConsole, outcome: &TurnOutcome) {
    for path in &outcome.skipped_references {
        console.warn(&format!("Reference image not found: {}", path.display()));
    }
    for text in &outcome.texts {
        console.model(text);
    }
    match &outcome.output_path {
        Some(path) => console.success(&format!(
            "Saved: {} (turn {})",
            path.display(),
            outcome.turn_count
        )),
        None => console.warn(&format!(
            "No image in response (turn {})",
            outcome.turn_count
        )),
    }
}

/// Execute the generate command
pub async fn execute(
    config: &EaselConfig,
    store: Arc<dyn SessionStore>,
    console: &CliConsole,
    prompt: &str,
    references: &[PathBuf],
    options: &GenerationOptions,
) -> EaselResult<()> {
    let controller = controller(config, store)?;
    console.info(&format!(
        "Generating with {} ({}, {})",
        options.model, options.aspect_ratio, options.resolution
    ));

    let outcome = controller.submit_turn(prompt, references, options).await?;
    report(console, &outcome);
    Ok(())
}
