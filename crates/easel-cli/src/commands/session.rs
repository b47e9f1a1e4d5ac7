//! Session management CLI commands

use crate::console::CliConsole;
use colored::Colorize;
use easel_core::{EaselResult, RevertEngine, RevertOutcome};
use easel_session::SessionStore;
use std::sync::Arc;

/// Clear the current session
pub async fn new_session(store: Arc<dyn SessionStore>, console: &CliConsole) -> EaselResult<()> {
    store.reset().await?;
    console.success("Session cleared. Ready for new image generation.");
    Ok(())
}

/// Show the current session
pub async fn session_info(store: Arc<dyn SessionStore>, console: &CliConsole) -> EaselResult<()> {
    let Some(summary) = store.describe().await else {
        println!(
            "{}",
            "No active session. Start generating to create one.".yellow()
        );
        return Ok(());
    };

    console.print_header(&format!("Current session: {} turn(s)", summary.turn_count));
    if summary.outputs.is_empty() {
        println!("{}", "No images generated yet.".dimmed());
    } else {
        println!("Outputs generated:");
        for (i, output) in summary.outputs.iter().enumerate() {
            println!("  {}. {}", i + 1, output);
        }
    }
    Ok(())
}

/// Undo the last N turns
pub async fn revert(
    store: Arc<dyn SessionStore>,
    console: &CliConsole,
    turns: u32,
) -> EaselResult<()> {
    let outcome = RevertEngine::new(store).revert(turns).await?;

    match &outcome {
        RevertOutcome::NothingToRevert => {
            console.warn("No active session to revert.");
        }
        RevertOutcome::Reverted {
            reverted,
            clamped,
            session,
        } => {
            if *clamped {
                console.warn(&format!(
                    "Can only revert {} turn(s). Reverting all.",
                    reverted
                ));
            }
            if session.is_empty() {
                console.success(&format!(
                    "Reverted {} turn(s). Session is now empty.",
                    reverted
                ));
            } else {
                console.success(&format!(
                    "Reverted {} turn(s). Now at turn {}.",
                    reverted, session.turn_count
                ));
                println!(
                    "Last output: {}",
                    outcome.last_output().unwrap_or("None")
                );
            }
        }
    }
    Ok(())
}
