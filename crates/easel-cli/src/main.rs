//! Easel CLI application
//!
//! Iteratively generate and refine images with a Gemini image model. Each
//! `generate` call continues the stored session, so follow-up prompts such
//! as "make it green" refine the previous image.
//!
//! ```bash
//! easel generate "a red apple on a linen tablecloth"
//! easel generate "make it green"
//! easel revert
//! easel info
//! easel new
//! ```

mod args;
mod commands;
mod console;
mod router;

use args::Cli;
use clap::Parser;
use console::CliConsole;

#[tokio::main]
async fn main() {
    // Set RUST_LOG=debug for verbose logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = router::route(cli).await {
        CliConsole::new(false).error(&format!("{} [{}]", e, e.error_code()));
        std::process::exit(1);
    }
}
