//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands;
use crate::console::CliConsole;
use easel_core::{EaselConfig, EaselResult, GenerationOptions};
use easel_session::LocalSessionStore;
use std::sync::Arc;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> EaselResult<()> {
    let mut config = EaselConfig::from_env()?;
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    let console = CliConsole::new(cli.verbose);
    console.info(&format!("Session file: {}", config.session_file.display()));
    let store = Arc::new(LocalSessionStore::new(config.session_file.clone()));

    match cli.command {
        Commands::Generate {
            prompt,
            references,
            generation,
        } => {
            let options = GenerationOptions::from(&generation);
            commands::generate::execute(&config, store, &console, &prompt, &references, &options)
                .await
        }
        Commands::New => commands::session::new_session(store, &console).await,
        Commands::Info => commands::session::session_info(store, &console).await,
        Commands::Revert { turns } => commands::session::revert(store, &console, turns).await,
        Commands::Photo {
            title,
            subject,
            context,
            style,
            generation,
        } => {
            let request = commands::photo::PhotoRequest {
                title,
                subject,
                context,
                style,
                options: GenerationOptions::from(&generation),
            };
            commands::photo::execute(&config, store, &console, request).await
        }
    }
}
