//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use easel_core::{AspectRatio, GenerationOptions, ImageModel, Resolution};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "easel")]
#[command(about = "Easel - iterative image generation with session history and undo")]
#[command(
    long_about = r#"Easel - iterative image generation with session history and undo

USAGE:
  easel generate "prompt"        # Generate, or refine the current image
  easel revert [N]               # Undo the last N turns
  easel info                     # Show the current session
  easel new                      # Start over
  easel photo --title T --subject S
                                 # One-shot photo with a stable file name

GEMINI_API_KEY must be set (a .env file is read if present)."#
)]
#[command(version)]
pub struct Cli {
    /// Session file (overrides EASEL_SESSION_FILE)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Directory for generated images (overrides EASEL_OUTPUT_DIR)
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an image, continuing the current session
    Generate {
        /// What to generate or change
        prompt: String,

        /// Reference image (repeatable)
        #[arg(long = "reference", short = 'r')]
        references: Vec<PathBuf>,

        #[command(flatten)]
        generation: GenerationArgs,
    },

    /// Clear the current session
    New,

    /// Show the current session
    Info,

    /// Undo the last N turns
    Revert {
        /// Number of turns to undo
        #[arg(default_value_t = 1)]
        turns: u32,
    },

    /// Generate a single photo in a fresh session and give it a stable name
    Photo {
        /// Title used for the file name
        #[arg(long)]
        title: String,

        /// Visual description of the subject
        #[arg(long)]
        subject: String,

        /// Styling context (props, setting)
        #[arg(long)]
        context: Option<String>,

        /// Photographic style
        #[arg(long)]
        style: Option<String>,

        #[command(flatten)]
        generation: GenerationArgs,
    },
}

/// Generation options shared by the generating commands
#[derive(Args, Clone)]
pub struct GenerationArgs {
    /// Aspect ratio: 1:1, 3:4, 4:3, 16:9 or 9:16
    #[arg(long, default_value = "4:3")]
    pub aspect_ratio: AspectRatio,

    /// Resolution: 1K, 2K or 4K
    #[arg(long, default_value = "1K")]
    pub resolution: Resolution,

    /// Image model
    #[arg(long, default_value = "gemini-3-pro-image-preview")]
    pub model: ImageModel,
}

impl From<&GenerationArgs> for GenerationOptions {
    fn from(args: &GenerationArgs) -> Self {
        GenerationOptions::new()
            .with_aspect_ratio(args.aspect_ratio)
            .with_resolution(args.resolution)
            .with_model(args.model)
    }
}
