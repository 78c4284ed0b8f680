//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Storyloom - illustrated storybooks with a consistent main character
#[derive(Parser, Debug)]
#[command(name = "storyloom")]
#[command(about = "Illustrated storybooks with a consistent main character", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a narrative file into scenes and print them as JSON
    Parse {
        /// Path to the narrative text file
        file: PathBuf,
    },

    /// Write and illustrate a story
    Illustrate {
        /// One-line story summary
        #[arg(long)]
        summary: String,

        /// Number of scenes to request
        #[arg(long, default_value = "5")]
        scenes: u32,

        /// Art style prompt (overrides configuration)
        #[arg(long)]
        style: Option<String>,

        /// Render local scene cards instead of calling the image backend
        #[arg(long)]
        offline: bool,

        /// Output directory for images and book.json
        #[arg(long)]
        out: PathBuf,

        /// Configuration file (replaces the layered configuration)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render a single placeholder image
    Placeholder {
        /// Scene number shown on the image
        scene: u32,

        /// Status label (defaults to the generation-failed label)
        #[arg(long)]
        label: Option<String>,

        /// Output JPEG file
        #[arg(long)]
        out: PathBuf,
    },
}
