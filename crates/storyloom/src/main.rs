//! Storyloom CLI binary.
//!
//! This binary provides command-line access to Storyloom's functionality:
//! - Parse narrative files into scenes
//! - Write and illustrate a storybook
//! - Render standalone placeholder images

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

/// `--verbose` raises only the workspace crates to debug.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "info,storyloom=debug"
    } else {
        "info"
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, IllustrateOptions, illustrate, parse_file, render_placeholder};

    // Environment overrides may live in .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(cli.verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Parse { file } => {
            parse_file(&file)?;
        }

        Commands::Illustrate {
            summary,
            scenes,
            style,
            offline,
            out,
            config,
        } => {
            illustrate(IllustrateOptions {
                summary,
                scenes,
                style,
                offline,
                out,
                config,
            })
            .await?;
        }

        Commands::Placeholder { scene, label, out } => {
            render_placeholder(scene, label.as_deref(), &out)?;
        }
    }

    Ok(())
}
