//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storyloom binary.

mod commands;
mod run;

pub use commands::{Cli, Commands};
pub use run::{IllustrateOptions, illustrate, parse_file, render_placeholder};
