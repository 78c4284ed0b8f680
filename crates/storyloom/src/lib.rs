//! Storyloom - illustrated storybooks with a consistent main character.
//!
//! Storyloom asks a text model for a multi-scene story, splits it into
//! scenes with bracketed visual descriptors, extracts a description of the
//! principal subject, and generates one image per scene while holding the
//! subject's appearance fixed across the whole book.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use storyloom::{BookPipeline, OllamaClient, StoryloomConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoryloomConfig::load()?;
//!     let pipeline = BookPipeline::from_config(config.text.client(), &config)?;
//!
//!     let book = pipeline.illustrate("A lighthouse keeper befriends a whale", 4).await?;
//!     for image in book.images() {
//!         println!("scene {} ({})", image.scene_number(), image.origin());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Storyloom is organized as a workspace with focused crates:
//!
//! - `storyloom_error` - Error types
//! - `storyloom_core` - Scene, character, artifact and payload types
//! - `storyloom_interface` - `TextGenerator` and `ImageBackend` traits
//! - `storyloom_narrative` - Story prompts, scene parsing, character extraction
//! - `storyloom_models` - Ollama and Consistory clients
//! - `storyloom_render` - Placeholder and offline scene-card rendering
//! - `storyloom_illustration` - Consistent-subject batch orchestration
//!
//! This crate (`storyloom`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod output;
mod pipeline;

pub use config::{BookConfig, DEFAULT_STYLE_PROMPT, StoryloomConfig, TextModelConfig};
pub use output::{BookManifest, MANIFEST_FILE, ManifestImage, write_book};
pub use pipeline::{BookPipeline, IllustratedBook};

// Re-export workspace crates
pub use storyloom_core::*;
pub use storyloom_error::*;
pub use storyloom_illustration::*;
pub use storyloom_interface::*;
pub use storyloom_models::*;
pub use storyloom_narrative::*;
pub use storyloom_render::*;
