//! Error types for the Storyloom library.
//!
//! This crate provides the foundation error types used throughout the Storyloom workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use storyloom_error::{StoryloomResult, ConfigError};
//!
//! fn load_key() -> StoryloomResult<String> {
//!     Err(ConfigError::new("api_key is required in external mode"))?
//! }
//!
//! match load_key() {
//!     Ok(key) => println!("Got: {}", key),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod image_backend;
mod io;
mod narrative;
mod render;
mod text_generation;

pub use config::ConfigError;
pub use error::{StoryloomError, StoryloomErrorKind, StoryloomResult};
pub use http::HttpError;
pub use image_backend::{ImageBackendError, ImageBackendErrorKind, ImageBackendResult};
pub use io::IoError;
pub use narrative::{NarrativeError, NarrativeErrorKind};
pub use render::RenderError;
pub use text_generation::{TextGenerationError, TextGenerationErrorKind, TextGenerationResult};
