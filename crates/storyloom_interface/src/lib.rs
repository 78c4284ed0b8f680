//! Trait definitions for the Storyloom collaborators.
//!
//! The narrative and illustration crates depend only on these traits, so
//! model servers and image backends can be swapped or mocked.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ImageBackend, TextGenerator};
