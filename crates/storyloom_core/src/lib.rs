//! Core data types for the Storyloom illustrated book generator.
//!
//! This crate provides the records exchanged between the scene parser,
//! the character extractor, the image backend, and the batch orchestrator.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod character;
mod extraction;
mod payload;
mod scene;

pub use artifact::{ArtifactOrigin, BackendArtifact, ImageArtifact};
pub use character::CharacterDescriptor;
pub use extraction::{Extraction, ExtractionStatus};
pub use payload::{
    ExtraPayload, GenerationMode, GenerationParameters, GenerationPayload, InitPayload,
    MAX_SUBJECT_TOKENS, SEED_MODULUS,
};
pub use scene::SceneRecord;
