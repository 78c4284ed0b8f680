//! Image artifacts.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Where an artifact's image came from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ArtifactOrigin {
    /// Produced by the image backend, or by offline mode's deterministic cards
    Generated,
    /// Synthesized because real generation did not complete
    Placeholder,
}

/// Final image for one scene of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageArtifact {
    /// Scene this image illustrates, 1-based
    scene_number: u32,
    /// Encoded image bytes
    #[serde(skip)]
    payload: Vec<u8>,
    /// Generated or placeholder
    origin: ArtifactOrigin,
}

impl ImageArtifact {
    /// Artifact produced by generation.
    pub fn generated(scene_number: u32, payload: Vec<u8>) -> Self {
        Self {
            scene_number,
            payload,
            origin: ArtifactOrigin::Generated,
        }
    }

    /// Stand-in artifact for a scene whose generation did not complete.
    pub fn placeholder(scene_number: u32, payload: Vec<u8>) -> Self {
        Self {
            scene_number,
            payload,
            origin: ArtifactOrigin::Placeholder,
        }
    }

    /// True if this artifact is a failure stand-in.
    pub fn is_placeholder(&self) -> bool {
        self.origin == ArtifactOrigin::Placeholder
    }

    /// Consume the artifact, returning its bytes.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

/// One entry of a backend response, kept at its response position.
///
/// The backend may withhold an image (for example when it is filtered)
/// while still reporting a seed; such entries have no payload.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct BackendArtifact {
    /// Decoded image bytes, absent when the backend withheld the image
    #[getter(skip)]
    payload: Option<Vec<u8>>,
    /// Seed the backend used, when it reports one
    seed: Option<u64>,
}

impl BackendArtifact {
    /// Create a backend artifact carrying an image.
    pub fn new(payload: Vec<u8>, seed: Option<u64>) -> Self {
        Self {
            payload: Some(payload),
            seed,
        }
    }

    /// Create an entry for an image the backend did not return.
    pub fn withheld(seed: Option<u64>) -> Self {
        Self {
            payload: None,
            seed,
        }
    }

    /// Image bytes, if the backend returned any.
    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    /// Consume the artifact, returning its bytes if present.
    pub fn into_payload(self) -> Option<Vec<u8>> {
        self.payload
    }
}
