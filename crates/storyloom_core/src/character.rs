//! Principal subject description.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Appearance of a story's principal subject plus a few identity tokens.
///
/// An empty descriptor is a valid, degraded result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct CharacterDescriptor {
    /// Free-form visual description
    description: String,
    /// Short identifying words, in the order the model listed them
    tokens: Vec<String>,
}

impl CharacterDescriptor {
    /// Create a descriptor.
    pub fn new(description: impl Into<String>, tokens: Vec<String>) -> Self {
        Self {
            description: description.into(),
            tokens,
        }
    }

    /// True when neither a description nor any token was found.
    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.tokens.is_empty()
    }
}
