//! Consistory wire types.

use serde::{Deserialize, Serialize};

/// Response body of a Consistory call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistoryResponse {
    /// Generated images; absent means none
    #[serde(default)]
    pub artifacts: Vec<ConsistoryArtifact>,
}

/// One generated image as returned on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistoryArtifact {
    /// Base64-encoded image, absent for filtered results
    #[serde(default)]
    pub base64: Option<String>,
    /// Seed used for this image
    #[serde(default)]
    pub seed: Option<u64>,
    /// Backend's reason for finishing (e.g. "SUCCESS", "CONTENT_FILTERED")
    #[serde(default, rename = "finishReason")]
    pub finish_reason: Option<String>,
}
