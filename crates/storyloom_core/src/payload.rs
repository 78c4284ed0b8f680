//! Request payloads for the consistent-subject image backend.
//!
//! A batch issues one `init` call covering the first two scenes, then one
//! `extra` call per remaining scene carrying the subject seed fixed by `init`.

use serde::{Deserialize, Serialize};

/// Maximum number of subject tokens forwarded to the backend.
pub const MAX_SUBJECT_TOKENS: usize = 5;

/// Seeds are kept below this bound.
pub const SEED_MODULUS: u64 = 1_000_000;

/// Which phase of the two-phase protocol a call belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GenerationMode {
    /// Establishes the subject identity and renders scenes 1 and 2
    Init,
    /// Renders one more scene against the established subject seed
    Extra,
}

/// Sampling parameters shared by every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    /// Attention dropout applied to the subject
    pub attention_dropout: f32,
    /// Classifier-free guidance scale
    pub cfg_scale: f32,
    /// Content the backend should steer away from
    pub negative_prompt: String,
    /// Share initial noise across images
    pub same_initial_noise: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            attention_dropout: 0.5,
            cfg_scale: 7.0,
            negative_prompt: "ugly, blurry, low quality, distorted, deformed".to_string(),
            same_initial_noise: false,
        }
    }
}

/// Payload of the `init` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitPayload {
    /// Description of the principal subject
    pub subject_prompt: String,
    /// At most [`MAX_SUBJECT_TOKENS`] identity tokens
    pub subject_tokens: Vec<String>,
    /// Freshly derived subject seed
    pub subject_seed: u64,
    /// Art style applied to every scene
    pub style_prompt: String,
    /// Descriptor of scene 1
    pub scene_prompt1: String,
    /// Descriptor of scene 2, or scene 1 again for single-scene batches
    pub scene_prompt2: String,
    /// Fixed sampling parameters
    #[serde(flatten)]
    pub parameters: GenerationParameters,
}

/// Payload of an `extra` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPayload {
    /// Description of the principal subject
    pub subject_prompt: String,
    /// At most [`MAX_SUBJECT_TOKENS`] identity tokens
    pub subject_tokens: Vec<String>,
    /// Subject seed established by the `init` call
    pub subject_seed: u64,
    /// Art style applied to every scene
    pub style_prompt: String,
    /// Descriptor of scene 1, for context
    pub scene_prompt1: String,
    /// Descriptor of scene 2, for context
    pub scene_prompt2: String,
    /// Descriptor of the scene being generated
    pub additional_scene_prompt: String,
    /// Fresh seed for this scene only
    pub additional_scene_seed: u64,
    /// Fixed sampling parameters
    #[serde(flatten)]
    pub parameters: GenerationParameters,
}

/// A single backend call, tagged by mode on the wire.
///
/// # Examples
///
/// ```
/// use storyloom_core::{GenerationMode, GenerationParameters, GenerationPayload, InitPayload};
///
/// let payload = GenerationPayload::Init(InitPayload {
///     subject_prompt: "a fox in a red scarf".to_string(),
///     subject_tokens: vec!["fox".to_string(), "scarf".to_string()],
///     subject_seed: 42,
///     style_prompt: "watercolor".to_string(),
///     scene_prompt1: "the fox wakes".to_string(),
///     scene_prompt2: "the fox runs".to_string(),
///     parameters: GenerationParameters::default(),
/// });
///
/// assert_eq!(payload.mode(), GenerationMode::Init);
/// let json = serde_json::to_value(&payload).unwrap();
/// assert_eq!(json["mode"], "init");
/// assert_eq!(json["cfg_scale"], 7.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum GenerationPayload {
    /// First call of a batch
    Init(InitPayload),
    /// Follow-up call for scene 3 onward
    Extra(ExtraPayload),
}

impl GenerationPayload {
    /// Mode tag of this payload.
    pub fn mode(&self) -> GenerationMode {
        match self {
            GenerationPayload::Init(_) => GenerationMode::Init,
            GenerationPayload::Extra(_) => GenerationMode::Extra,
        }
    }

    /// Subject seed carried by the payload.
    pub fn subject_seed(&self) -> u64 {
        match self {
            GenerationPayload::Init(p) => p.subject_seed,
            GenerationPayload::Extra(p) => p.subject_seed,
        }
    }

    /// Subject tokens carried by the payload.
    pub fn subject_tokens(&self) -> &[String] {
        match self {
            GenerationPayload::Init(p) => &p.subject_tokens,
            GenerationPayload::Extra(p) => &p.subject_tokens,
        }
    }
}
