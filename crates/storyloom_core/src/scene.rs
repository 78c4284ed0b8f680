//! Parsed scene records.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One scene of a generated story.
///
/// `number` is assigned by the order in which scene boundaries were
/// encountered, starting at 1.
///
/// # Examples
///
/// ```
/// use storyloom_core::SceneRecord;
///
/// let scene = SceneRecord::new(1, "A hero stands.", "A knight in silver armor");
/// assert_eq!(*scene.number(), 1);
/// assert_eq!(scene.visual_descriptor(), "A knight in silver armor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct SceneRecord {
    /// Position of the scene in the story, 1-based
    number: u32,
    /// Prose with the visual descriptor removed
    narrative: String,
    /// Prompt fragment describing the scene's imagery
    #[serde(rename = "scene_description")]
    visual_descriptor: String,
}

impl SceneRecord {
    /// Create a scene record.
    pub fn new(
        number: u32,
        narrative: impl Into<String>,
        visual_descriptor: impl Into<String>,
    ) -> Self {
        Self {
            number,
            narrative: narrative.into(),
            visual_descriptor: visual_descriptor.into(),
        }
    }
}
