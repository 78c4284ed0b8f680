//! Story generation from a short summary.

use crate::SceneParser;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use storyloom_core::SceneRecord;
use storyloom_error::{NarrativeError, NarrativeErrorKind, StoryloomResult};
use storyloom_interface::TextGenerator;
use tracing::{info, instrument, warn};

/// Build the instruction asking a model for a story of `num_scenes` scenes.
pub fn story_prompt(summary: &str, num_scenes: u32) -> String {
    format!(
        "Based on this summary: \"{summary}\"\n\
         Write a story with exactly {num_scenes} scenes.\n\
         For each scene:\n\
         1. Start with \"Scene X:\" where X is the scene number\n\
         2. Write a descriptive paragraph for the scene\n\
         3. Include details about the setting and any characters present\n\
         4. End each scene with a clear scene description in [square brackets]\n\
         Make sure the scene descriptions are detailed and consistent.\n\
         \n\
         Example format:\n\
         Scene 1:\n\
         The sun rose over the misty mountains as Sarah approached the ancient temple...\n\
         [A young woman with flowing red hair and a green cloak standing before a weathered stone temple at dawn]\n"
    )
}

/// Raw story text together with its parsed scenes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Story {
    /// Text exactly as the model produced it
    text: String,
    /// Scenes parsed from `text`; may be empty
    scenes: Vec<SceneRecord>,
}

impl Story {
    /// Parse `text` into a story.
    pub fn from_text(text: impl Into<String>, parser: &SceneParser) -> Self {
        let text = text.into();
        let scenes = parser.parse(&text);
        Self { text, scenes }
    }

    /// Split into text and scenes.
    pub fn into_parts(self) -> (String, Vec<SceneRecord>) {
        (self.text, self.scenes)
    }
}

/// Writes a story with a text model and splits it into scenes.
#[derive(Debug, Clone)]
pub struct StoryGenerator<T> {
    generator: T,
    parser: SceneParser,
}

impl<T: TextGenerator> StoryGenerator<T> {
    /// Create a story generator backed by `generator`.
    pub fn new(generator: T) -> Self {
        Self {
            generator,
            parser: SceneParser::new(),
        }
    }

    /// Generate a story for `summary` with `num_scenes` scenes.
    ///
    /// The parsed story may hold fewer (or more) scenes than requested;
    /// callers must handle zero scenes.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_scenes` is zero, the model call fails, or the
    /// model returns only whitespace.
    #[instrument(skip(self, summary), fields(model = %self.generator.model_name()))]
    pub async fn generate(&self, summary: &str, num_scenes: u32) -> StoryloomResult<Story> {
        if num_scenes == 0 {
            return Err(NarrativeError::new(NarrativeErrorKind::InvalidSceneCount(num_scenes)).into());
        }

        let text = self
            .generator
            .generate_text(&story_prompt(summary, num_scenes))
            .await?;

        if text.trim().is_empty() {
            return Err(NarrativeError::new(NarrativeErrorKind::EmptyStory).into());
        }

        let story = Story::from_text(text, &self.parser);
        if story.scenes.len() != num_scenes as usize {
            warn!(
                requested = num_scenes,
                parsed = story.scenes.len(),
                "Parsed scene count differs from request"
            );
        }
        info!(scenes = story.scenes.len(), "Story generated");
        Ok(story)
    }
}
