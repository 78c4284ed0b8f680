//! End-to-end book generation.

use crate::config::StoryloomConfig;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storyloom_core::{CharacterDescriptor, Extraction, ImageArtifact, SceneRecord};
use storyloom_error::StoryloomResult;
use storyloom_illustration::ConsistentBatchOrchestrator;
use storyloom_interface::TextGenerator;
use storyloom_narrative::{CharacterExtractor, Story, StoryGenerator};
use tracing::{debug, info, instrument};

/// A story with its scenes, subject and one image per scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct IllustratedBook {
    /// Story text as the model wrote it
    story_text: String,
    /// Parsed scenes, in order
    scenes: Vec<SceneRecord>,
    /// Principal subject, possibly degraded
    character: Extraction<CharacterDescriptor>,
    /// One image per scene, ascending by scene number
    images: Vec<ImageArtifact>,
}

impl IllustratedBook {
    /// Whether any scene fell back to a placeholder.
    pub fn has_placeholders(&self) -> bool {
        self.images.iter().any(ImageArtifact::is_placeholder)
    }
}

/// Story generation, scene parsing, character extraction and batch
/// illustration composed into one call.
///
/// The same text model writes the story and extracts the character.
pub struct BookPipeline<T> {
    stories: StoryGenerator<Arc<T>>,
    characters: CharacterExtractor<Arc<T>>,
    orchestrator: ConsistentBatchOrchestrator,
    style_prompt: String,
}

impl<T: TextGenerator> BookPipeline<T> {
    /// Pipeline over `generator` and `orchestrator`.
    pub fn new(
        generator: T,
        orchestrator: ConsistentBatchOrchestrator,
        style_prompt: impl Into<String>,
    ) -> Self {
        let generator = Arc::new(generator);
        Self {
            stories: StoryGenerator::new(generator.clone()),
            characters: CharacterExtractor::new(generator),
            orchestrator,
            style_prompt: style_prompt.into(),
        }
    }

    /// Pipeline using the illustration and book settings from `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if external illustration mode has no
    /// API key.
    pub fn from_config(generator: T, config: &StoryloomConfig) -> StoryloomResult<Self> {
        let orchestrator = ConsistentBatchOrchestrator::from_config(&config.illustration)?;
        Ok(Self::new(generator, orchestrator, &config.book.style_prompt))
    }

    /// Style prompt applied to every image.
    pub fn style_prompt(&self) -> &str {
        &self.style_prompt
    }

    /// Write a story about `summary` with `num_scenes` scenes and illustrate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the story cannot be written. Image generation
    /// failures never error; they show up as placeholder images.
    #[instrument(skip(self, summary), fields(summary_len = summary.len()))]
    pub async fn illustrate(&self, summary: &str, num_scenes: u32) -> StoryloomResult<IllustratedBook> {
        let story = self.stories.generate(summary, num_scenes).await?;
        Ok(self.illustrate_story(story).await)
    }

    /// Illustrate an already written story.
    #[instrument(skip_all, fields(scenes = story.scenes().len()))]
    pub async fn illustrate_story(&self, story: Story) -> IllustratedBook {
        let character = self.characters.extract(story.text()).await;
        let (story_text, scenes) = story.into_parts();

        let images = if scenes.is_empty() {
            debug!("Story has no scenes, skipping illustration");
            Vec::new()
        } else {
            let subject_prompt = subject_prompt(&character, &scenes);
            self.orchestrator
                .generate_batch(
                    &subject_prompt,
                    character.value().tokens(),
                    &scenes,
                    &self.style_prompt,
                )
                .await
        };

        info!(
            scenes = scenes.len(),
            images = images.len(),
            degraded_character = character.is_degraded(),
            "Book illustrated"
        );

        IllustratedBook {
            story_text,
            scenes,
            character,
            images,
        }
    }
}

/// Extracted description, or scene 1's descriptor when extraction degraded
/// or came back blank.
fn subject_prompt(character: &Extraction<CharacterDescriptor>, scenes: &[SceneRecord]) -> String {
    let description = character.value().description().trim();
    if !character.is_degraded() && !description.is_empty() {
        return description.to_string();
    }
    debug!("Using first scene descriptor as subject prompt");
    scenes
        .first()
        .map(|scene| scene.visual_descriptor().clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenes() -> Vec<SceneRecord> {
        vec![SceneRecord::new(1, "A hero stands.", "A knight in silver armor")]
    }

    #[test]
    fn subject_prompt_prefers_description() {
        let character = Extraction::complete(CharacterDescriptor::new(
            "A tall knight with a scarred cheek",
            vec!["knight".to_string()],
        ));
        assert_eq!(
            subject_prompt(&character, &scenes()),
            "A tall knight with a scarred cheek"
        );
    }

    #[test]
    fn subject_prompt_falls_back_when_degraded() {
        let character = Extraction::empty_character("model offline");
        assert_eq!(subject_prompt(&character, &scenes()), "A knight in silver armor");
    }

    #[test]
    fn subject_prompt_falls_back_when_blank() {
        let character = Extraction::complete(CharacterDescriptor::default());
        assert_eq!(subject_prompt(&character, &scenes()), "A knight in silver armor");
    }
}
