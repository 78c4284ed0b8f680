//! Principal-subject extraction from a finished story.

use storyloom_core::{CharacterDescriptor, Extraction};
use storyloom_interface::TextGenerator;
use tracing::{debug, instrument, warn};

const DESCRIPTION_LABEL: &str = "Description:";
const TOKENS_LABEL: &str = "Tokens:";

/// Build the instruction asking a model to describe the story's main subject.
pub fn character_prompt(story: &str) -> String {
    format!(
        "From this story:\n\
         {story}\n\
         \n\
         1. Identify the main character/subject\n\
         2. Provide a detailed visual description\n\
         3. List 3-5 key identifying words (tokens) that define their appearance\n\
         \n\
         Format as:\n\
         Description: [Detailed visual description]\n\
         Tokens: [comma-separated list of identifying words]\n"
    )
}

/// Read the `Description:` and `Tokens:` lines out of a model reply.
///
/// Labels are matched case-sensitively at the start of a line. A missing
/// label leaves the corresponding field empty; if a label repeats, the last
/// occurrence wins. Empty tokens are dropped.
///
/// # Examples
///
/// ```
/// use storyloom_narrative::parse_character_block;
///
/// let reply = "Description: A fox in a red scarf\nTokens: fox, red scarf , amber eyes";
/// let character = parse_character_block(reply);
///
/// assert_eq!(character.description(), "A fox in a red scarf");
/// assert_eq!(character.tokens(), &["fox", "red scarf", "amber eyes"]);
/// ```
pub fn parse_character_block(output: &str) -> CharacterDescriptor {
    let mut description = String::new();
    let mut tokens = Vec::new();

    for line in output.trim().lines() {
        if let Some(rest) = line.strip_prefix(DESCRIPTION_LABEL) {
            description = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(TOKENS_LABEL) {
            tokens = rest
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    CharacterDescriptor::new(description, tokens)
}

/// Asks a text model for the story's principal subject.
///
/// Model failures never propagate: they produce an empty, degraded
/// [`Extraction`] so a book can still be illustrated without a subject.
#[derive(Debug, Clone)]
pub struct CharacterExtractor<T> {
    generator: T,
}

impl<T: TextGenerator> CharacterExtractor<T> {
    /// Create an extractor backed by `generator`.
    pub fn new(generator: T) -> Self {
        Self { generator }
    }

    /// Describe the principal subject of `story` (the full multi-scene text).
    #[instrument(skip_all, fields(story_len = story.len(), model = %self.generator.model_name()))]
    pub async fn extract(&self, story: &str) -> Extraction<CharacterDescriptor> {
        match self.generator.generate_text(&character_prompt(story)).await {
            Ok(output) => {
                let character = parse_character_block(&output);
                if character.is_empty() {
                    warn!("Model reply had no Description or Tokens label");
                }
                debug!(
                    description_len = character.description().len(),
                    tokens = character.tokens().len(),
                    "Extracted character"
                );
                Extraction::complete(character)
            }
            Err(e) => {
                warn!(error = %e, "Character extraction failed, continuing with empty descriptor");
                Extraction::empty_character(e.to_string())
            }
        }
    }
}
