//! Narrative processing for Storyloom.
//!
//! Turns model-generated prose into structured scenes and pulls a
//! description of the principal subject out of a finished story.
//!
//! # Features
//!
//! - **Scene parsing**: `Scene N:` boundaries, bracketed visual descriptors
//! - **Character extraction**: labeled `Description:` / `Tokens:` blocks, degrading
//!   to an empty descriptor when the model is unavailable
//! - **Story generation**: prompt assembly for a fixed number of scenes
//!
//! # Example
//!
//! ```
//! use storyloom_narrative::parse_scenes;
//!
//! let text = "Scene 1:\nA hero stands. [A knight in silver armor]\n\
//!             Scene 2:\nShe walks. [The same knight walking through fog]";
//! let scenes = parse_scenes(text);
//!
//! assert_eq!(scenes.len(), 2);
//! assert_eq!(scenes[0].narrative(), "A hero stands.");
//! assert_eq!(scenes[1].visual_descriptor(), "The same knight walking through fog");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod character;
mod scene_parser;
mod story;

pub use character::{CharacterExtractor, character_prompt, parse_character_block};
pub use scene_parser::{SceneParser, parse_scenes};
pub use story::{Story, StoryGenerator, story_prompt};
