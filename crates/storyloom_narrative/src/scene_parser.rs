//! Splits generated story text into ordered scene records.
//!
//! A line starting with `Scene <digits>:` (any case) opens a new scene. The
//! marker's digits are ignored: records are numbered in the order boundaries
//! are encountered, so out-of-order or repeated markers from the model are
//! renumbered rather than trusted.
//!
//! Within a scene, the first `[...]` span is the visual descriptor and is
//! removed from the narrative. Without one, the whole scene text serves as
//! both narrative and descriptor.

use regex::Regex;
use std::sync::LazyLock;
use storyloom_core::SceneRecord;
use tracing::{debug, instrument};

static DEFAULT_PARSER: LazyLock<SceneParser> = LazyLock::new(SceneParser::new);

/// Parse `text` with the default parser.
///
/// Returns an empty vector when the text contains no scene boundary.
pub fn parse_scenes(text: &str) -> Vec<SceneRecord> {
    DEFAULT_PARSER.parse(text)
}

/// Line-oriented scene parser.
#[derive(Debug, Clone)]
pub struct SceneParser {
    boundary: Regex,
    descriptor: Regex,
}

impl Default for SceneParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneParser {
    /// Create a parser with the standard boundary and descriptor patterns.
    pub fn new() -> Self {
        Self {
            boundary: Regex::new(r"(?i)^scene \d+:").expect("Valid scene boundary regex"),
            descriptor: Regex::new(r"\[(.*?)\]").expect("Valid descriptor regex"),
        }
    }

    /// True if `line` (already trimmed) opens a new scene.
    pub fn is_boundary(&self, line: &str) -> bool {
        self.boundary.is_match(line)
    }

    /// Parse `text` into scenes numbered 1, 2, 3, ...
    ///
    /// Blank lines are skipped, text before the first boundary is dropped,
    /// and a boundary with no text before the next boundary yields no record.
    #[instrument(skip_all, fields(text_len = text.len()))]
    pub fn parse(&self, text: &str) -> Vec<SceneRecord> {
        let mut scenes = Vec::new();
        let mut open: Option<Vec<&str>> = None;

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if self.is_boundary(line) {
                if let Some(lines) = open.take() {
                    self.close(&lines, &mut scenes);
                }
                open = Some(Vec::new());
            } else if let Some(lines) = open.as_mut() {
                lines.push(line);
            }
        }

        if let Some(lines) = open {
            self.close(&lines, &mut scenes);
        }

        debug!(scenes = scenes.len(), "Parsed scenes");
        scenes
    }

    fn close(&self, lines: &[&str], scenes: &mut Vec<SceneRecord>) {
        if lines.is_empty() {
            debug!(after = scenes.len(), "Dropping empty scene");
            return;
        }
        let number = scenes.len() as u32 + 1;
        scenes.push(self.split_scene(number, &lines.join(" ")));
    }

    fn split_scene(&self, number: u32, content: &str) -> SceneRecord {
        let Some(captures) = self.descriptor.captures(content) else {
            return SceneRecord::new(number, content.trim(), content);
        };
        let (Some(span), Some(inner)) = (captures.get(0), captures.get(1)) else {
            return SceneRecord::new(number, content.trim(), content);
        };

        let narrative = format!("{}{}", &content[..span.start()], &content[span.end()..])
            .trim()
            .to_string();

        // An empty `[]` carries no imagery; fall back to the prose.
        let descriptor = if inner.as_str().trim().is_empty() {
            narrative.clone()
        } else {
            inner.as_str().to_string()
        };

        SceneRecord::new(number, narrative, descriptor)
    }
}
