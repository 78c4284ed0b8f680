//! Narrative error types.

/// Specific error conditions for story generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum NarrativeErrorKind {
    /// Model produced only whitespace
    #[display("No story generated")]
    EmptyStory,
    /// Requested scene count cannot produce a story
    #[display("Invalid scene count: {}", _0)]
    InvalidSceneCount(u32),
    /// Character extraction degraded and the caller asked for a strict result
    #[display("Character extraction degraded: {}", _0)]
    DegradedExtraction(String),
}

/// Error type for narrative operations.
///
/// # Examples
///
/// ```
/// use storyloom_error::{NarrativeError, NarrativeErrorKind};
///
/// let err = NarrativeError::new(NarrativeErrorKind::EmptyStory);
/// assert!(format!("{}", err).contains("No story"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Narrative Error: {} at line {} in {}", kind, line, file)]
pub struct NarrativeError {
    /// The specific error condition
    pub kind: NarrativeErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl NarrativeError {
    /// Create a new NarrativeError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: NarrativeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
