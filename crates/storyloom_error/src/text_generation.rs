//! Text generation error types.

/// Text generation error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum TextGenerationErrorKind {
    /// Model server unreachable or the request failed in transit
    #[display("Text generation transport failed: {}", _0)]
    Transport(String),
    /// Model server answered with an error status
    #[display("HTTP {} error: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },
    /// Model returned no text
    #[display("Text generation returned an empty response")]
    EmptyResponse,
}

/// Text generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyloom_error::{TextGenerationError, TextGenerationErrorKind};
///
/// let err = TextGenerationError::new(TextGenerationErrorKind::EmptyResponse);
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Text Generation Error: {} at line {} in {}", kind, line, file)]
pub struct TextGenerationError {
    /// The kind of error that occurred
    pub kind: TextGenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TextGenerationError {
    /// Create a new TextGenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TextGenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for text generation calls.
pub type TextGenerationResult<T> = Result<T, TextGenerationError>;
