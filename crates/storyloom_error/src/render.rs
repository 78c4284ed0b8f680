//! Rendering error types.

/// Canvas or encoding failure while rendering a stand-in image.
///
/// Rendering operates on fixed-size in-memory canvases, so this error
/// indicates a programming defect rather than a recoverable condition.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Render Error: {} at line {} in {}", message, line, file)]
pub struct RenderError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl RenderError {
    /// Create a new RenderError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
