//! Image backend error types and retry classification.

/// Image backend error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ImageBackendErrorKind {
    /// Request could not be sent or the connection dropped
    #[display("Image backend request failed: {}", _0)]
    Http(String),
    /// Request exceeded the configured timeout
    #[display("Image backend request timed out after {}s", _0)]
    Timeout(u64),
    /// Backend answered with a non-2xx status
    #[display("HTTP {} error: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },
    /// Response body was not the expected JSON shape
    #[display("Malformed image backend response: {}", _0)]
    MalformedResponse(String),
    /// Artifact payload was not valid base64
    #[display("Base64 decode error: {}", _0)]
    Decode(String),
}

impl ImageBackendErrorKind {
    /// Check if this error type should be retried: transport failures,
    /// timeouts, 429 and any 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            ImageBackendErrorKind::Http(_) => true,
            ImageBackendErrorKind::Timeout(_) => true,
            ImageBackendErrorKind::Api { status, .. } => {
                matches!(*status, 429 | 500..=599)
            }
            _ => false,
        }
    }
}

/// Image backend error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyloom_error::{ImageBackendError, ImageBackendErrorKind};
///
/// let err = ImageBackendError::new(ImageBackendErrorKind::Api {
///     status: 503,
///     message: "Service unavailable".to_string(),
/// });
/// assert!(err.is_retryable());
/// assert!(format!("{}", err).contains("503"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Image Backend Error: {} at line {} in {}", kind, line, file)]
pub struct ImageBackendError {
    /// The kind of error that occurred
    pub kind: ImageBackendErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ImageBackendError {
    /// Create a new ImageBackendError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ImageBackendErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Returns true if a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Result type for image backend calls.
pub type ImageBackendResult<T> = Result<T, ImageBackendError>;
