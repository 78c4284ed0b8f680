//! Top-level error wrapper types.

use crate::{
    ConfigError, HttpError, ImageBackendError, IoError, NarrativeError, RenderError,
    TextGenerationError,
};

/// Every error condition a Storyloom operation can surface.
///
/// # Examples
///
/// ```
/// use storyloom_error::{StoryloomError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: StoryloomError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryloomErrorKind {
    /// HTTP client error
    #[from(HttpError)]
    Http(HttpError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Text generation collaborator error
    #[from(TextGenerationError)]
    TextGeneration(TextGenerationError),
    /// Image backend error
    #[from(ImageBackendError)]
    ImageBackend(ImageBackendError),
    /// Narrative error
    #[from(NarrativeError)]
    Narrative(NarrativeError),
    /// Rendering defect
    #[from(RenderError)]
    Render(RenderError),
    /// Filesystem error
    #[from(IoError)]
    Io(IoError),
}

/// Storyloom error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyloom_error::{StoryloomResult, ConfigError};
///
/// fn might_fail() -> StoryloomResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyloom Error: {}", _0)]
pub struct StoryloomError(Box<StoryloomErrorKind>);

impl StoryloomError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryloomErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryloomErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to StoryloomErrorKind
impl<T> From<T> for StoryloomError
where
    T: Into<StoryloomErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyloom operations.
pub type StoryloomResult<T> = std::result::Result<T, StoryloomError>;
