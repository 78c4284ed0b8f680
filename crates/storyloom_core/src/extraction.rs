//! Best-effort results that carry their own degradation status.

use crate::CharacterDescriptor;
use serde::{Deserialize, Serialize};
use storyloom_error::{NarrativeError, NarrativeErrorKind};

/// Whether an extraction produced a trustworthy value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionStatus {
    /// The collaborator answered and the value was parsed from its output
    Complete,
    /// The collaborator failed; the value is an empty fallback
    Degraded {
        /// Why the extraction fell back
        reason: String,
    },
}

/// A value paired with the status of the operation that produced it.
///
/// Lets callers keep going with a fallback value or, via
/// [`Extraction::into_result`], treat degradation as fatal.
///
/// # Examples
///
/// ```
/// use storyloom_core::{CharacterDescriptor, Extraction};
///
/// let degraded = Extraction::degraded(CharacterDescriptor::default(), "model offline");
/// assert!(degraded.is_degraded());
/// assert!(degraded.into_result().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction<T> {
    value: T,
    status: ExtractionStatus,
}

impl<T> Extraction<T> {
    /// Wrap a value produced without trouble.
    pub fn complete(value: T) -> Self {
        Self {
            value,
            status: ExtractionStatus::Complete,
        }
    }

    /// Wrap a fallback value and the reason it was needed.
    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Self {
            value,
            status: ExtractionStatus::Degraded {
                reason: reason.into(),
            },
        }
    }

    /// Borrow the value regardless of status.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Status of the extraction.
    pub fn status(&self) -> &ExtractionStatus {
        &self.status
    }

    /// True when the value is a fallback.
    pub fn is_degraded(&self) -> bool {
        matches!(self.status, ExtractionStatus::Degraded { .. })
    }

    /// Take the value regardless of status.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Take the value, failing if the extraction was degraded.
    #[track_caller]
    pub fn into_result(self) -> Result<T, NarrativeError> {
        match self.status {
            ExtractionStatus::Complete => Ok(self.value),
            ExtractionStatus::Degraded { reason } => Err(NarrativeError::new(
                NarrativeErrorKind::DegradedExtraction(reason),
            )),
        }
    }
}

impl Extraction<CharacterDescriptor> {
    /// Convenience for the empty degraded descriptor.
    pub fn empty_character(reason: impl Into<String>) -> Self {
        Self::degraded(CharacterDescriptor::default(), reason)
    }
}
