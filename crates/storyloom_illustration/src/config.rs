//! Illustration settings.
//!
//! Loaded as the `[illustration]` table of `storyloom.toml`:
//!
//! ```toml
//! [illustration]
//! mode = "external"
//! api_key = "nvapi-..."
//! request_timeout_secs = 120
//! inter_call_delay_ms = 2000
//! max_retries = 1
//! retry_backoff_ms = 1000
//! ```

use serde::{Deserialize, Serialize};
use storyloom_models::CONSISTORY_API_URL;

/// Where batch images come from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GenerationBackendMode {
    /// Call the hosted consistent-subject backend
    #[default]
    External,
    /// Render local scene cards, no network access
    Offline,
}

/// Configuration for building a [`ConsistentBatchOrchestrator`](crate::ConsistentBatchOrchestrator).
///
/// Missing fields take their defaults.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IllustrationConfig {
    /// Backend mode
    pub mode: GenerationBackendMode,

    /// Credential for the external backend; required in external mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Backend endpoint URL
    pub endpoint: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Pause between successive `extra` calls, in milliseconds
    pub inter_call_delay_ms: u64,

    /// Retries per backend call after the first attempt
    pub max_retries: usize,

    /// Wait before the first retry, in milliseconds; doubles per retry up to 30s
    pub retry_backoff_ms: u64,
}

impl Default for IllustrationConfig {
    fn default() -> Self {
        Self {
            mode: GenerationBackendMode::External,
            api_key: None,
            endpoint: CONSISTORY_API_URL.to_string(),
            request_timeout_secs: 120,
            inter_call_delay_ms: 2000,
            max_retries: 1,
            retry_backoff_ms: 1000,
        }
    }
}

impl std::fmt::Debug for IllustrationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IllustrationConfig")
            .field("mode", &self.mode)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("inter_call_delay_ms", &self.inter_call_delay_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .finish()
    }
}

impl IllustrationConfig {
    /// Offline configuration with default timings.
    pub fn offline() -> Self {
        Self {
            mode: GenerationBackendMode::Offline,
            ..Self::default()
        }
    }

    /// External configuration using `api_key`.
    pub fn external(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// API key if present and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
