//! Consistory API client.

use crate::consistory::ConsistoryResponse;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::Client;
use std::time::Duration;
use storyloom_core::{BackendArtifact, GenerationPayload};
use storyloom_error::{
    HttpError, ImageBackendError, ImageBackendErrorKind, ImageBackendResult, StoryloomResult,
};
use storyloom_interface::ImageBackend;
use tracing::{debug, error, instrument, warn};

/// Hosted Consistory endpoint.
pub const CONSISTORY_API_URL: &str = "https://ai.api.nvidia.com/v1/genai/nvidia/consistory";

/// Per-request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Consistory API client.
///
/// Issues exactly one request per [`ImageBackend::call`]; it never retries.
#[derive(Debug, Clone)]
pub struct ConsistoryClient {
    client: Client,
    api_key: String,
    endpoint: String,
    timeout: Duration,
}

impl ConsistoryClient {
    /// Creates a client for the hosted endpoint with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(api_key: impl Into<String>) -> StoryloomResult<Self> {
        Self::with_endpoint(api_key, CONSISTORY_API_URL, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates a client for `endpoint` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip(api_key), fields(endpoint = %endpoint.as_ref()))]
    pub fn with_endpoint(
        api_key: impl Into<String>,
        endpoint: impl AsRef<str>,
        timeout: Duration,
    ) -> StoryloomResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        debug!(timeout_secs = timeout.as_secs(), "Created Consistory client");

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: endpoint.as_ref().to_string(),
            timeout,
        })
    }

    /// Endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, e: reqwest::Error) -> ImageBackendError {
        if e.is_timeout() {
            ImageBackendError::new(ImageBackendErrorKind::Timeout(self.timeout.as_secs()))
        } else {
            ImageBackendError::new(ImageBackendErrorKind::Http(format!(
                "Request failed: {}",
                e
            )))
        }
    }

    /// Decodes every wire artifact in order. Entries without image data stay
    /// in place as withheld artifacts so positions keep matching scenes.
    fn decode(response: ConsistoryResponse) -> ImageBackendResult<Vec<BackendArtifact>> {
        let mut artifacts = Vec::with_capacity(response.artifacts.len());
        for (position, artifact) in response.artifacts.into_iter().enumerate() {
            let Some(encoded) = artifact.base64 else {
                warn!(
                    position,
                    finish_reason = ?artifact.finish_reason,
                    "Artifact has no image data"
                );
                artifacts.push(BackendArtifact::withheld(artifact.seed));
                continue;
            };
            let bytes = STANDARD.decode(encoded.as_bytes()).map_err(|e| {
                ImageBackendError::new(ImageBackendErrorKind::Decode(e.to_string()))
            })?;
            artifacts.push(BackendArtifact::new(bytes, artifact.seed));
        }
        Ok(artifacts)
    }
}

#[async_trait]
impl ImageBackend for ConsistoryClient {
    #[instrument(skip(self, payload), fields(mode = %payload.mode(), subject_seed = payload.subject_seed()))]
    async fn call(&self, payload: &GenerationPayload) -> ImageBackendResult<Vec<BackendArtifact>> {
        debug!(endpoint = %self.endpoint, "Sending Consistory request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                self.transport_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, body = %message, "Consistory API returned error");
            return Err(ImageBackendError::new(ImageBackendErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let body = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read response");
            self.transport_error(e)
        })?;

        let parsed: ConsistoryResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = ?e, "Failed to parse Consistory response");
            ImageBackendError::new(ImageBackendErrorKind::MalformedResponse(e.to_string()))
        })?;

        let artifacts = Self::decode(parsed)?;
        debug!(artifacts = artifacts.len(), "Received Consistory artifacts");
        Ok(artifacts)
    }

    fn provider_name(&self) -> &'static str {
        "consistory"
    }
}
