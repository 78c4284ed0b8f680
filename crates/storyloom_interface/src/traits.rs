//! Trait definitions for text and image backends.

use async_trait::async_trait;
use std::sync::Arc;
use storyloom_core::{BackendArtifact, GenerationPayload};
use storyloom_error::{ImageBackendResult, TextGenerationResult};

/// A model that turns a free-form instruction into free-form text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`.
    async fn generate_text(&self, prompt: &str) -> TextGenerationResult<String>;

    /// Provider name (e.g., "ollama").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "llama3.2").
    fn model_name(&self) -> &str;
}

/// A backend that renders images while holding a subject identity fixed
/// through a shared seed.
///
/// Implementations issue exactly one outbound request per call and never
/// retry; retry policy belongs to the caller.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// Issue one generation call. The mode is carried by the payload.
    ///
    /// Returns the artifacts in the order the backend produced them; the
    /// sequence may be empty.
    async fn call(&self, payload: &GenerationPayload) -> ImageBackendResult<Vec<BackendArtifact>>;

    /// Provider name (e.g., "consistory").
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    async fn generate_text(&self, prompt: &str) -> TextGenerationResult<String> {
        (**self).generate_text(prompt).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T: ImageBackend + ?Sized> ImageBackend for Arc<T> {
    async fn call(&self, payload: &GenerationPayload) -> ImageBackendResult<Vec<BackendArtifact>> {
        (**self).call(payload).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
