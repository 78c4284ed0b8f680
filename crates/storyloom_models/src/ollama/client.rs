//! Ollama text generation client.

use async_trait::async_trait;
use ollama_rs::Ollama;
use ollama_rs::generation::completion::request::GenerationRequest as OllamaRequest;
use storyloom_error::{TextGenerationError, TextGenerationErrorKind, TextGenerationResult};
use storyloom_interface::TextGenerator;
use tracing::{debug, error, info, instrument};

/// Model used when none is configured.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

/// Host of a local Ollama server.
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost";

/// Port of a local Ollama server.
pub const DEFAULT_OLLAMA_PORT: u16 = 11434;

/// Ollama client for local story and character generation.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    /// Ollama client instance
    client: Ollama,

    /// Model name (e.g., "llama3.2", "mistral")
    model_name: String,

    /// Ollama server URL, for logging
    base_url: String,
}

impl OllamaClient {
    /// Create a new Ollama client with default localhost connection.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self::new_with_url(model_name, DEFAULT_OLLAMA_HOST, DEFAULT_OLLAMA_PORT)
    }

    /// Create a new Ollama client for a server at `host:port`.
    #[instrument(name = "ollama_client_new_with_url", skip_all)]
    pub fn new_with_url(model_name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        let model_name = model_name.into();
        let host = host.into();
        let base_url = format!("{}:{}", host, port);

        info!(model = %model_name, url = %base_url, "Creating Ollama client");

        Self {
            client: Ollama::new(host, port),
            model_name,
            base_url,
        }
    }

    /// Server URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    #[instrument(skip(self, prompt), fields(model = %self.model_name, prompt_len = prompt.len()))]
    async fn generate_text(&self, prompt: &str) -> TextGenerationResult<String> {
        debug!("Generating with Ollama");

        let request = OllamaRequest::new(self.model_name.clone(), prompt.to_string());

        let response = self.client.generate(request).await.map_err(|e| {
            error!(error = %e, url = %self.base_url, "Ollama generation failed");
            TextGenerationError::new(TextGenerationErrorKind::Transport(e.to_string()))
        })?;

        debug!(
            response_length = response.response.len(),
            "Received response from Ollama"
        );

        if response.response.trim().is_empty() {
            return Err(TextGenerationError::new(
                TextGenerationErrorKind::EmptyResponse,
            ));
        }

        Ok(response.response)
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
