//! Text and image backend integrations for Storyloom.
//!
//! # Available Backends
//!
//! - **Consistory** (NVIDIA) - subject-consistent image generation, implements
//!   [`ImageBackend`](storyloom_interface::ImageBackend)
//! - **Ollama** - local text generation, implements
//!   [`TextGenerator`](storyloom_interface::TextGenerator)
//!
//! # Example
//!
//! ```no_run
//! use storyloom_models::OllamaClient;
//! use storyloom_interface::TextGenerator;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new("llama3.2");
//! let text = client.generate_text("Write a haiku about foxes").await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod consistory;
mod ollama;

pub use consistory::{
    CONSISTORY_API_URL, ConsistoryArtifact, ConsistoryClient, ConsistoryResponse,
    DEFAULT_REQUEST_TIMEOUT,
};
pub use ollama::{DEFAULT_OLLAMA_HOST, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_PORT, OllamaClient};
