//! Ollama local model integration.

mod client;

pub use client::{DEFAULT_OLLAMA_HOST, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_PORT, OllamaClient};
