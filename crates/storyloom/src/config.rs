//! Layered application configuration.
//!
//! Sources in order of precedence (later sources override earlier):
//! 1. Bundled defaults (`storyloom.toml` shipped with the binary)
//! 2. `~/.config/storyloom/storyloom.toml`
//! 3. `./storyloom.toml`
//! 4. Environment variables prefixed `STORYLOOM_`, with `__` between
//!    table and key (e.g. `STORYLOOM_ILLUSTRATION__API_KEY`)

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use storyloom_error::{ConfigError, StoryloomError, StoryloomResult};
use storyloom_illustration::IllustrationConfig;
use storyloom_models::{DEFAULT_OLLAMA_HOST, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_PORT, OllamaClient};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../storyloom.toml");

/// Default art style applied to every image in a book.
pub const DEFAULT_STYLE_PROMPT: &str = "A detailed digital artwork";

/// Text model used for story writing and character extraction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TextModelConfig {
    /// Ollama model name
    pub model: String,
    /// Ollama host, including scheme
    pub host: String,
    /// Ollama port
    pub port: u16,
}

impl Default for TextModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            host: DEFAULT_OLLAMA_HOST.to_string(),
            port: DEFAULT_OLLAMA_PORT,
        }
    }
}

impl TextModelConfig {
    /// Client for the configured model.
    pub fn client(&self) -> OllamaClient {
        OllamaClient::new_with_url(&self.model, &self.host, self.port)
    }
}

/// Book-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BookConfig {
    /// Art style prompt shared by all scenes
    pub style_prompt: String,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            style_prompt: DEFAULT_STYLE_PROMPT.to_string(),
        }
    }
}

/// Top-level Storyloom configuration.
///
/// # Example
///
/// ```no_run
/// use storyloom::StoryloomConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StoryloomConfig::load()?;
/// println!("Illustration mode: {}", config.illustration.mode);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct StoryloomConfig {
    /// Image generation settings
    #[serde(default)]
    pub illustration: IllustrationConfig,

    /// Text model settings
    #[serde(default)]
    pub text: TextModelConfig,

    /// Book settings
    #[serde(default)]
    pub book: BookConfig,
}

impl StoryloomConfig {
    /// Load configuration from a specific file path.
    ///
    /// Keys missing from the file take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StoryloomResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
            .build()
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration from all layered sources.
    ///
    /// User config files are optional and skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if any present source fails to parse.
    #[instrument]
    pub fn load() -> StoryloomResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyloom/storyloom.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("storyloom").required(false))
            .add_source(
                Environment::with_prefix("STORYLOOM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder
            .build()
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Bundled defaults only, ignoring user files and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file fails to parse.
    pub fn bundled() -> StoryloomResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!(
                    "Failed to parse bundled configuration: {}",
                    e
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyloom_illustration::GenerationBackendMode;

    #[test]
    fn bundled_matches_defaults() {
        let bundled = StoryloomConfig::bundled().unwrap();
        assert_eq!(bundled, StoryloomConfig::default());
    }

    #[test]
    fn bundled_has_no_api_key() {
        let bundled = StoryloomConfig::bundled().unwrap();
        assert_eq!(bundled.illustration.mode, GenerationBackendMode::External);
        assert!(bundled.illustration.api_key().is_none());
        assert_eq!(bundled.book.style_prompt, DEFAULT_STYLE_PROMPT);
    }

    #[test]
    fn text_client_uses_configured_url() {
        let text = TextModelConfig {
            model: "mistral".to_string(),
            host: "http://models.local".to_string(),
            port: 8080,
        };
        let client = text.client();
        assert_eq!(client.base_url(), "http://models.local:8080");
    }
}
