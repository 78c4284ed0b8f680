//! Command handlers.

use std::fs;
use std::path::{Path, PathBuf};
use storyloom::{
    BookPipeline, GenerationBackendMode, IoError, PlaceholderRenderer, StoryloomConfig,
    StoryloomResult, parse_scenes, write_book,
};
use tracing::{info, instrument};

/// Options for the `illustrate` command.
#[derive(Debug, Clone)]
pub struct IllustrateOptions {
    /// Story summary
    pub summary: String,
    /// Requested scene count
    pub scenes: u32,
    /// Style override
    pub style: Option<String>,
    /// Force offline rendering
    pub offline: bool,
    /// Output directory
    pub out: PathBuf,
    /// Explicit configuration file
    pub config: Option<PathBuf>,
}

/// Parse `path` and print its scenes as JSON on stdout.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn parse_file(path: &Path) -> StoryloomResult<()> {
    let text = fs::read_to_string(path).map_err(|e| {
        IoError::new(
            format!("Failed to read narrative: {}", e),
            path.display().to_string(),
        )
    })?;

    let scenes = parse_scenes(&text);
    info!(scenes = scenes.len(), "Parsed narrative");

    let json = serde_json::to_string_pretty(&scenes).map_err(|e| {
        IoError::new(
            format!("Failed to serialize scenes: {}", e),
            path.display().to_string(),
        )
    })?;
    println!("{}", json);
    Ok(())
}

/// Run the full pipeline and write the book to `options.out`.
#[instrument(skip(options), fields(scenes = options.scenes, offline = options.offline))]
pub async fn illustrate(options: IllustrateOptions) -> StoryloomResult<()> {
    let mut config = match &options.config {
        Some(path) => StoryloomConfig::from_file(path)?,
        None => StoryloomConfig::load()?,
    };
    if options.offline {
        config.illustration.mode = GenerationBackendMode::Offline;
    }
    if let Some(style) = options.style {
        config.book.style_prompt = style;
    }

    let pipeline = BookPipeline::from_config(config.text.client(), &config)?;
    let book = pipeline.illustrate(&options.summary, options.scenes).await?;
    let manifest = write_book(&book, &options.out)?;

    let placeholders = manifest
        .images
        .iter()
        .filter(|image| image.origin == storyloom::ArtifactOrigin::Placeholder)
        .count();
    println!(
        "Wrote {} scene image(s) to {} ({} placeholder)",
        manifest.images.len(),
        options.out.display(),
        placeholders
    );
    if book.character().is_degraded() {
        println!("Character extraction degraded; subject taken from the first scene");
    }
    Ok(())
}

/// Render one placeholder JPEG to `out`.
#[instrument(skip(out), fields(out = %out.display()))]
pub fn render_placeholder(scene: u32, label: Option<&str>, out: &Path) -> StoryloomResult<()> {
    let renderer = PlaceholderRenderer::new();
    let bytes = match label {
        Some(label) => renderer.try_render(scene, label)?,
        None => renderer.try_render(scene, storyloom::FAILURE_LABEL)?,
    };

    fs::write(out, bytes).map_err(|e| {
        IoError::new(
            format!("Failed to write placeholder: {}", e),
            out.display().to_string(),
        )
    })?;
    info!("Placeholder written");
    Ok(())
}
