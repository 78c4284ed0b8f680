//! Writing an illustrated book to disk.

use crate::pipeline::IllustratedBook;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use storyloom_core::{ArtifactOrigin, CharacterDescriptor, Extraction, SceneRecord};
use storyloom_error::{IoError, StoryloomResult};
use tracing::{debug, info, instrument};

/// Name of the manifest written next to the images.
pub const MANIFEST_FILE: &str = "book.json";

/// One image entry in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestImage {
    /// Scene this image illustrates
    pub scene_number: u32,
    /// Whether the image was generated or is a placeholder
    pub origin: ArtifactOrigin,
    /// File name relative to the manifest
    pub file: String,
}

/// Contents of `book.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookManifest {
    /// Story text
    pub story_text: String,
    /// Parsed scenes
    pub scenes: Vec<SceneRecord>,
    /// Principal subject with extraction status
    pub character: Extraction<CharacterDescriptor>,
    /// Written images, ascending by scene number
    pub images: Vec<ManifestImage>,
}

/// Writes `scene_<n>.jpg` per image and a `book.json` manifest into `dir`,
/// creating it if needed. Existing files with the same names are replaced.
///
/// # Errors
///
/// Returns an I/O error if the directory or any file cannot be written.
#[instrument(skip(book), fields(dir = %dir.as_ref().display(), images = book.images().len()))]
pub fn write_book(book: &IllustratedBook, dir: impl AsRef<Path>) -> StoryloomResult<BookManifest> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| {
        IoError::new(
            format!("Failed to create output directory: {}", e),
            dir.display().to_string(),
        )
    })?;

    let mut images = Vec::with_capacity(book.images().len());
    for image in book.images() {
        let file = format!("scene_{}.jpg", image.scene_number());
        let path = dir.join(&file);
        fs::write(&path, image.payload()).map_err(|e| {
            IoError::new(
                format!("Failed to write image: {}", e),
                path.display().to_string(),
            )
        })?;
        debug!(file = %file, origin = %image.origin(), "Wrote image");
        images.push(ManifestImage {
            scene_number: *image.scene_number(),
            origin: *image.origin(),
            file,
        });
    }

    let manifest = BookManifest {
        story_text: book.story_text().clone(),
        scenes: book.scenes().clone(),
        character: book.character().clone(),
        images,
    };

    let path = dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&manifest).map_err(|e| {
        IoError::new(
            format!("Failed to serialize manifest: {}", e),
            path.display().to_string(),
        )
    })?;
    fs::write(&path, json).map_err(|e| {
        IoError::new(
            format!("Failed to write manifest: {}", e),
            path.display().to_string(),
        )
    })?;

    info!(images = manifest.images.len(), "Book written");
    Ok(manifest)
}
