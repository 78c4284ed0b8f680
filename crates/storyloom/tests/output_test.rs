//! Tests for writing books to disk.

mod test_utils;

use std::sync::Arc;
use storyloom::{
    ArtifactOrigin, BatchSettings, BookManifest, BookPipeline, ConsistentBatchOrchestrator,
    MANIFEST_FILE, write_book,
};
use test_utils::{CHARACTER, FailingBackend, STORY, StoryModel};

#[tokio::test]
async fn test_write_book_creates_images_and_manifest() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("nested").join("book");
    let pipeline = BookPipeline::new(
        StoryModel::new(STORY, CHARACTER),
        ConsistentBatchOrchestrator::offline(),
        "A detailed digital artwork",
    );

    let book = pipeline.illustrate("A knight crosses a foggy moor", 3).await?;
    let manifest = write_book(&book, &out)?;

    for n in 1..=3 {
        let bytes = std::fs::read(out.join(format!("scene_{n}.jpg")))?;
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    let written: BookManifest = serde_json::from_str(&std::fs::read_to_string(out.join(MANIFEST_FILE))?)?;
    assert_eq!(written, manifest);
    assert_eq!(written.scenes.len(), 3);
    assert_eq!(written.images[2].file, "scene_3.jpg");
    assert_eq!(written.images[0].origin, ArtifactOrigin::Generated);
    assert_eq!(
        written.character.value().description(),
        "A tall knight in dented silver armor"
    );
    Ok(())
}

#[tokio::test]
async fn test_manifest_records_placeholders() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let pipeline = BookPipeline::new(
        StoryModel::new(STORY, CHARACTER),
        ConsistentBatchOrchestrator::with_backend(
            Arc::new(FailingBackend),
            BatchSettings::immediate(),
        ),
        "A detailed digital artwork",
    );

    let book = pipeline.illustrate("A knight crosses a foggy moor", 3).await?;
    let manifest = write_book(&book, dir.path())?;

    assert_eq!(manifest.images.len(), 3);
    assert!(
        manifest
            .images
            .iter()
            .all(|image| image.origin == ArtifactOrigin::Placeholder)
    );
    let bytes = std::fs::read(dir.path().join("scene_2.jpg"))?;
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    Ok(())
}

#[test]
fn test_write_book_into_file_path_fails() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"occupied")?;

    let book_json = serde_json::json!({
        "story_text": "Scene 1:\nAlone. [A lone knight]",
        "scenes": [{"number": 1, "narrative": "Alone.", "scene_description": "A lone knight"}],
        "character": {"value": {"description": "", "tokens": []}, "status": {"status": "complete"}},
        "images": [],
    });
    let book: storyloom::IllustratedBook = serde_json::from_value(book_json)?;

    let err = write_book(&book, blocker.join("book")).expect_err("cannot nest under a file");
    assert!(matches!(err.kind(), storyloom::StoryloomErrorKind::Io(_)));
    Ok(())
}
