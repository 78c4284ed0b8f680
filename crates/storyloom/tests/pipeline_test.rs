//! End-to-end pipeline tests with mock collaborators.

mod test_utils;

use std::sync::Arc;
use storyloom::{
    ArtifactOrigin, BatchSettings, BookPipeline, ConsistentBatchOrchestrator, GenerationPayload,
    IllustrationConfig, StoryloomConfig, StoryloomErrorKind,
};
use test_utils::{CHARACTER, RecordingBackend, STORY, StoryModel};

const STYLE: &str = "A watercolor illustration";

fn pipeline(model: StoryModel, backend: &Arc<RecordingBackend>) -> BookPipeline<StoryModel> {
    let orchestrator =
        ConsistentBatchOrchestrator::with_backend(backend.clone(), BatchSettings::immediate());
    BookPipeline::new(model, orchestrator, STYLE)
}

#[tokio::test]
async fn test_full_book_uses_extracted_character() -> anyhow::Result<()> {
    let backend = Arc::new(RecordingBackend::default());
    let pipeline = pipeline(StoryModel::new(STORY, CHARACTER), &backend);

    let book = pipeline.illustrate("A knight crosses a foggy moor", 3).await?;

    assert_eq!(book.scenes().len(), 3);
    assert_eq!(book.images().len(), 3);
    assert!(!book.has_placeholders());
    assert!(!book.character().is_degraded());

    let payloads = backend.payloads();
    assert_eq!(payloads.len(), 2);
    let GenerationPayload::Init(init) = &payloads[0] else {
        anyhow::bail!("first call should be init");
    };
    assert_eq!(init.subject_prompt, "A tall knight in dented silver armor");
    assert_eq!(init.subject_tokens, vec!["knight", "silver armor", "red plume"]);
    assert_eq!(init.style_prompt, STYLE);
    assert_eq!(init.scene_prompt1, "A knight in silver armor");
    Ok(())
}

#[tokio::test]
async fn test_degraded_character_uses_first_scene() -> anyhow::Result<()> {
    let backend = Arc::new(RecordingBackend::default());
    let pipeline = pipeline(StoryModel::failing_character(STORY), &backend);

    let book = pipeline.illustrate("A knight crosses a foggy moor", 3).await?;

    assert!(book.character().is_degraded());
    assert_eq!(book.images().len(), 3);

    let GenerationPayload::Init(init) = &backend.payloads()[0] else {
        anyhow::bail!("first call should be init");
    };
    assert_eq!(init.subject_prompt, "A knight in silver armor");
    assert!(init.subject_tokens.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_story_without_scenes_skips_illustration() -> anyhow::Result<()> {
    let backend = Arc::new(RecordingBackend::default());
    let model = StoryModel::new("Once upon a time there was no structure at all.", CHARACTER);
    let pipeline = pipeline(model, &backend);

    let book = pipeline.illustrate("A shapeless tale", 3).await?;

    assert!(book.scenes().is_empty());
    assert!(book.images().is_empty());
    assert!(backend.payloads().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_story_and_character_prompts_share_model() -> anyhow::Result<()> {
    let backend = Arc::new(RecordingBackend::default());
    let model = StoryModel::new(STORY, CHARACTER);
    let orchestrator =
        ConsistentBatchOrchestrator::with_backend(backend.clone(), BatchSettings::immediate());
    let model = Arc::new(model);
    let pipeline = BookPipeline::new(model.clone(), orchestrator, STYLE);

    pipeline.illustrate("A knight crosses a foggy moor", 3).await?;

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("A knight crosses a foggy moor"));
    assert!(prompts[1].starts_with("From this story:"));
    assert!(prompts[1].contains("The same knight walking through fog"));
    Ok(())
}

#[tokio::test]
async fn test_zero_scene_request_is_rejected() {
    let backend = Arc::new(RecordingBackend::default());
    let pipeline = pipeline(StoryModel::new(STORY, CHARACTER), &backend);

    let err = pipeline
        .illustrate("A knight crosses a foggy moor", 0)
        .await
        .expect_err("zero scenes should be rejected");

    assert!(matches!(err.kind(), StoryloomErrorKind::Narrative(_)));
    assert!(backend.payloads().is_empty());
}

#[tokio::test]
async fn test_offline_config_builds_offline_pipeline() -> anyhow::Result<()> {
    let config = StoryloomConfig {
        illustration: IllustrationConfig::offline(),
        ..StoryloomConfig::default()
    };
    let pipeline = BookPipeline::from_config(StoryModel::new(STORY, CHARACTER), &config)?;

    let book = pipeline.illustrate("A knight crosses a foggy moor", 3).await?;

    assert_eq!(pipeline.style_prompt(), "A detailed digital artwork");
    assert!(
        book.images()
            .iter()
            .all(|image| *image.origin() == ArtifactOrigin::Generated)
    );
    Ok(())
}

#[test]
fn test_external_config_without_key_fails() {
    let err = BookPipeline::from_config(StoryModel::new(STORY, CHARACTER), &StoryloomConfig::default())
        .err()
        .expect("missing key should be rejected");
    assert!(matches!(err.kind(), StoryloomErrorKind::Config(_)));
}
