//! Test utilities for pipeline tests.
//!
//! Provides a text model that answers story and character prompts
//! separately, and an image backend that records payloads.

use async_trait::async_trait;
use std::sync::Mutex;
use storyloom::{
    BackendArtifact, GenerationPayload, ImageBackend, ImageBackendError, ImageBackendErrorKind,
    ImageBackendResult, TextGenerationError, TextGenerationErrorKind, TextGenerationResult,
    TextGenerator,
};

pub const STORY: &str = "Scene 1:\nA hero stands. [A knight in silver armor]\n\
                         Scene 2:\nShe walks. [The same knight walking through fog]\n\
                         Scene 3:\nShe rests. [The knight asleep under an oak]";

pub const CHARACTER: &str = "Description: A tall knight in dented silver armor\n\
                             Tokens: knight, silver armor, red plume";

/// Text model replying by prompt kind.
#[derive(Debug)]
pub struct StoryModel {
    story: String,
    character: Option<String>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl StoryModel {
    pub fn new(story: &str, character: &str) -> Self {
        Self {
            story: story.to_string(),
            character: Some(character.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Character prompts fail with a transport error.
    pub fn failing_character(story: &str) -> Self {
        Self {
            story: story.to_string(),
            character: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StoryModel {
    async fn generate_text(&self, prompt: &str) -> TextGenerationResult<String> {
        self.calls.lock().unwrap().push(prompt.to_string());

        if prompt.starts_with("From this story:") {
            return self.character.clone().ok_or_else(|| {
                TextGenerationError::new(TextGenerationErrorKind::Transport(
                    "connection refused".to_string(),
                ))
            });
        }
        Ok(self.story.clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-story"
    }
}

/// Image backend returning one artifact per expected scene.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    payloads: Mutex<Vec<GenerationPayload>>,
}

#[allow(dead_code)]
impl RecordingBackend {
    pub fn payloads(&self) -> Vec<GenerationPayload> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageBackend for RecordingBackend {
    async fn call(&self, payload: &GenerationPayload) -> ImageBackendResult<Vec<BackendArtifact>> {
        self.payloads.lock().unwrap().push(payload.clone());
        let count = match payload {
            GenerationPayload::Init(_) => 2,
            GenerationPayload::Extra(_) => 1,
        };
        Ok((0..count)
            .map(|i| BackendArtifact::new(vec![0xFF, 0xD8, i], Some(77)))
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

/// Image backend whose every call fails with a server error.
#[derive(Debug, Default)]
pub struct FailingBackend;

#[async_trait]
impl ImageBackend for FailingBackend {
    async fn call(&self, _payload: &GenerationPayload) -> ImageBackendResult<Vec<BackendArtifact>> {
        Err(ImageBackendError::new(ImageBackendErrorKind::Api {
            status: 503,
            message: "service unavailable".to_string(),
        }))
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }
}
