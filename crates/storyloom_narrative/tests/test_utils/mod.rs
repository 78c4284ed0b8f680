//! Test utilities for narrative tests.
//!
//! Provides a scripted text generator that records the prompts it receives.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use storyloom_error::{TextGenerationError, TextGenerationErrorKind, TextGenerationResult};
use storyloom_interface::TextGenerator;

/// Scripted reply for one call.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text
    Text(String),
    /// Fail with this error kind
    Error(TextGenerationErrorKind),
}

/// Text generator that replays scripted replies in order.
///
/// Once the script runs out, the last reply repeats.
#[derive(Debug)]
pub struct MockTextGenerator {
    replies: Mutex<VecDeque<MockReply>>,
    last: Mutex<Option<MockReply>>,
    prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockTextGenerator {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn new_success(text: &str) -> Self {
        Self::new(vec![MockReply::Text(text.to_string())])
    }

    pub fn new_error(kind: TextGenerationErrorKind) -> Self {
        Self::new(vec![MockReply::Error(kind)])
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate_text(&self, prompt: &str) -> TextGenerationResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            let mut last = self.last.lock().unwrap();
            if let Some(next) = replies.pop_front() {
                *last = Some(next.clone());
            }
            last.clone()
        };

        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Error(kind)) => Err(TextGenerationError::new(kind)),
            None => Err(TextGenerationError::new(TextGenerationErrorKind::EmptyResponse)),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
