//! Test utilities for batch orchestration tests.
//!
//! Provides a scripted image backend that records every payload it receives.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use storyloom_core::{BackendArtifact, GenerationPayload};
use storyloom_error::{ImageBackendError, ImageBackendErrorKind, ImageBackendResult};
use storyloom_interface::ImageBackend;

/// Seed reported by the mock on its first artifact of every call.
pub const MOCK_SEED: u64 = 424_242;

/// Image backend returning canned artifacts, with scripted failures.
///
/// By default each call returns two artifacts for `init` and one for
/// `extra`, each payload naming the call index (`call-0-0`, `call-0-1`, ...).
#[derive(Debug, Default)]
pub struct MockImageBackend {
    failures: HashMap<usize, ImageBackendErrorKind>,
    artifacts_per_call: Option<usize>,
    report_seed: bool,
    withheld: HashSet<(usize, usize)>,
    payloads: Mutex<Vec<GenerationPayload>>,
}

#[allow(dead_code)]
impl MockImageBackend {
    pub fn new() -> Self {
        Self {
            report_seed: true,
            ..Self::default()
        }
    }

    /// Fail the call at `index` (0-based) with `kind`.
    pub fn failing_at(mut self, index: usize, kind: ImageBackendErrorKind) -> Self {
        self.failures.insert(index, kind);
        self
    }

    /// Return exactly `count` artifacts from every call.
    pub fn with_artifacts_per_call(mut self, count: usize) -> Self {
        self.artifacts_per_call = Some(count);
        self
    }

    /// Omit seeds from returned artifacts.
    pub fn without_seed(mut self) -> Self {
        self.report_seed = false;
        self
    }

    /// Return the artifact at `position` of call `index` without image data,
    /// as a content-filtered entry would be.
    pub fn withholding(mut self, index: usize, position: usize) -> Self {
        self.withheld.insert((index, position));
        self
    }

    pub fn call_count(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }

    pub fn payloads(&self) -> Vec<GenerationPayload> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageBackend for MockImageBackend {
    async fn call(&self, payload: &GenerationPayload) -> ImageBackendResult<Vec<BackendArtifact>> {
        let index = {
            let mut payloads = self.payloads.lock().unwrap();
            payloads.push(payload.clone());
            payloads.len() - 1
        };

        if let Some(kind) = self.failures.get(&index) {
            return Err(ImageBackendError::new(kind.clone()));
        }

        let count = self.artifacts_per_call.unwrap_or(match payload {
            GenerationPayload::Init(_) => 2,
            GenerationPayload::Extra(_) => 1,
        });

        Ok((0..count)
            .map(|i| {
                let seed = (self.report_seed && i == 0).then_some(MOCK_SEED);
                if self.withheld.contains(&(index, i)) {
                    BackendArtifact::withheld(seed)
                } else {
                    BackendArtifact::new(format!("call-{index}-{i}").into_bytes(), seed)
                }
            })
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
