//! Per-batch bookkeeping.

use std::collections::BTreeMap;
use storyloom_core::ImageArtifact;
use storyloom_render::PlaceholderRenderer;
use tracing::debug;

/// Artifacts collected so far in one batch, keyed by scene number.
///
/// Owned by a single `generate_batch` call and dropped when it returns.
#[derive(Debug)]
pub struct BatchGenerationState {
    subject_seed: u64,
    collected: BTreeMap<u32, Vec<u8>>,
}

impl BatchGenerationState {
    /// Empty state whose subject seed starts as `requested_seed`, the seed
    /// sent with the `init` call.
    pub fn new(requested_seed: u64) -> Self {
        Self {
            subject_seed: requested_seed,
            collected: BTreeMap::new(),
        }
    }

    /// Subject seed carried by every call of the batch.
    pub fn subject_seed(&self) -> u64 {
        self.subject_seed
    }

    /// Replaces the subject seed with the one the `init` call settled on.
    pub fn set_subject_seed(&mut self, seed: u64) {
        self.subject_seed = seed;
    }

    /// Records `payload` for `scene_number`. Returns `false` and keeps the
    /// existing payload if the scene already has one.
    pub fn record(&mut self, scene_number: u32, payload: Vec<u8>) -> bool {
        if self.collected.contains_key(&scene_number) {
            debug!(scene_number, "Scene already has an artifact, dropping duplicate");
            return false;
        }
        self.collected.insert(scene_number, payload);
        true
    }

    /// Number of scenes collected.
    pub fn collected_count(&self) -> usize {
        self.collected.len()
    }

    /// Produces one artifact per scene `1..=scene_count`, ascending, filling
    /// gaps with failure placeholders. Collected entries outside the range
    /// are discarded.
    pub fn finish(mut self, scene_count: u32, renderer: &PlaceholderRenderer) -> Vec<ImageArtifact> {
        (1..=scene_count)
            .map(|scene_number| match self.collected.remove(&scene_number) {
                Some(payload) => ImageArtifact::generated(scene_number, payload),
                None => ImageArtifact::placeholder(scene_number, renderer.render_failure(scene_number)),
            })
            .collect()
    }
}
