//! Two-phase consistent-subject batch generation.

use crate::config::{GenerationBackendMode, IllustrationConfig};
use crate::retry::RetryPolicy;
use crate::seed::{clock_seed, fresh_seed};
use crate::state::BatchGenerationState;
use std::sync::Arc;
use std::time::Duration;
use storyloom_core::{
    BackendArtifact, ExtraPayload, GenerationParameters, GenerationPayload, ImageArtifact,
    InitPayload, MAX_SUBJECT_TOKENS, SceneRecord,
};
use storyloom_error::{ConfigError, ImageBackendResult, StoryloomResult};
use storyloom_interface::ImageBackend;
use storyloom_models::ConsistoryClient;
use storyloom_render::PlaceholderRenderer;
use tracing::{debug, info, instrument, warn};

/// Timing knobs for external-mode batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSettings {
    /// Retry budget per backend call
    pub retry: RetryPolicy,
    /// Pause between successive `extra` calls
    pub inter_call_delay: Duration,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            inter_call_delay: Duration::from_millis(2000),
        }
    }
}

impl BatchSettings {
    /// Settings taken from an [`IllustrationConfig`].
    pub fn from_config(config: &IllustrationConfig) -> Self {
        Self {
            retry: RetryPolicy::new(
                config.max_retries,
                Duration::from_millis(config.retry_backoff_ms),
            ),
            inter_call_delay: Duration::from_millis(config.inter_call_delay_ms),
        }
    }

    /// No retries and no pauses.
    pub fn immediate() -> Self {
        Self {
            retry: RetryPolicy::none(),
            inter_call_delay: Duration::ZERO,
        }
    }
}

enum Backend {
    External(Arc<dyn ImageBackend>),
    Offline,
}

/// Produces exactly one image per scene, keeping the subject consistent.
///
/// Batches are independent: each call to
/// [`generate_batch`](Self::generate_batch) owns its own
/// [`BatchGenerationState`], so one orchestrator may serve concurrent
/// batches.
pub struct ConsistentBatchOrchestrator {
    backend: Backend,
    settings: BatchSettings,
    renderer: PlaceholderRenderer,
}

impl std::fmt::Debug for ConsistentBatchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsistentBatchOrchestrator")
            .field("backend", &self.backend_name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl ConsistentBatchOrchestrator {
    /// Builds an orchestrator from configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if external mode is selected without an
    /// API key, or an HTTP error if the backend client cannot be created.
    #[instrument(skip(config), fields(mode = %config.mode))]
    pub fn from_config(config: &IllustrationConfig) -> StoryloomResult<Self> {
        match config.mode {
            GenerationBackendMode::Offline => Ok(Self::offline()),
            GenerationBackendMode::External => {
                let api_key = config.api_key().ok_or_else(|| {
                    ConfigError::new(
                        "illustration.api_key is required when illustration.mode is \"external\"",
                    )
                })?;
                let client = ConsistoryClient::with_endpoint(
                    api_key,
                    &config.endpoint,
                    Duration::from_secs(config.request_timeout_secs),
                )?;
                Ok(Self::with_backend(
                    Arc::new(client),
                    BatchSettings::from_config(config),
                ))
            }
        }
    }

    /// External-mode orchestrator over `backend`.
    pub fn with_backend(backend: Arc<dyn ImageBackend>, settings: BatchSettings) -> Self {
        Self {
            backend: Backend::External(backend),
            settings,
            renderer: PlaceholderRenderer::new(),
        }
    }

    /// Offline-mode orchestrator; never touches the network.
    pub fn offline() -> Self {
        Self {
            backend: Backend::Offline,
            settings: BatchSettings::default(),
            renderer: PlaceholderRenderer::new(),
        }
    }

    /// Whether this orchestrator renders local cards instead of calling a backend.
    pub fn is_offline(&self) -> bool {
        matches!(self.backend, Backend::Offline)
    }

    /// Active settings.
    pub fn settings(&self) -> &BatchSettings {
        &self.settings
    }

    fn backend_name(&self) -> &'static str {
        match &self.backend {
            Backend::External(backend) => backend.provider_name(),
            Backend::Offline => "offline",
        }
    }

    /// Generates one artifact per scene, numbered by position `1..=N` and
    /// sorted ascending.
    ///
    /// Backend failures never surface here: the call sequence stops at the
    /// first exhausted error and every scene left without an image gets a
    /// placeholder. Zero scenes yields an empty list without any calls.
    #[instrument(
        skip(self, subject_prompt, subject_tokens, scenes, style_prompt),
        fields(scene_count = scenes.len(), backend = self.backend_name())
    )]
    pub async fn generate_batch(
        &self,
        subject_prompt: &str,
        subject_tokens: &[String],
        scenes: &[SceneRecord],
        style_prompt: &str,
    ) -> Vec<ImageArtifact> {
        if scenes.is_empty() {
            debug!("No scenes, nothing to generate");
            return Vec::new();
        }

        let backend = match &self.backend {
            Backend::Offline => return self.render_offline(scenes),
            Backend::External(backend) => backend.as_ref(),
        };

        let request = BatchRequest::new(subject_prompt, subject_tokens, scenes, style_prompt);
        let mut state = BatchGenerationState::new(fresh_seed());

        if let Err(e) = self.run_protocol(backend, &request, &mut state).await {
            warn!(
                error = %e,
                collected = state.collected_count(),
                "Backend call failed, backfilling remaining scenes with placeholders"
            );
        }

        let artifacts = state.finish(request.scene_count(), &self.renderer);
        info!(
            generated = artifacts.iter().filter(|a| !a.is_placeholder()).count(),
            placeholders = artifacts.iter().filter(|a| a.is_placeholder()).count(),
            "Batch complete"
        );
        artifacts
    }

    async fn run_protocol(
        &self,
        backend: &dyn ImageBackend,
        request: &BatchRequest<'_>,
        state: &mut BatchGenerationState,
    ) -> ImageBackendResult<()> {
        let init = GenerationPayload::Init(request.init_payload(state.subject_seed()));
        let artifacts = self.call(backend, &init).await?;

        // The seed always comes from response position 0, even when that
        // entry carries no image.
        let subject_seed = artifacts
            .first()
            .and_then(|artifact| *artifact.seed())
            .unwrap_or_else(|| {
                let seed = clock_seed();
                debug!(seed, "Backend reported no seed, using clock-derived seed");
                seed
            });
        state.set_subject_seed(subject_seed);

        let init_scenes = request.scene_count().min(2) as usize;
        for (position, artifact) in artifacts.into_iter().enumerate().take(init_scenes) {
            let scene_number = position as u32 + 1;
            match artifact.into_payload() {
                Some(payload) => {
                    state.record(scene_number, payload);
                }
                None => warn!(scene_number, "Backend withheld image for scene"),
            }
        }
        debug!(
            subject_seed = state.subject_seed(),
            collected = state.collected_count(),
            "Init call complete"
        );

        for (index, scene) in request.scenes.iter().enumerate().skip(2) {
            if index > 2 && !self.settings.inter_call_delay.is_zero() {
                tokio::time::sleep(self.settings.inter_call_delay).await;
            }

            let scene_number = index as u32 + 1;
            let extra = GenerationPayload::Extra(request.extra_payload(
                state.subject_seed(),
                scene.visual_descriptor(),
                fresh_seed(),
            ));
            let artifacts = self.call(backend, &extra).await?;

            match artifacts.into_iter().next().and_then(BackendArtifact::into_payload) {
                Some(payload) => {
                    state.record(scene_number, payload);
                }
                None => warn!(scene_number, "Backend returned no image for scene"),
            }
        }

        Ok(())
    }

    async fn call(
        &self,
        backend: &dyn ImageBackend,
        payload: &GenerationPayload,
    ) -> ImageBackendResult<Vec<BackendArtifact>> {
        debug!(mode = %payload.mode(), "Calling image backend");
        self.settings.retry.run(|| backend.call(payload)).await
    }

    fn render_offline(&self, scenes: &[SceneRecord]) -> Vec<ImageArtifact> {
        debug!("Rendering offline scene cards");
        (1u32..)
            .zip(scenes)
            .map(|(scene_number, scene)| {
                ImageArtifact::generated(
                    scene_number,
                    self.renderer
                        .render_scene_card(scene_number, scene.visual_descriptor()),
                )
            })
            .collect()
    }
}

/// Fields shared by every call in one batch.
struct BatchRequest<'a> {
    subject_prompt: &'a str,
    subject_tokens: Vec<String>,
    style_prompt: &'a str,
    scenes: &'a [SceneRecord],
}

impl<'a> BatchRequest<'a> {
    fn new(
        subject_prompt: &'a str,
        subject_tokens: &[String],
        scenes: &'a [SceneRecord],
        style_prompt: &'a str,
    ) -> Self {
        if subject_tokens.len() > MAX_SUBJECT_TOKENS {
            debug!(
                supplied = subject_tokens.len(),
                kept = MAX_SUBJECT_TOKENS,
                "Truncating subject tokens"
            );
        }
        Self {
            subject_prompt,
            subject_tokens: subject_tokens
                .iter()
                .take(MAX_SUBJECT_TOKENS)
                .cloned()
                .collect(),
            style_prompt,
            scenes,
        }
    }

    fn scene_count(&self) -> u32 {
        self.scenes.len() as u32
    }

    /// Descriptors of scenes 1 and 2; scene 1 repeats when there is no scene 2.
    /// Callers guarantee at least one scene.
    fn context_prompts(&self) -> (String, String) {
        let first = self.scenes[0].visual_descriptor().clone();
        let second = self
            .scenes
            .get(1)
            .map(|scene| scene.visual_descriptor().clone())
            .unwrap_or_else(|| first.clone());
        (first, second)
    }

    fn init_payload(&self, subject_seed: u64) -> InitPayload {
        let (scene_prompt1, scene_prompt2) = self.context_prompts();
        InitPayload {
            subject_prompt: self.subject_prompt.to_string(),
            subject_tokens: self.subject_tokens.clone(),
            subject_seed,
            style_prompt: self.style_prompt.to_string(),
            scene_prompt1,
            scene_prompt2,
            parameters: GenerationParameters::default(),
        }
    }

    fn extra_payload(
        &self,
        subject_seed: u64,
        additional_scene_prompt: &str,
        additional_scene_seed: u64,
    ) -> ExtraPayload {
        let (scene_prompt1, scene_prompt2) = self.context_prompts();
        ExtraPayload {
            subject_prompt: self.subject_prompt.to_string(),
            subject_tokens: self.subject_tokens.clone(),
            subject_seed,
            style_prompt: self.style_prompt.to_string(),
            scene_prompt1,
            scene_prompt2,
            additional_scene_prompt: additional_scene_prompt.to_string(),
            additional_scene_seed,
            parameters: GenerationParameters::default(),
        }
    }
}
