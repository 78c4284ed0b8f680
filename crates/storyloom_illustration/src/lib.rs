//! Consistent-subject batch illustration for Storyloom.
//!
//! [`ConsistentBatchOrchestrator`] turns an ordered list of scenes into
//! exactly one image per scene. In external mode it runs the two-phase
//! `init`/`extra` protocol against an [`ImageBackend`](storyloom_interface::ImageBackend),
//! holding the subject seed fixed across calls so the depicted character
//! stays recognizable. Any backend failure stops the sequence and the
//! remaining scenes are backfilled with labeled placeholders, so a batch
//! never comes back short.
//!
//! In offline mode no network calls are made; every scene gets a rendered
//! card showing its descriptor.
//!
//! # Example
//!
//! ```
//! use storyloom_core::SceneRecord;
//! use storyloom_illustration::ConsistentBatchOrchestrator;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let orchestrator = ConsistentBatchOrchestrator::offline();
//! let scenes = vec![
//!     SceneRecord::new(1, "A hero stands.", "A knight in silver armor"),
//!     SceneRecord::new(2, "She walks.", "The same knight walking through fog"),
//! ];
//! let images = orchestrator
//!     .generate_batch("a knight", &[], &scenes, "A detailed digital artwork")
//!     .await;
//! assert_eq!(images.len(), 2);
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod orchestrator;
mod retry;
mod seed;
mod state;

pub use config::{GenerationBackendMode, IllustrationConfig};
pub use orchestrator::{BatchSettings, ConsistentBatchOrchestrator};
pub use retry::RetryPolicy;
pub use seed::{clock_seed, fresh_seed};
pub use state::BatchGenerationState;
