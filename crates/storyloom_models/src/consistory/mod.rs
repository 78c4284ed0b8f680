//! NVIDIA Consistory integration.

mod client;
mod dto;

pub use client::{CONSISTORY_API_URL, ConsistoryClient, DEFAULT_REQUEST_TIMEOUT};
pub use dto::{ConsistoryArtifact, ConsistoryResponse};
