//! Seed sources.

use rand::Rng;
use storyloom_core::SEED_MODULUS;

/// Random seed in `0..SEED_MODULUS`.
pub fn fresh_seed() -> u64 {
    rand::rng().random_range(0..SEED_MODULUS)
}

/// Seed derived from the current Unix time, used when the backend does not
/// report one.
pub fn clock_seed() -> u64 {
    chrono::Utc::now().timestamp().unsigned_abs() % SEED_MODULUS
}
