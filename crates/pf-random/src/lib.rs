//! Controlled Randomizer
//!
//! Seeded deterministic value generation for round content and reward
//! selection:
//!
//! - **Seeding**: stable string hash (FNV-1a 64) feeding a ChaCha8 stream,
//!   so the same seed always produces the same draw sequence
//! - **Weighted selection**: usage-damped weights with a recency penalty to
//!   keep picks varied without ever starving a candidate
//! - **Outcome log**: bounded ring of round outcomes for later inspection

pub mod randomizer;

pub use randomizer::*;

use thiserror::Error;

/// Randomizer error types
#[derive(Debug, Error)]
pub enum RandomError {
    /// Weighted selection was asked to choose from an empty candidate list.
    /// This is a caller-configuration bug, never expected in normal play.
    #[error("weighted selection requires at least one candidate")]
    EmptyCandidates,
}

pub type RandomResult<T> = Result<T, RandomError>;

/// Maximum recorded round outcomes kept for inspection
pub const OUTCOME_HISTORY_CAP: usize = 64;

/// Default recency-ring size for repetition avoidance
pub const DEFAULT_AVOID_RECENT: usize = 2;

/// Weight multiplier applied to recently chosen values
pub const RECENT_PENALTY: f32 = 0.25;
