//! Adaptive Difficulty Controller
//!
//! Keeps every round of every mini-game inside the player's ability band:
//!
//! - **Per-game state**: difficulty, streak, consecutive fails, bounded
//!   outcome history (fixed table, sized at construction)
//! - **Assessment**: one decision per finished round — step difficulty,
//!   pick a reward tier, decide whether the next round gets a hint
//! - **Safety clamp**: a failed round is never grounds for a difficulty
//!   increase
//!
//! The controller consumes the randomizer only to log outcomes for
//! inspection; nothing feeds back into selection.

pub mod config;
pub mod engine;

pub use config::AdaptiveConfig;
pub use engine::{AdaptiveEngine, AdaptiveSnapshot, ROUND_HISTORY_CAP};
