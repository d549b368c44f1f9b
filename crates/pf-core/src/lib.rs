//! PlayForge Core Types
//!
//! Shared vocabulary for the five session engines:
//! - Difficulty ladder with lenient normalization of persisted values
//! - Round context/result and adaptive recommendation shapes
//! - Clock and round-id sources (injectable for deterministic tests)
//! - Game-module contract and registry
//!
//! Engines never interpret game-specific state; a game module is an opaque
//! collaborator that turns a difficulty + randomizer into round state and
//! raw input into a pass/fail outcome.

pub mod clock;
pub mod difficulty;
pub mod ids;
pub mod module;
pub mod round;

pub use clock::{Clock, ManualClock, SystemClock};
pub use difficulty::Difficulty;
pub use ids::{RoundIdSource, SequentialRoundIds, UuidRoundIds};
pub use module::{GameModule, GameRegistry};
pub use round::{AdaptiveRecommendation, GameId, RewardTier, RoundContext, RoundId, RoundResult};
