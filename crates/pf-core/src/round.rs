//! Round lifecycle shapes
//!
//! A round is created by the session machine, played by a game module, and
//! assessed by the adaptive controller. All three shapes are immutable once
//! produced.

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;

/// Game identifier (one per registered mini-game)
pub type GameId = String;

/// Unique round identifier
pub type RoundId = String;

/// Context for one round in flight.
///
/// Created when a round begins and consumed once by `finish_round`; at most
/// one context is current per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundContext {
    /// Game the round belongs to
    pub game_id: GameId,
    /// Difficulty the round was generated at
    pub difficulty: Difficulty,
    /// Unique id for this round
    pub round_id: RoundId,
    /// Monotonic timestamp (ms) when the round started
    pub started_at: u64,
}

/// Outcome of one played round, produced by the game module's evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Whether the round was passed
    pub success: bool,
    /// Time from round start to the deciding input (ms)
    pub reaction_time_ms: u32,
    /// Hints consumed during the round
    pub hints_used: u32,
    /// Monotonic timestamp (ms) when the round ended
    pub ended_at: u64,
}

/// Celebration tier recommended alongside a difficulty decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardTier {
    Base,
    Streak,
    Super,
}

/// Decision computed fresh on each adaptive assessment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveRecommendation {
    /// Difficulty the next round should use
    pub next_difficulty: Difficulty,
    /// Whether the next round should surface a hint
    pub provide_hint: bool,
    /// Celebration tier for the finished round
    pub reward_tier: RewardTier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_tier_serde_names() {
        assert_eq!(serde_json::to_string(&RewardTier::Super).unwrap(), "\"super\"");
        let tier: RewardTier = serde_json::from_str("\"streak\"").unwrap();
        assert_eq!(tier, RewardTier::Streak);
    }

    #[test]
    fn test_round_context_round_trip() {
        let context = RoundContext {
            game_id: "rhythm".into(),
            difficulty: Difficulty::Lv2,
            round_id: "round-1".into(),
            started_at: 1234,
        };
        let raw = serde_json::to_string(&context).unwrap();
        let back: RoundContext = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, context);
    }
}
