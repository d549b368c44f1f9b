//! Adaptive assessment engine

use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;

use pf_core::{AdaptiveRecommendation, Difficulty, GameId, RewardTier, RoundContext, RoundResult};
use pf_random::{ControlledRandomizer, RandomOutcome};

use crate::config::AdaptiveConfig;

/// Outcome history retained per game
pub const ROUND_HISTORY_CAP: usize = 10;

/// Seed for the instrumentation randomizer when none is supplied
const DEFAULT_SEED: &str = "playforge-adaptive";

/// Mutable tracking state for one game
#[derive(Debug, Clone)]
struct GameAdaptiveState {
    game_id: GameId,
    difficulty: Difficulty,
    streak: u32,
    consecutive_fails: u32,
    history: VecDeque<RoundResult>,
}

impl GameAdaptiveState {
    fn new(game_id: GameId, difficulty: Difficulty) -> Self {
        Self {
            game_id,
            difficulty,
            streak: 0,
            consecutive_fails: 0,
            history: VecDeque::new(),
        }
    }

    fn push_result(&mut self, result: RoundResult) {
        self.history.push_back(result);
        if self.history.len() > ROUND_HISTORY_CAP {
            self.history.pop_front();
        }
    }

    fn success_rate(&self) -> f32 {
        if self.history.is_empty() {
            return 0.0;
        }
        let successes = self.history.iter().filter(|r| r.success).count();
        successes as f32 / self.history.len() as f32
    }
}

/// Derived view over all tracked games
#[derive(Debug, Clone, Serialize)]
pub struct AdaptiveSnapshot {
    /// Best active streak across games
    pub streak: u32,
    /// Success rate over all retained histories
    pub success_rate: f32,
    /// Total retained rounds across games
    pub recent_rounds: usize,
    /// Current difficulty per tracked game
    pub difficulty_by_game: BTreeMap<GameId, Difficulty>,
}

/// Per-game difficulty/streak state machine.
///
/// The set of tracked games is fixed at construction from the config's
/// base-difficulty table; transitions occur only inside [`assess`].
///
/// [`assess`]: AdaptiveEngine::assess
pub struct AdaptiveEngine {
    success_upper: f32,
    /// Sorted ascending; the largest earns the super tier
    streak_thresholds: Vec<u32>,
    states: Vec<GameAdaptiveState>,
    randomizer: ControlledRandomizer,
}

impl AdaptiveEngine {
    pub fn new(config: AdaptiveConfig) -> Self {
        Self::with_randomizer(config, ControlledRandomizer::new(DEFAULT_SEED))
    }

    pub fn with_randomizer(config: AdaptiveConfig, randomizer: ControlledRandomizer) -> Self {
        let mut streak_thresholds = config.streak_thresholds;
        streak_thresholds.sort_unstable();

        let states = config
            .base_difficulty
            .into_iter()
            .map(|(game_id, difficulty)| GameAdaptiveState::new(game_id, difficulty))
            .collect();

        Self {
            success_upper: config.success_upper,
            streak_thresholds,
            states,
            randomizer,
        }
    }

    /// Assess a finished round and move the game's difficulty state.
    ///
    /// An unregistered game id is answered conservatively (lowest
    /// difficulty, base tier, no hint) without touching any state.
    pub fn assess(
        &mut self,
        context: &RoundContext,
        result: &RoundResult,
    ) -> AdaptiveRecommendation {
        let Some(state) = self
            .states
            .iter_mut()
            .find(|s| s.game_id == context.game_id)
        else {
            log::warn!("assess for unregistered game '{}'", context.game_id);
            return AdaptiveRecommendation {
                next_difficulty: Difficulty::LOWEST,
                provide_hint: false,
                reward_tier: RewardTier::Base,
            };
        };

        state.push_result(*result);

        let current = state.difficulty;
        let mut next = current;
        let mut reward_tier = RewardTier::Base;

        if result.success {
            state.streak += 1;
            state.consecutive_fails = 0;

            if state.success_rate() > self.success_upper {
                next = current.step_up();
            }

            if let Some(&top) = self.streak_thresholds.last() {
                if self.streak_thresholds.contains(&state.streak) {
                    reward_tier = if state.streak >= top {
                        RewardTier::Super
                    } else {
                        RewardTier::Streak
                    };
                }
            }
        } else {
            state.consecutive_fails += 1;
            state.streak = 0;

            if state.consecutive_fails >= 2 {
                next = current.step_down();
            }
        }

        // A failed round is never grounds for a difficulty increase.
        if !result.success && next != current {
            next = current.step_down();
        }

        let provide_hint = state.consecutive_fails >= 3;

        if next != current {
            log::debug!(
                "difficulty for '{}' moves {} -> {}",
                state.game_id,
                current,
                next
            );
        }
        state.difficulty = next;

        self.randomizer.record_outcome(RandomOutcome {
            game_id: context.game_id.clone(),
            round_id: context.round_id.clone(),
            success: result.success,
        });

        AdaptiveRecommendation {
            next_difficulty: next,
            provide_hint,
            reward_tier,
        }
    }

    /// Derived view over all tracked games
    pub fn snapshot(&self) -> AdaptiveSnapshot {
        let streak = self.states.iter().map(|s| s.streak).max().unwrap_or(0);
        let total: usize = self.states.iter().map(|s| s.history.len()).sum();
        let successes: usize = self
            .states
            .iter()
            .map(|s| s.history.iter().filter(|r| r.success).count())
            .sum();
        let success_rate = if total > 0 {
            successes as f32 / total as f32
        } else {
            0.0
        };

        AdaptiveSnapshot {
            streak,
            success_rate,
            recent_rounds: total,
            difficulty_by_game: self
                .states
                .iter()
                .map(|s| (s.game_id.clone(), s.difficulty))
                .collect(),
        }
    }

    /// Instrumentation randomizer (outcome log inspection)
    pub fn randomizer(&self) -> &ControlledRandomizer {
        &self.randomizer
    }
}
