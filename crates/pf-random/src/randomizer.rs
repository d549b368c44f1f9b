//! Deterministic weighted value generator
//!
//! All game-content generation and reward selection flows through one of
//! these. Selection is weighted but repetition-averse: every pick damps the
//! winner's future weight and recently chosen values are penalized further,
//! so a small candidate pool still feels varied to a child playing many
//! rounds in a row.

use std::collections::{HashMap, VecDeque};

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_AVOID_RECENT, OUTCOME_HISTORY_CAP, RECENT_PENALTY, RandomError, RandomResult};

/// Hash a seed string into a stream seed (FNV-1a 64).
///
/// Stable across platforms and releases; `seed_from_u64` applies its own
/// bit-mixing expansion on top.
#[inline]
pub fn hash_seed(seed: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in seed.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// A selection candidate with its base weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedChoice {
    /// Candidate value
    pub value: String,
    /// Base selection weight (higher = more likely)
    pub weight: f32,
}

impl WeightedChoice {
    /// Create a new candidate
    pub fn new(value: impl Into<String>, weight: f32) -> Self {
        Self {
            value: value.into(),
            weight: weight.max(0.0),
        }
    }
}

/// Round outcome recorded for inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomOutcome {
    /// Game the round belonged to
    pub game_id: String,
    /// Round identifier
    pub round_id: String,
    /// Whether the round was passed
    pub success: bool,
}

/// Seeded deterministic generator with weighted, repetition-averse selection
pub struct ControlledRandomizer {
    rng: ChaCha8Rng,
    avoid_recent: usize,
    /// Most-recent-first ring of chosen values
    recent: VecDeque<String>,
    /// Times each value has been chosen since the last reseed
    usage: HashMap<String, u32>,
    /// Bounded outcome log; never feeds back into selection
    outcomes: VecDeque<RandomOutcome>,
}

impl ControlledRandomizer {
    /// Create a randomizer from a seed string
    pub fn new(seed: &str) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(hash_seed(seed)),
            avoid_recent: DEFAULT_AVOID_RECENT,
            recent: VecDeque::new(),
            usage: HashMap::new(),
            outcomes: VecDeque::new(),
        }
    }

    /// Set the recency-ring size (0 disables repetition avoidance)
    pub fn with_avoid_recent(mut self, avoid_recent: usize) -> Self {
        self.avoid_recent = avoid_recent;
        self
    }

    /// Next uniform float in [0, 1); advances the stream
    #[inline]
    pub fn next_float(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Pick one candidate by adjusted weight.
    ///
    /// Each candidate's weight is divided by `(times chosen + 1)` and
    /// multiplied by [`RECENT_PENALTY`] when the value sits in the recency
    /// ring. A uniform threshold over the summed adjusted weights selects
    /// the winner; if rounding leaves the threshold unspent, the last
    /// candidate wins.
    pub fn next(&mut self, candidates: &[WeightedChoice]) -> RandomResult<String> {
        if candidates.is_empty() {
            return Err(RandomError::EmptyCandidates);
        }

        let adjusted: Vec<f32> = candidates
            .iter()
            .map(|entry| {
                let usage = self.usage.get(&entry.value).copied().unwrap_or(0);
                let penalty = if self.recent.contains(&entry.value) {
                    RECENT_PENALTY
                } else {
                    1.0
                };
                (entry.weight / (usage + 1) as f32) * penalty
            })
            .collect();

        let total: f32 = adjusted.iter().sum();
        let mut threshold = self.next_float() * total;

        for (entry, weight) in candidates.iter().zip(&adjusted) {
            threshold -= weight;
            if threshold <= 0.0 {
                self.track(&entry.value);
                return Ok(entry.value.clone());
            }
        }

        // Rounding can leave a sliver of threshold unspent.
        let fallback = &candidates[candidates.len() - 1].value;
        self.track(fallback);
        Ok(fallback.clone())
    }

    /// Replace the generator deterministically from a new seed.
    ///
    /// Clears usage counters and the recency ring; the outcome log is kept.
    pub fn reseed(&mut self, seed: &str) {
        self.rng = ChaCha8Rng::seed_from_u64(hash_seed(seed));
        self.recent.clear();
        self.usage.clear();
        log::debug!("randomizer reseeded");
    }

    /// Append a round outcome to the inspection log (cap
    /// [`OUTCOME_HISTORY_CAP`], oldest dropped)
    pub fn record_outcome(&mut self, outcome: RandomOutcome) {
        self.outcomes.push_back(outcome);
        if self.outcomes.len() > OUTCOME_HISTORY_CAP {
            self.outcomes.pop_front();
        }
    }

    /// Snapshot of per-value usage counts since the last reseed
    pub fn usage_snapshot(&self) -> HashMap<String, u32> {
        self.usage.clone()
    }

    /// Recorded outcomes, oldest first
    pub fn outcomes(&self) -> impl Iterator<Item = &RandomOutcome> {
        self.outcomes.iter()
    }

    fn track(&mut self, value: &str) {
        if self.avoid_recent > 0 {
            self.recent.push_front(value.to_string());
            self.recent.truncate(self.avoid_recent);
        }
        *self.usage.entry(value.to_string()).or_insert(0) += 1;
    }
}
