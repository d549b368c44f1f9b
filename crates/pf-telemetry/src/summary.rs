//! Rolling performance summaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::EMA_ALPHA;
use crate::store::TelemetryEntry;

/// Derived performance view over a slice of telemetry entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Passed rounds / total rounds
    pub success_rate: f32,
    /// Arithmetic mean reaction time (ms)
    pub average_reaction_time: f32,
    /// Longest contiguous run of passed rounds, in insertion order
    pub best_streak: u32,
    /// Rounds covered by this summary
    pub total_rounds: usize,
    /// Reaction-time EMA (ms), seeded with the first retained entry
    pub reaction_trend_ms: f32,
    /// When this summary was computed
    pub last_updated: DateTime<Utc>,
}

impl SessionSummary {
    /// All-zero summary stamped with the current time
    pub fn empty() -> Self {
        Self {
            success_rate: 0.0,
            average_reaction_time: 0.0,
            best_streak: 0,
            total_rounds: 0,
            reaction_trend_ms: 0.0,
            last_updated: Utc::now(),
        }
    }
}

/// Compute a summary over entries in insertion order.
///
/// The EMA is folded left-to-right over the full slice, recomputed on
/// every call; nothing incremental is maintained between calls.
pub(crate) fn compute_summary(entries: &[&TelemetryEntry]) -> SessionSummary {
    if entries.is_empty() {
        return SessionSummary::empty();
    }

    let successes = entries.iter().filter(|entry| entry.success).count();

    let mut best_streak = 0u32;
    let mut current = 0u32;
    for entry in entries {
        if entry.success {
            current += 1;
            best_streak = best_streak.max(current);
        } else {
            current = 0;
        }
    }

    let average_reaction_time = entries
        .iter()
        .map(|entry| entry.reaction_time_ms as f32)
        .sum::<f32>()
        / entries.len() as f32;

    let mut reaction_trend_ms = entries[0].reaction_time_ms as f32;
    for entry in &entries[1..] {
        reaction_trend_ms =
            EMA_ALPHA * entry.reaction_time_ms as f32 + (1.0 - EMA_ALPHA) * reaction_trend_ms;
    }

    SessionSummary {
        success_rate: successes as f32 / entries.len() as f32,
        average_reaction_time,
        best_streak,
        total_rounds: entries.len(),
        reaction_trend_ms,
        last_updated: Utc::now(),
    }
}
