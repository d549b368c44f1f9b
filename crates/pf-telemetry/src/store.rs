//! Append-only round log

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pf_core::{Difficulty, GameId};

use crate::summary::{SessionSummary, compute_summary};
use crate::MAX_ENTRIES;

/// One recorded round.
///
/// Difficulty is normalized at the deserialization boundary, so an entry
/// always carries a defined level by the time it reaches the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEntry {
    /// Game the round belonged to
    pub game_id: GameId,
    /// Whether the round was passed
    pub success: bool,
    /// Time from round start to the deciding input (ms)
    pub reaction_time_ms: u32,
    /// Difficulty the round was played at
    pub difficulty: Difficulty,
    /// When the round finished
    pub timestamp: DateTime<Utc>,
    /// Hints consumed during the round
    pub hints_used: u32,
}

/// Persisted shape for the storage collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavedTelemetry {
    pub entries: Vec<TelemetryEntry>,
}

/// Append-only log capped at [`MAX_ENTRIES`], oldest dropped on overflow
#[derive(Debug, Default)]
pub struct TelemetryLog {
    entries: VecDeque<TelemetryEntry>,
}

impl TelemetryLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Rebuild a log from persisted data, keeping the newest entries
    pub fn from_saved(saved: SavedTelemetry) -> Self {
        let mut entries = saved.entries;
        let skip = entries.len().saturating_sub(MAX_ENTRIES);
        if skip > 0 {
            log::debug!("dropping {skip} telemetry entries beyond the cap");
            entries.drain(..skip);
        }
        Self {
            entries: VecDeque::from(entries),
        }
    }

    /// Persisted view, capped to the newest [`MAX_ENTRIES`]
    pub fn to_saved(&self) -> SavedTelemetry {
        let skip = self.entries.len().saturating_sub(MAX_ENTRIES);
        SavedTelemetry {
            entries: self.entries.iter().skip(skip).cloned().collect(),
        }
    }

    /// Append a round, evicting the oldest beyond the cap
    pub fn record(&mut self, entry: TelemetryEntry) {
        self.entries.push_back(entry);
        if self.entries.len() > MAX_ENTRIES {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retained entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &TelemetryEntry> {
        self.entries.iter()
    }

    /// Most recent entries, newest first
    pub fn recent(&self, limit: usize) -> Vec<&TelemetryEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    /// Summary over all retained entries
    pub fn summary(&self) -> SessionSummary {
        let entries: Vec<&TelemetryEntry> = self.entries.iter().collect();
        compute_summary(&entries)
    }

    /// Summary over one game's most recent `limit` entries
    pub fn summary_for_game(&self, game_id: &str, limit: usize) -> SessionSummary {
        let filtered: Vec<&TelemetryEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.game_id == game_id)
            .collect();
        let start = filtered.len().saturating_sub(limit);
        compute_summary(&filtered[start..])
    }

    /// Clear the log
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}
