//! Telemetry Aggregator
//!
//! Append-only performance log with on-demand rolling summaries:
//!
//! - Entries are immutable once appended; the log keeps the newest 120
//! - Summaries (success rate, best streak, mean and EMA reaction time)
//!   are recomputed from the retained entries on every call
//! - Consumed by the controller/UI layer; the other engines never read it
//!
//! The persisted shape ([`SavedTelemetry`]) is what the external storage
//! collaborator reads and writes; no I/O happens here.

pub mod store;
pub mod summary;

pub use store::{SavedTelemetry, TelemetryEntry, TelemetryLog};
pub use summary::SessionSummary;

/// Maximum retained log entries
pub const MAX_ENTRIES: usize = 120;

/// Smoothing factor for the reaction-time EMA
pub const EMA_ALPHA: f32 = 0.3;

/// Default window for per-game summaries
pub const GAME_SUMMARY_LIMIT: usize = 30;

/// Default window for recent-entry queries
pub const RECENT_LIMIT: usize = 10;
