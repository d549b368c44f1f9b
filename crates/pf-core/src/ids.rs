//! Round-id sources
//!
//! Production sessions use random v4 uuids; tests and the session lab use
//! a sequential source so event streams are reproducible.

use uuid::Uuid;

use crate::round::RoundId;

/// Supplier of unique round ids
pub trait RoundIdSource {
    fn next_round_id(&mut self) -> RoundId;
}

/// Random v4 uuid round ids
#[derive(Debug, Default)]
pub struct UuidRoundIds;

impl RoundIdSource for UuidRoundIds {
    fn next_round_id(&mut self) -> RoundId {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-N` round ids
#[derive(Debug)]
pub struct SequentialRoundIds {
    prefix: String,
    counter: u64,
}

impl SequentialRoundIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }
}

impl RoundIdSource for SequentialRoundIds {
    fn next_round_id(&mut self) -> RoundId {
        self.counter += 1;
        format!("{}-{}", self.prefix, self.counter)
    }
}
