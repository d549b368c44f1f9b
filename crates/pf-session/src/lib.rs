//! Session State Machine
//!
//! Sequences the `hub -> game -> summary -> hub` cycle and the rounds
//! played inside it:
//!
//! - Round contexts carry a fresh unique id and start timestamp
//! - Finishing a round asks the injected recommendation source for the
//!   next difficulty decision
//! - Listeners receive events synchronously, in registration order, on
//!   the calling thread — no internal queuing or async dispatch
//!
//! Timers (round-advance delays, hint reveals) belong to the orchestration
//! layer; the machine carries no pending operations of its own.

pub mod events;
pub mod machine;

pub use events::{SessionEvent, SessionStage};
pub use machine::{RecommendationFn, SessionMachine, SubscriptionId};
