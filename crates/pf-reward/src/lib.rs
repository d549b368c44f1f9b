//! Reward Scheduler
//!
//! Rate-limits and varies celebratory feedback so progress feels rewarded
//! without becoming repetitive or overstimulating:
//!
//! - **Catalog**: events partitioned by intensity (soft/base/celebration)
//! - **Cooldown**: one global 3-second slot, reserved at schedule time
//! - **Variety**: recency ring plus weighted selection through the
//!   controlled randomizer
//! - **Settings**: celebration-level effects can be disabled per family

pub mod catalog;
pub mod scheduler;
pub mod settings;

pub use catalog::{RewardEvent, RewardIntensity, builtin_catalog, catalog_from_json};
pub use scheduler::{
    POST_COOLDOWN_DELAY_MS, RECENT_REWARDS_CAP, RewardContext, RewardSchedule, RewardScheduler,
    TRIGGER_COOLDOWN_MS,
};
pub use settings::RewardSettings;

use thiserror::Error;

/// Reward scheduling error types
#[derive(Debug, Error)]
pub enum RewardError {
    /// No event of a usable intensity exists even after the recency
    /// fallback; the catalog is misconfigured.
    #[error("reward catalog has no usable events")]
    EmptyCatalog,

    #[error(transparent)]
    Random(#[from] pf_random::RandomError),
}

pub type RewardResult<T> = Result<T, RewardError>;
