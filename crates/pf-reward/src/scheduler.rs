//! Cooldown-gated reward picking

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use pf_core::{Clock, RewardTier, SystemClock};
use pf_random::{ControlledRandomizer, WeightedChoice};

use crate::catalog::{RewardEvent, RewardIntensity, builtin_catalog};
use crate::settings::RewardSettings;
use crate::{RewardError, RewardResult};

/// Minimum spacing between rewards
pub const TRIGGER_COOLDOWN_MS: u64 = 3000;

/// Presentation delay once the cooldown has elapsed
pub const POST_COOLDOWN_DELAY_MS: u64 = 180;

/// Recently granted event ids excluded from selection
pub const RECENT_REWARDS_CAP: usize = 3;

/// Seed for the selection randomizer when none is supplied
const DEFAULT_SEED: &str = "playforge-rewards";

/// What the finished round earned
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardContext {
    /// Current streak, for presentation
    pub streak: u32,
    /// Tier recommended by the adaptive controller
    pub reward_tier: RewardTier,
}

/// One scheduled reward: present `event` after `delay_ms`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardSchedule {
    pub delay_ms: u64,
    pub event: RewardEvent,
}

/// Cooldown-gated celebratory-event picker.
///
/// The cooldown slot is reserved the moment a reward is scheduled, not
/// when the caller actually presents it; abandoning a schedule simply
/// wastes the slot.
pub struct RewardScheduler {
    /// Catalog partitioned by intensity, indexed by [`RewardIntensity::index`]
    buckets: [Vec<RewardEvent>; 3],
    /// Most-recent-first ring of granted event ids
    recent: VecDeque<String>,
    randomizer: ControlledRandomizer,
    cooldown_ms: u64,
    /// End of the last reserved slot; `None` until the first grant
    last_trigger_at: Option<u64>,
    allow_celebration: bool,
    clock: Box<dyn Clock>,
}

impl RewardScheduler {
    /// Scheduler over the built-in catalog
    pub fn new() -> Self {
        Self::with_catalog(builtin_catalog())
    }

    /// Scheduler over a custom catalog
    pub fn with_catalog(catalog: Vec<RewardEvent>) -> Self {
        let mut scheduler = Self {
            buckets: [Vec::new(), Vec::new(), Vec::new()],
            recent: VecDeque::new(),
            randomizer: ControlledRandomizer::new(DEFAULT_SEED),
            cooldown_ms: TRIGGER_COOLDOWN_MS,
            last_trigger_at: None,
            allow_celebration: true,
            clock: Box::new(SystemClock::new()),
        };
        for event in catalog {
            scheduler.register_reward(event);
        }
        scheduler
    }

    /// Replace the selection randomizer seed
    pub fn with_seed(mut self, seed: &str) -> Self {
        self.randomizer = ControlledRandomizer::new(seed);
        self
    }

    /// Replace the clock source
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Append a catalog entry under its intensity bucket (additive only)
    pub fn register_reward(&mut self, event: RewardEvent) {
        self.buckets[event.intensity.index()].push(event);
    }

    /// Apply family settings; only the celebration toggle matters here
    pub fn update_settings(&mut self, settings: &RewardSettings) {
        self.allow_celebration = settings.allow_celebration;
    }

    /// Pick the next reward and reserve the cooldown slot.
    ///
    /// Fails with [`RewardError::EmptyCatalog`] when no event of a usable
    /// intensity exists even after dropping the recency exclusion.
    pub fn schedule(&mut self, context: &RewardContext) -> RewardResult<RewardSchedule> {
        let now = self.clock.now_ms();
        let delay_ms = match self.last_trigger_at {
            Some(last) => {
                let elapsed = now as i64 - last as i64;
                if elapsed >= self.cooldown_ms as i64 {
                    POST_COOLDOWN_DELAY_MS
                } else {
                    (self.cooldown_ms as i64 - elapsed) as u64
                }
            }
            None => POST_COOLDOWN_DELAY_MS,
        };

        let mut intensities: Vec<RewardIntensity> = tier_intensities(context.reward_tier)
            .iter()
            .copied()
            .filter(|intensity| {
                *intensity != RewardIntensity::Celebration || self.allow_celebration
            })
            .collect();
        if intensities.is_empty() {
            intensities.push(RewardIntensity::Soft);
        }

        let mut pool: Vec<RewardEvent> = intensities
            .iter()
            .flat_map(|intensity| self.buckets[intensity.index()].iter())
            .filter(|event| !self.recent.contains(&event.id))
            .cloned()
            .collect();
        if pool.is_empty() {
            // Every usable event was granted recently; drop the recency
            // exclusion.
            pool = intensities
                .iter()
                .flat_map(|intensity| self.buckets[intensity.index()].iter())
                .cloned()
                .collect();
        }
        if pool.is_empty() {
            return Err(RewardError::EmptyCatalog);
        }

        let weighted: Vec<WeightedChoice> = pool
            .iter()
            .map(|event| WeightedChoice::new(event.id.clone(), event.intensity.weight()))
            .collect();
        let chosen_id = self.randomizer.next(&weighted)?;
        let event = pool
            .iter()
            .find(|event| event.id == chosen_id)
            .unwrap_or(&pool[0])
            .clone();

        self.recent.push_front(event.id.clone());
        self.recent.truncate(RECENT_REWARDS_CAP);
        self.last_trigger_at = Some(now + delay_ms);

        log::debug!(
            "scheduled reward '{}' ({:?}) after {delay_ms}ms",
            event.id,
            event.intensity
        );

        Ok(RewardSchedule { delay_ms, event })
    }
}

impl Default for RewardScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Intensities a reward tier may draw from
fn tier_intensities(tier: RewardTier) -> &'static [RewardIntensity] {
    match tier {
        RewardTier::Base => &[RewardIntensity::Soft, RewardIntensity::Base],
        RewardTier::Streak => &[RewardIntensity::Base],
        RewardTier::Super => &[RewardIntensity::Celebration],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::ManualClock;
    use std::sync::Arc;

    fn clocked_scheduler(start_ms: u64) -> (RewardScheduler, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start_ms));
        let scheduler = RewardScheduler::new()
            .with_seed("test-seed")
            .with_clock(Box::new(clock.clone()));
        (scheduler, clock)
    }

    fn base_context() -> RewardContext {
        RewardContext {
            streak: 1,
            reward_tier: RewardTier::Base,
        }
    }

    #[test]
    fn test_fresh_scheduler_grants_short_delay() {
        let (mut scheduler, _) = clocked_scheduler(10_000);
        let schedule = scheduler.schedule(&base_context()).unwrap();
        assert_eq!(schedule.delay_ms, POST_COOLDOWN_DELAY_MS);
    }

    #[test]
    fn test_cooldown_defers_back_to_back_rewards() {
        let (mut scheduler, clock) = clocked_scheduler(10_000);
        scheduler.schedule(&base_context()).unwrap();

        // The slot was reserved through now + 180ms, so an immediate second
        // call waits out the full window plus the reserved remainder.
        let second = scheduler.schedule(&base_context()).unwrap();
        assert_eq!(second.delay_ms, TRIGGER_COOLDOWN_MS + POST_COOLDOWN_DELAY_MS);

        clock.advance(10_000);
        let third = scheduler.schedule(&base_context()).unwrap();
        assert_eq!(third.delay_ms, POST_COOLDOWN_DELAY_MS);
    }

    #[test]
    fn test_super_tier_without_celebration_falls_back_to_soft() {
        let (mut scheduler, clock) = clocked_scheduler(0);
        let settings = RewardSettings {
            allow_celebration: false,
            ..RewardSettings::default()
        };
        scheduler.update_settings(&settings);

        for _ in 0..6 {
            let schedule = scheduler
                .schedule(&RewardContext {
                    streak: 10,
                    reward_tier: RewardTier::Super,
                })
                .unwrap();
            assert_eq!(schedule.event.intensity, RewardIntensity::Soft);
            clock.advance(5_000);
        }
    }

    #[test]
    fn test_super_tier_picks_celebration_when_allowed() {
        let (mut scheduler, _) = clocked_scheduler(0);
        let schedule = scheduler
            .schedule(&RewardContext {
                streak: 10,
                reward_tier: RewardTier::Super,
            })
            .unwrap();
        assert_eq!(schedule.event.intensity, RewardIntensity::Celebration);
    }

    #[test]
    fn test_recency_ring_varies_picks() {
        let catalog = vec![
            RewardEvent::new("one", RewardIntensity::Base),
            RewardEvent::new("two", RewardIntensity::Base),
            RewardEvent::new("three", RewardIntensity::Base),
            RewardEvent::new("four", RewardIntensity::Base),
        ];
        let mut scheduler = RewardScheduler::with_catalog(catalog)
            .with_seed("test-seed")
            .with_clock(Box::new(ManualClock::new(0)));

        let context = RewardContext {
            streak: 3,
            reward_tier: RewardTier::Streak,
        };
        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.push(scheduler.schedule(&context).unwrap().event.id);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3, "recent rewards must not repeat");
    }

    #[test]
    fn test_recency_fallback_with_tiny_catalog() {
        let catalog = vec![RewardEvent::new("only", RewardIntensity::Base)];
        let mut scheduler = RewardScheduler::with_catalog(catalog)
            .with_seed("test-seed")
            .with_clock(Box::new(ManualClock::new(0)));

        let context = RewardContext {
            streak: 3,
            reward_tier: RewardTier::Streak,
        };
        assert_eq!(scheduler.schedule(&context).unwrap().event.id, "only");
        // Recently granted, but it is all we have.
        assert_eq!(scheduler.schedule(&context).unwrap().event.id, "only");
    }

    #[test]
    fn test_empty_catalog_fails() {
        let mut scheduler = RewardScheduler::with_catalog(Vec::new());
        assert!(matches!(
            scheduler.schedule(&base_context()),
            Err(RewardError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_register_reward_extends_catalog() {
        let mut scheduler = RewardScheduler::with_catalog(Vec::new())
            .with_clock(Box::new(ManualClock::new(0)));
        scheduler.register_reward(RewardEvent::new("gentle-glow", RewardIntensity::Soft));

        let schedule = scheduler.schedule(&base_context()).unwrap();
        assert_eq!(schedule.event.id, "gentle-glow");
    }
}
