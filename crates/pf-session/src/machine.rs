//! Stage and round sequencing

use pf_core::{
    AdaptiveRecommendation, Clock, Difficulty, RoundContext, RoundIdSource, RoundResult,
    SystemClock, UuidRoundIds,
};

use crate::events::{SessionEvent, SessionStage};

/// Handle returned by [`SessionMachine::subscribe`]
pub type SubscriptionId = u64;

/// Injected recommendation source (the adaptive controller's `assess`)
pub type RecommendationFn = Box<dyn FnMut(&RoundContext, &RoundResult) -> AdaptiveRecommendation>;

type Listener = Box<dyn FnMut(&SessionEvent)>;

/// Cyclic `hub -> game -> summary -> hub` machine with synchronous event
/// delivery.
///
/// Deciding *when* to request the next round (including any success-pause
/// delay) is the caller's responsibility, not the machine's.
pub struct SessionMachine {
    stage: SessionStage,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
    recommend: RecommendationFn,
    round_ids: Box<dyn RoundIdSource>,
    clock: Box<dyn Clock>,
}

impl SessionMachine {
    /// Create a machine with uuid round ids and the system clock
    pub fn new(recommend: RecommendationFn) -> Self {
        Self::with_sources(
            recommend,
            Box::new(UuidRoundIds),
            Box::new(SystemClock::new()),
        )
    }

    /// Create a machine with explicit id and clock sources
    pub fn with_sources(
        recommend: RecommendationFn,
        round_ids: Box<dyn RoundIdSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            stage: SessionStage::Hub,
            listeners: Vec::new(),
            next_subscription: 0,
            recommend,
            round_ids,
            clock,
        }
    }

    /// Current stage
    pub fn stage(&self) -> SessionStage {
        self.stage
    }

    /// Register a listener; events are delivered synchronously, in
    /// registration order, until [`unsubscribe`] is called with the
    /// returned handle.
    ///
    /// [`unsubscribe`]: SessionMachine::unsubscribe
    pub fn subscribe(&mut self, listener: impl FnMut(&SessionEvent) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = self.next_subscription;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns whether it was still registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Enter the game stage and start the first round
    pub fn start_game(&mut self, game_id: &str, difficulty: Difficulty) -> RoundContext {
        self.update_stage(SessionStage::Game);
        self.next_round(game_id, difficulty)
    }

    /// Create a fresh round context and announce it; does not change stage
    pub fn next_round(&mut self, game_id: &str, difficulty: Difficulty) -> RoundContext {
        let context = RoundContext {
            game_id: game_id.to_string(),
            difficulty,
            round_id: self.round_ids.next_round_id(),
            started_at: self.clock.now_ms(),
        };
        self.emit(&SessionEvent::RoundStarted {
            context: context.clone(),
        });
        context
    }

    /// Assess a finished round through the injected recommendation source
    /// and announce the outcome.
    ///
    /// The context must be the one most recently emitted via
    /// `round-started`; a stale context yields an undefined recommendation
    /// (caller error, not validated here).
    pub fn finish_round(
        &mut self,
        context: &RoundContext,
        result: &RoundResult,
    ) -> AdaptiveRecommendation {
        let recommendation = (self.recommend)(context, result);
        self.emit(&SessionEvent::RoundFinished {
            context: context.clone(),
            result: *result,
            recommendation,
        });
        recommendation
    }

    /// Leave the game stage for the summary screen
    pub fn end_game(&mut self) {
        self.update_stage(SessionStage::Summary);
    }

    /// Return to the hub
    pub fn return_to_hub(&mut self) {
        self.update_stage(SessionStage::Hub);
    }

    fn update_stage(&mut self, stage: SessionStage) {
        self.stage = stage;
        log::debug!("session stage -> {stage}");
        self.emit(&SessionEvent::StageChanged { stage });
    }

    fn emit(&mut self, event: &SessionEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::{ManualClock, RewardTier, SequentialRoundIds};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn stub_recommendation() -> AdaptiveRecommendation {
        AdaptiveRecommendation {
            next_difficulty: Difficulty::Lv1,
            provide_hint: false,
            reward_tier: RewardTier::Base,
        }
    }

    fn test_machine() -> SessionMachine {
        SessionMachine::with_sources(
            Box::new(|_, _| stub_recommendation()),
            Box::new(SequentialRoundIds::new("round")),
            Box::new(ManualClock::new(1234)),
        )
    }

    #[test]
    fn test_event_sequence_for_one_game() {
        let mut machine = test_machine();
        let events = Rc::new(RefCell::new(Vec::new()));

        let sink = events.clone();
        machine.subscribe(move |event| {
            let line = match event {
                SessionEvent::StageChanged { stage } => format!("stage:{stage}"),
                SessionEvent::RoundStarted { context } => format!("start:{}", context.game_id),
                SessionEvent::RoundFinished { context, .. } => {
                    format!("finish:{}", context.round_id)
                }
            };
            sink.borrow_mut().push(line);
        });

        let context = machine.start_game("rhythm", Difficulty::Lv1);
        machine.finish_round(
            &context,
            &RoundResult {
                success: true,
                reaction_time_ms: 800,
                hints_used: 0,
                ended_at: 2345,
            },
        );
        machine.end_game();
        machine.return_to_hub();

        assert_eq!(
            *events.borrow(),
            vec![
                "stage:game",
                "start:rhythm",
                "finish:round-1",
                "stage:summary",
                "stage:hub",
            ]
        );
    }

    #[test]
    fn test_round_context_fields() {
        let mut machine = test_machine();
        let context = machine.start_game("pair-match", Difficulty::Lv3);

        assert_eq!(context.game_id, "pair-match");
        assert_eq!(context.difficulty, Difficulty::Lv3);
        assert_eq!(context.round_id, "round-1");
        assert_eq!(context.started_at, 1234);
        assert_eq!(machine.stage(), SessionStage::Game);

        // A follow-up round gets a fresh id and leaves the stage alone.
        let next = machine.next_round("pair-match", Difficulty::Lv3);
        assert_eq!(next.round_id, "round-2");
        assert_eq!(machine.stage(), SessionStage::Game);
    }

    #[test]
    fn test_finish_round_returns_recommendation() {
        let mut machine = SessionMachine::with_sources(
            Box::new(|_, result| AdaptiveRecommendation {
                next_difficulty: Difficulty::Lv2,
                provide_hint: !result.success,
                reward_tier: RewardTier::Streak,
            }),
            Box::new(SequentialRoundIds::new("round")),
            Box::new(ManualClock::new(0)),
        );

        let context = machine.start_game("rhythm", Difficulty::Lv1);
        let recommendation = machine.finish_round(
            &context,
            &RoundResult {
                success: false,
                reaction_time_ms: 2100,
                hints_used: 1,
                ended_at: 3000,
            },
        );

        assert_eq!(recommendation.next_difficulty, Difficulty::Lv2);
        assert!(recommendation.provide_hint);
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let mut machine = test_machine();
        let order = Rc::new(RefCell::new(Vec::new()));

        let first = order.clone();
        machine.subscribe(move |_| first.borrow_mut().push("first"));
        let second = order.clone();
        machine.subscribe(move |_| second.borrow_mut().push("second"));

        machine.end_game();
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut machine = test_machine();
        let count = Rc::new(RefCell::new(0));

        let sink = count.clone();
        let id = machine.subscribe(move |_| *sink.borrow_mut() += 1);

        machine.end_game();
        assert_eq!(*count.borrow(), 1);

        assert!(machine.unsubscribe(id));
        machine.return_to_hub();
        assert_eq!(*count.borrow(), 1);

        // Unsubscribing twice is a no-op.
        assert!(!machine.unsubscribe(id));
    }
}
