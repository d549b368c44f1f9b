//! Session Lab — synthetic end-to-end session simulator
//!
//! Wires the five core engines together against a probe game module and
//! plays a scripted session on a manual clock:
//!
//! randomizer -> adaptive controller -> session machine -> rewards -> telemetry
//!
//! Usage:
//!   cargo run -p pf-lab -- --seed demo --rounds 40

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{Value, json};

use pf_adaptive::{AdaptiveConfig, AdaptiveEngine};
use pf_core::{
    Clock, Difficulty, GameModule, GameRegistry, ManualClock, RoundContext, RoundResult,
    SequentialRoundIds,
};
use pf_random::{ControlledRandomizer, WeightedChoice};
use pf_reward::{RewardContext, RewardScheduler};
use pf_session::{SessionEvent, SessionMachine};
use pf_telemetry::{GAME_SUMMARY_LIMIT, TelemetryEntry, TelemetryLog};

#[derive(Parser)]
#[command(name = "pf-lab", about = "PlayForge synthetic session simulator")]
struct Cli {
    /// Randomizer seed
    #[arg(short, long, default_value = "playforge-lab")]
    seed: String,

    /// Rounds to simulate
    #[arg(short, long, default_value_t = 40)]
    rounds: u32,

    /// Game module to drive
    #[arg(short, long, default_value = "shape-probe")]
    game: String,
}

const SHAPES: [&str; 4] = ["star", "moon", "heart", "cloud"];

/// Synthetic skill game: each round hides a target shape behind a pass
/// window that narrows as difficulty climbs.
struct ShapeProbe;

impl ShapeProbe {
    fn pass_window(difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Lv1 => 0.9,
            Difficulty::Lv2 => 0.75,
            Difficulty::Lv3 => 0.6,
            Difficulty::Lv4 => 0.45,
        }
    }
}

impl GameModule for ShapeProbe {
    fn id(&self) -> &str {
        "shape-probe"
    }

    fn title_key(&self) -> &str {
        "game.shapeProbe.title"
    }

    fn icon(&self) -> &str {
        "shapes"
    }

    fn base_difficulty(&self) -> Difficulty {
        Difficulty::Lv1
    }

    fn create_round(&self, difficulty: Difficulty, randomizer: &mut ControlledRandomizer) -> Value {
        let choices: Vec<WeightedChoice> = SHAPES
            .iter()
            .map(|shape| WeightedChoice::new(*shape, 1.0))
            .collect();
        let target = randomizer
            .next(&choices)
            .unwrap_or_else(|_| SHAPES[0].to_string());

        json!({
            "target": target,
            "pass_window": Self::pass_window(difficulty),
        })
    }

    fn evaluate(&self, state: &Value, input: &Value) -> RoundResult {
        let window = state["pass_window"].as_f64().unwrap_or(0.5);
        RoundResult {
            success: input["roll"].as_f64().unwrap_or(1.0) < window,
            reaction_time_ms: input["reaction_time_ms"].as_u64().unwrap_or(0) as u32,
            hints_used: 0,
            ended_at: input["ended_at"].as_u64().unwrap_or(0),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // One-time module setup, before any session starts.
    let mut registry = GameRegistry::new();
    registry.register(Box::new(ShapeProbe));
    let module = registry
        .get(&cli.game)
        .with_context(|| format!("unknown game '{}'", cli.game))?;

    let clock = Arc::new(ManualClock::new(0));
    let mut randomizer = ControlledRandomizer::new(&cli.seed);

    let adaptive = Rc::new(RefCell::new(AdaptiveEngine::new(
        AdaptiveConfig::from_registry(&registry),
    )));
    let recommend = {
        let adaptive = adaptive.clone();
        Box::new(move |context: &RoundContext, result: &RoundResult| {
            adaptive.borrow_mut().assess(context, result)
        })
    };

    let mut machine = SessionMachine::with_sources(
        recommend,
        Box::new(SequentialRoundIds::new("round")),
        Box::new(clock.clone()),
    );
    machine.subscribe(|event| match event {
        SessionEvent::StageChanged { stage } => log::info!("stage -> {stage}"),
        SessionEvent::RoundStarted { context } => {
            log::debug!("round {} started at {}ms", context.round_id, context.started_at);
        }
        SessionEvent::RoundFinished {
            context,
            result,
            recommendation,
        } => {
            log::debug!(
                "round {} {} -> next {}",
                context.round_id,
                if result.success { "passed" } else { "failed" },
                recommendation.next_difficulty,
            );
        }
    });

    let mut scheduler = RewardScheduler::new()
        .with_seed(&format!("{}-rewards", cli.seed))
        .with_clock(Box::new(clock.clone()));
    let mut telemetry = TelemetryLog::new();

    let mut difficulty = module.base_difficulty();
    let mut rewards = Vec::new();
    let mut context = machine.start_game(&cli.game, difficulty);

    for round in 0..cli.rounds {
        if round > 0 {
            context = machine.next_round(&cli.game, difficulty);
        }
        let state = module.create_round(context.difficulty, &mut randomizer);

        // Simulated child: thinks for a bit, then answers.
        let reaction_time_ms = 500 + (randomizer.next_float() * 1200.0) as u64;
        clock.advance(reaction_time_ms);
        let input = json!({
            "roll": randomizer.next_float() as f64,
            "reaction_time_ms": reaction_time_ms,
            "ended_at": clock.now_ms(),
        });

        let result = module.evaluate(&state, &input);
        let recommendation = machine.finish_round(&context, &result);

        telemetry.record(TelemetryEntry {
            game_id: context.game_id.clone(),
            success: result.success,
            reaction_time_ms: result.reaction_time_ms,
            difficulty: context.difficulty,
            timestamp: chrono::Utc::now(),
            hints_used: result.hints_used,
        });

        if result.success {
            let streak = adaptive.borrow().snapshot().streak;
            let schedule = scheduler.schedule(&RewardContext {
                streak,
                reward_tier: recommendation.reward_tier,
            })?;
            rewards.push(json!({
                "round": context.round_id,
                "delay_ms": schedule.delay_ms,
                "event": schedule.event.id,
            }));
        }

        difficulty = recommendation.next_difficulty;

        // Round-advance pause belongs to the orchestration layer.
        clock.advance(800);
    }

    machine.end_game();
    machine.return_to_hub();

    let report = json!({
        "seed": cli.seed,
        "rounds": cli.rounds,
        "summary": telemetry.summary(),
        "game_summary": telemetry.summary_for_game(&cli.game, GAME_SUMMARY_LIMIT),
        "adaptive": adaptive.borrow().snapshot(),
        "rewards": rewards,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
