//! Game-module contract and registry
//!
//! A mini-game is an opaque collaborator: it turns a difficulty and a
//! randomizer into round state, and raw input into a pass/fail outcome.
//! Round state and input are JSON values the engines never interpret.
//!
//! The registry is built once by the process entry point before any
//! session starts; there is no hidden module-level registration state.

use pf_random::ControlledRandomizer;
use serde_json::Value;

use crate::difficulty::Difficulty;
use crate::round::RoundResult;

/// One registered mini-game
pub trait GameModule {
    /// Stable game identifier
    fn id(&self) -> &str;

    /// Localization key for the game title
    fn title_key(&self) -> &str;

    /// Hub icon reference
    fn icon(&self) -> &str;

    /// Difficulty a new player starts at
    fn base_difficulty(&self) -> Difficulty;

    /// Generate round state for the given difficulty
    fn create_round(&self, difficulty: Difficulty, randomizer: &mut ControlledRandomizer) -> Value;

    /// Evaluate raw input against round state
    fn evaluate(&self, state: &Value, input: &Value) -> RoundResult;
}

/// Fixed set of game modules, assembled at startup
#[derive(Default)]
pub struct GameRegistry {
    modules: Vec<Box<dyn GameModule>>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Register a module; a module with the same id is replaced.
    pub fn register(&mut self, module: Box<dyn GameModule>) {
        if let Some(existing) = self.modules.iter_mut().find(|m| m.id() == module.id()) {
            log::warn!("replacing already-registered game module '{}'", module.id());
            *existing = module;
        } else {
            self.modules.push(module);
        }
    }

    /// Look up a module by id
    pub fn get(&self, id: &str) -> Option<&dyn GameModule> {
        self.modules
            .iter()
            .find(|m| m.id() == id)
            .map(|m| m.as_ref())
    }

    /// Registered ids, in registration order
    pub fn ids(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
