//! Adaptive tuning configuration

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pf_core::{Difficulty, GameId, GameRegistry};

/// Tuning knobs for the adaptive controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveConfig {
    /// Starting difficulty per registered game; also fixes the set of
    /// games the controller tracks
    pub base_difficulty: BTreeMap<GameId, Difficulty>,
    /// Success rate above which a passing round steps difficulty up
    pub success_upper: f32,
    /// Accepted for forward compatibility; decreases are driven by
    /// consecutive failures only
    pub success_lower: f32,
    /// Streaks that earn an elevated reward tier; the largest earns the
    /// super tier
    pub streak_thresholds: Vec<u32>,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            base_difficulty: BTreeMap::new(),
            success_upper: 0.85,
            success_lower: 0.7,
            streak_thresholds: vec![3, 5, 10],
        }
    }
}

impl AdaptiveConfig {
    /// Add a tracked game (builder style)
    pub fn with_game(mut self, game_id: impl Into<GameId>, difficulty: Difficulty) -> Self {
        self.base_difficulty.insert(game_id.into(), difficulty);
        self
    }

    /// Build a config whose tracked games and starting difficulties come
    /// from the module registry
    pub fn from_registry(registry: &GameRegistry) -> Self {
        let mut config = Self::default();
        for id in registry.ids() {
            if let Some(module) = registry.get(id) {
                config
                    .base_difficulty
                    .insert(id.to_string(), module.base_difficulty());
            }
        }
        config
    }

    /// Parse a config from JSON
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdaptiveConfig::default();
        assert_eq!(config.success_upper, 0.85);
        assert_eq!(config.streak_thresholds, vec![3, 5, 10]);
        assert!(config.base_difficulty.is_empty());
    }

    #[test]
    fn test_from_json_applies_defaults() {
        let config =
            AdaptiveConfig::from_json(r#"{ "base_difficulty": { "rhythm": "lv2" } }"#).unwrap();
        assert_eq!(
            config.base_difficulty.get("rhythm"),
            Some(&Difficulty::Lv2)
        );
        assert_eq!(config.success_upper, 0.85);
    }

    #[test]
    fn test_from_json_normalizes_stale_difficulty() {
        let config =
            AdaptiveConfig::from_json(r#"{ "base_difficulty": { "rhythm": "lv9" } }"#).unwrap();
        assert_eq!(
            config.base_difficulty.get("rhythm"),
            Some(&Difficulty::Lv1)
        );
    }
}
