//! Reward settings persisted shape
//!
//! The storage mechanism itself is an external collaborator; this is the
//! shape it reads and writes.

use serde::{Deserialize, Serialize};

/// Family-facing reward preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardSettings {
    /// Playback volume in [0, 1]
    pub volume: f32,
    /// Whether celebration-intensity effects may fire
    pub allow_celebration: bool,
    /// Mute all reward audio
    pub muted: bool,
}

impl Default for RewardSettings {
    fn default() -> Self {
        Self {
            volume: 0.8,
            allow_celebration: true,
            muted: false,
        }
    }
}

impl RewardSettings {
    /// Set the volume, clamped into [0, 1]
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Parse settings from JSON
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Serialize settings for the storage collaborator
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = RewardSettings::default();
        assert_eq!(settings.volume, 0.8);
        assert!(settings.allow_celebration);
        assert!(!settings.muted);
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut settings = RewardSettings::default();
        settings.set_volume(1.7);
        assert_eq!(settings.volume, 1.0);
        settings.set_volume(-0.2);
        assert_eq!(settings.volume, 0.0);
    }

    #[test]
    fn test_partial_json_applies_defaults() {
        let settings = RewardSettings::from_json(r#"{ "allow_celebration": false }"#).unwrap();
        assert!(!settings.allow_celebration);
        assert_eq!(settings.volume, 0.8);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = RewardSettings::default();
        settings.muted = true;
        let raw = settings.to_json().unwrap();
        assert_eq!(RewardSettings::from_json(&raw).unwrap(), settings);
    }
}
