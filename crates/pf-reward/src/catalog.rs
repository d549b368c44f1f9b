//! Reward catalog
//!
//! Static, immutable event entries referencing the audio/animation assets
//! and narration line the presentation layer plays back.

use serde::{Deserialize, Serialize};

/// Intensity bucket for a reward event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardIntensity {
    Soft,
    Base,
    Celebration,
}

impl RewardIntensity {
    /// All buckets, mildest first
    pub const ALL: [RewardIntensity; 3] = [
        RewardIntensity::Soft,
        RewardIntensity::Base,
        RewardIntensity::Celebration,
    ];

    /// Bucket index into the scheduler's fixed catalog table
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Fixed selection weight per intensity
    pub fn weight(self) -> f32 {
        match self {
            RewardIntensity::Soft => 0.6,
            RewardIntensity::Base => 1.0,
            RewardIntensity::Celebration => 1.4,
        }
    }
}

/// One celebratory event in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardEvent {
    /// Unique event id
    pub id: String,
    /// Intensity bucket
    pub intensity: RewardIntensity,
    /// Audio asset reference
    #[serde(default)]
    pub audio: String,
    /// Animation asset reference
    #[serde(default)]
    pub animation: String,
    /// Localization key for the narration line
    #[serde(default)]
    pub narration_key: String,
}

impl RewardEvent {
    pub fn new(id: impl Into<String>, intensity: RewardIntensity) -> Self {
        Self {
            id: id.into(),
            intensity,
            audio: String::new(),
            animation: String::new(),
            narration_key: String::new(),
        }
    }

    pub fn with_audio(mut self, audio: impl Into<String>) -> Self {
        self.audio = audio.into();
        self
    }

    pub fn with_animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = animation.into();
        self
    }

    pub fn with_narration(mut self, narration_key: impl Into<String>) -> Self {
        self.narration_key = narration_key.into();
        self
    }
}

/// Default five-event catalog
pub fn builtin_catalog() -> Vec<RewardEvent> {
    vec![
        RewardEvent::new("sparkle-pop", RewardIntensity::Base)
            .with_audio("/assets/sfx/sparkle-pop.mp3")
            .with_animation("/assets/animations/sparkle.json")
            .with_narration("reward.goodJob"),
        RewardEvent::new("soft-chime", RewardIntensity::Soft)
            .with_audio("/assets/sfx/soft-chime.mp3")
            .with_animation("/assets/animations/soft-chime.json")
            .with_narration("reward.nice"),
        RewardEvent::new("fireworks", RewardIntensity::Celebration)
            .with_audio("/assets/sfx/fireworks.mp3")
            .with_animation("/assets/animations/fireworks.json")
            .with_narration("reward.amazing"),
        RewardEvent::new("confetti-friends", RewardIntensity::Celebration)
            .with_audio("/assets/sfx/confetti.mp3")
            .with_animation("/assets/animations/confetti.json")
            .with_narration("reward.super"),
        RewardEvent::new("twinkle-rise", RewardIntensity::Base)
            .with_audio("/assets/sfx/twinkle.mp3")
            .with_animation("/assets/animations/twinkle.json")
            .with_narration("reward.keepGoing"),
    ]
}

/// Parse a catalog from JSON
pub fn catalog_from_json(raw: &str) -> serde_json::Result<Vec<RewardEvent>> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_weights() {
        assert_eq!(RewardIntensity::Soft.weight(), 0.6);
        assert_eq!(RewardIntensity::Base.weight(), 1.0);
        assert_eq!(RewardIntensity::Celebration.weight(), 1.4);
    }

    #[test]
    fn test_builtin_catalog_covers_all_intensities() {
        let catalog = builtin_catalog();
        for intensity in RewardIntensity::ALL {
            assert!(
                catalog.iter().any(|event| event.intensity == intensity),
                "missing {intensity:?} events"
            );
        }
    }

    #[test]
    fn test_catalog_from_json() {
        let catalog = catalog_from_json(
            r#"[
                { "id": "rainbow-burst", "intensity": "celebration", "audio": "/assets/sfx/rainbow.mp3" }
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].id, "rainbow-burst");
        assert_eq!(catalog[0].intensity, RewardIntensity::Celebration);
        assert!(catalog[0].narration_key.is_empty());
    }
}
