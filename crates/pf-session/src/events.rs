//! Session stages and events

use std::fmt;

use serde::{Deserialize, Serialize};

use pf_core::{AdaptiveRecommendation, RoundContext, RoundResult};

/// Where the session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStage {
    #[default]
    Hub,
    Game,
    Summary,
}

impl SessionStage {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStage::Hub => "hub",
            SessionStage::Game => "game",
            SessionStage::Summary => "summary",
        }
    }
}

impl fmt::Display for SessionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event pushed to session subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SessionEvent {
    StageChanged {
        stage: SessionStage,
    },
    RoundStarted {
        context: RoundContext,
    },
    RoundFinished {
        context: RoundContext,
        result: RoundResult,
        recommendation: AdaptiveRecommendation,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serde_tags() {
        let raw = serde_json::to_value(SessionEvent::StageChanged {
            stage: SessionStage::Summary,
        })
        .unwrap();
        assert_eq!(raw["type"], "stage-changed");
        assert_eq!(raw["stage"], "summary");
    }
}
