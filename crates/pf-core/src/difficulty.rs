//! Difficulty ladder
//!
//! Challenge tiers form a small ordered set. Values arriving from outside
//! the set (stale persisted data after a schema change, hand-edited
//! configs) are normalized to the lowest level rather than rejected.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// One challenge tier in the ordered ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Lv1,
    Lv2,
    Lv3,
    Lv4,
}

impl Difficulty {
    /// The ladder, lowest first
    pub const ORDER: [Difficulty; 4] = [
        Difficulty::Lv1,
        Difficulty::Lv2,
        Difficulty::Lv3,
        Difficulty::Lv4,
    ];

    /// Lowest defined level, the normalization target for unknown values
    pub const LOWEST: Difficulty = Difficulty::Lv1;

    /// Position in the ladder (0-based)
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// One step up, clamped at the top of the ladder
    pub fn step_up(self) -> Difficulty {
        let index = (self.index() + 1).min(Self::ORDER.len() - 1);
        Self::ORDER[index]
    }

    /// One step down, clamped at the bottom of the ladder
    pub fn step_down(self) -> Difficulty {
        Self::ORDER[self.index().saturating_sub(1)]
    }

    /// Stable identifier used in persisted data
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Lv1 => "lv1",
            Difficulty::Lv2 => "lv2",
            Difficulty::Lv3 => "lv3",
            Difficulty::Lv4 => "lv4",
        }
    }

    /// Lenient parse: anything outside the defined set maps to the lowest
    /// level.
    pub fn parse(value: &str) -> Difficulty {
        match value {
            "lv1" => Difficulty::Lv1,
            "lv2" => Difficulty::Lv2,
            "lv3" => Difficulty::Lv3,
            "lv4" => Difficulty::Lv4,
            other => {
                log::debug!("unknown difficulty '{other}', normalizing to lv1");
                Difficulty::LOWEST
            }
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Difficulty::parse(&raw))
    }
}
