//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Match lifecycle phase. Transitions only move forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Created, no timers running.
    #[default]
    Idle,
    /// Clock and spawner running, input accepted.
    Active,
    /// Terminal for this match; state is frozen.
    Ended,
}

/// Which hit-zone of a target a shot landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitZone {
    Head,
    Body,
}

/// Letter rating derived from accuracy at match end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    #[default]
    C,
}

/// Enemy archetype. Cosmetic: both share the same hit geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    /// Casual-mode enemy.
    #[default]
    Soldier,
    /// Ranked-mode enemy.
    Ninja,
}

/// Destination requested from the summary screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneTarget {
    Menu,
    Restart,
}

impl HitZone {
    /// Base points before the combo multiplier is applied.
    pub fn base_points(self) -> u32 {
        match self {
            HitZone::Head => crate::constants::HEAD_BASE_POINTS,
            HitZone::Body => crate::constants::BODY_BASE_POINTS,
        }
    }
}

impl Grade {
    /// Strict greater-than thresholds: 86+ is S, 71..=85 is A, 51..=70 is B.
    pub fn from_accuracy(accuracy: u32) -> Self {
        use crate::constants::{GRADE_A_ABOVE, GRADE_B_ABOVE, GRADE_S_ABOVE};
        if accuracy > GRADE_S_ABOVE {
            Grade::S
        } else if accuracy > GRADE_A_ABOVE {
            Grade::A
        } else if accuracy > GRADE_B_ABOVE {
            Grade::B
        } else {
            Grade::C
        }
    }
}
