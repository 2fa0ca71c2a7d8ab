//! Events emitted by the simulation for rendering, audio and UI feedback.
//!
//! The simulation never owns visual objects; consumers react to these.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::state::MatchSummary;
use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchEvent {
    /// Match went Active.
    MatchStarted { duration_secs: u32, high_score: u32 },
    /// A new target entered the playfield.
    TargetSpawned {
        id: u32,
        kind: TargetKind,
        position: Position,
    },
    /// A target's position changed this tick.
    TargetMoved { id: u32, position: Position },
    /// A target started a sideways dash.
    TargetDashed { id: u32, distance: f64 },
    /// A shot eliminated a target.
    TargetEliminated {
        id: u32,
        zone: HitZone,
        points: u32,
        combo: u32,
    },
    /// A target walked past the player without being hit.
    TargetEscaped { id: u32 },
    /// A shot hit nothing.
    ShotMissed { point: Position },
    /// One second elapsed on the match clock.
    MatchTick { time_left_secs: u32 },
    /// Remaining time dropped into the urgent window.
    UrgencyStarted { time_left_secs: u32 },
    /// The match is over.
    MatchEnded { summary: MatchSummary },
    /// Navigation requested from the summary screen.
    TransitionRequested { target: SceneTarget },
}
