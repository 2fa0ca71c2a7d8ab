//! Match snapshot: the complete visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::MatchEvent;
use crate::types::{Position, Rect, SimTime};

/// Complete match state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub phase: MatchPhase,
    pub time_left_secs: u32,
    /// Late-match warning flag.
    pub urgent: bool,
    pub score: u32,
    pub combo: u32,
    pub multiplier: f64,
    pub stats: ShotStats,
    /// Best score known to the engine (persisted value as of match start,
    /// or the new record once the match has ended).
    pub high_score: u32,
    /// Live targets in spawn order.
    pub targets: Vec<TargetView>,
    pub events: Vec<MatchEvent>,
    /// Present once the match has ended.
    pub summary: Option<MatchSummary>,
}

/// Shot counters. `hits + misses == shots_fired` always.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotStats {
    pub shots_fired: u32,
    pub hits: u32,
    pub headshots: u32,
    pub misses: u32,
}

/// A live target as seen by the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub id: u32,
    pub kind: TargetKind,
    pub position: Position,
    pub head: Rect,
    pub body: Rect,
    /// Depth scale for drawing.
    pub scale: f64,
    pub dashing: bool,
}

/// End-of-match report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub score: u32,
    pub stats: ShotStats,
    /// Percentage of shots that hit, rounded half-up.
    pub accuracy: u32,
    /// Percentage of hits that were headshots, rounded half-up.
    pub headshot_rate: u32,
    pub grade: Grade,
    /// Persisted high score before this match.
    pub previous_high_score: u32,
    /// High score after this match.
    pub high_score: u32,
    /// `score - previous_high_score`, negative when the record stands.
    pub score_delta: i64,
    pub new_high_score: bool,
}
