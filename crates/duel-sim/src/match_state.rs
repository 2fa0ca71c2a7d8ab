//! Running match state: phase, clock value, score and shot statistics.
//!
//! Stored directly on `SimulationEngine`, NOT as ECS entities.
//! A new match always gets a fresh `MatchState`.

use duel_core::constants::{COMBO_MULTIPLIER_STEP, COMBO_STEPS_PER_UNIT};
use duel_core::enums::{HitZone, MatchPhase};
use duel_core::state::ShotStats;

#[derive(Debug, Clone, Default)]
pub struct MatchState {
    pub phase: MatchPhase,
    pub time_left_secs: u32,
    pub urgent: bool,
    pub score: u32,
    pub combo: u32,
    pub stats: ShotStats,
}

impl MatchState {
    /// Fresh Idle state for a match of the given length.
    pub fn new(duration_secs: u32) -> Self {
        Self {
            time_left_secs: duration_secs,
            ..Default::default()
        }
    }

    /// Score multiplier derived from the combo: `1 + combo * 0.05`.
    pub fn multiplier(&self) -> f64 {
        1.0 + self.combo as f64 * COMBO_MULTIPLIER_STEP
    }

    /// Record a shot that landed in `zone`. Returns the points awarded.
    pub fn record_hit(&mut self, zone: HitZone) -> u32 {
        self.stats.shots_fired += 1;
        self.stats.hits += 1;
        if zone == HitZone::Head {
            self.stats.headshots += 1;
        }
        self.combo += 1;
        let points = points_for(zone, self.combo);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Record a shot that hit nothing. Breaks the combo; score is untouched.
    pub fn record_miss(&mut self) {
        self.stats.shots_fired += 1;
        self.stats.misses += 1;
        self.combo = 0;
    }
}

/// `floor(base * (1 + combo * 0.05))` in exact integer arithmetic.
/// `combo` is the value after the hit was counted.
pub fn points_for(zone: HitZone, combo: u32) -> u32 {
    let base = zone.base_points() as u64;
    let steps = COMBO_STEPS_PER_UNIT as u64;
    (base * (steps + combo as u64) / steps) as u32
}
