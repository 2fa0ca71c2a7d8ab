//! Snapshot system: reads the world and match state into a `MatchSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use duel_core::components::{Dash, HitZones, TargetInfo};
use duel_core::events::MatchEvent;
use duel_core::state::{MatchSnapshot, MatchSummary, TargetView};
use duel_core::types::{Position, SimTime};

use crate::match_state::MatchState;

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    state: &MatchState,
    high_score: u32,
    events: Vec<MatchEvent>,
    summary: Option<&MatchSummary>,
) -> MatchSnapshot {
    MatchSnapshot {
        time: *time,
        phase: state.phase,
        time_left_secs: state.time_left_secs,
        urgent: state.urgent,
        score: state.score,
        combo: state.combo,
        multiplier: state.multiplier(),
        stats: state.stats,
        high_score,
        targets: build_targets(world),
        events,
        summary: summary.cloned(),
    }
}

/// Live targets, sorted by id.
fn build_targets(world: &World) -> Vec<TargetView> {
    let mut targets: Vec<TargetView> = world
        .query::<(&TargetInfo, &Position, &HitZones, &Dash)>()
        .iter()
        .filter(|(_, (info, _, _, _))| info.alive)
        .map(|(_, (info, pos, zones, dash))| TargetView {
            id: info.id,
            kind: info.kind,
            position: *pos,
            head: zones.head,
            body: zones.body,
            scale: zones.scale,
            dashing: dash.motion.is_some(),
        })
        .collect();

    targets.sort_by_key(|t| t.id);
    targets
}
