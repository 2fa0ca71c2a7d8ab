//! Hit resolution: maps a shot point to at most one target and zone.

use hecs::{Entity, World};

use duel_core::components::{HitZones, TargetInfo};
use duel_core::enums::{HitZone, MatchPhase};
use duel_core::events::MatchEvent;
use duel_core::types::Position;

use crate::match_state::MatchState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Hit { id: u32, zone: HitZone, points: u32 },
    Miss,
    /// Shot arrived outside Active and was dropped.
    Ignored,
}

/// Find the first live target (in spawn order) whose head or body contains
/// `point`. Head is tested before body on each target.
pub fn find_hit(world: &World, point: &Position) -> Option<(Entity, u32, HitZone)> {
    let mut candidates: Vec<(u32, Entity, HitZones)> = world
        .query::<(&TargetInfo, &HitZones)>()
        .iter()
        .filter(|(_, (info, _))| info.alive)
        .map(|(entity, (info, zones))| (info.id, entity, *zones))
        .collect();
    candidates.sort_unstable_by_key(|(id, _, _)| *id);

    candidates.into_iter().find_map(|(id, entity, zones)| {
        if zones.head.contains(point) {
            Some((entity, id, HitZone::Head))
        } else if zones.body.contains(point) {
            Some((entity, id, HitZone::Body))
        } else {
            None
        }
    })
}

/// Resolve one shot against the world, updating score, combo and counters.
pub fn resolve(
    world: &mut World,
    state: &mut MatchState,
    point: Position,
    events: &mut Vec<MatchEvent>,
) -> ShotOutcome {
    if state.phase != MatchPhase::Active {
        return ShotOutcome::Ignored;
    }

    match find_hit(world, &point) {
        Some((entity, id, zone)) => {
            if let Ok(mut info) = world.get::<&mut TargetInfo>(entity) {
                info.alive = false;
            }
            let points = state.record_hit(zone);
            log::trace!(
                "shot ({:.1}, {:.1}) hit target {} {:?} for {} (combo {})",
                point.x,
                point.y,
                id,
                zone,
                points,
                state.combo
            );
            events.push(MatchEvent::TargetEliminated {
                id,
                zone,
                points,
                combo: state.combo,
            });
            ShotOutcome::Hit { id, zone, points }
        }
        None => {
            state.record_miss();
            log::trace!("shot ({:.1}, {:.1}) missed", point.x, point.y);
            events.push(MatchEvent::ShotMissed { point });
            ShotOutcome::Miss
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_setup::{spawn_target, zones_at, TargetSpec};

    fn still_target(id: u32, x: f64, y: f64) -> TargetSpec {
        TargetSpec {
            id,
            kind: Default::default(),
            position: Position::new(x, y),
            drift: 0.0,
            dash_enabled: false,
            dash_cooldown_ms: 0.0,
        }
    }

    fn active() -> MatchState {
        let mut state = MatchState::new(20);
        state.phase = MatchPhase::Active;
        state
    }

    #[test]
    fn test_head_tested_before_body() {
        let mut world = World::new();
        let mut state = active();
        let mut events = Vec::new();
        spawn_target(&mut world, still_target(0, 180.0, 300.0));
        let zones = zones_at(Position::new(180.0, 300.0));

        // Shared edge between head and body counts as head.
        let edge = Position::new(180.0, zones.head.max_y);
        assert!(zones.body.contains(&edge));
        let outcome = resolve(&mut world, &mut state, edge, &mut events);
        assert_eq!(
            outcome,
            ShotOutcome::Hit {
                id: 0,
                zone: HitZone::Head,
                points: 2
            }
        );
    }

    #[test]
    fn test_body_hit_and_target_dies() {
        let mut world = World::new();
        let mut state = active();
        let mut events = Vec::new();
        spawn_target(&mut world, still_target(3, 180.0, 300.0));
        let body = zones_at(Position::new(180.0, 300.0)).body.center();

        let outcome = resolve(&mut world, &mut state, body, &mut events);
        assert!(matches!(outcome, ShotOutcome::Hit { id: 3, zone: HitZone::Body, points: 1 }));

        // Dead targets are not hittable by a second shot at the same point.
        let outcome = resolve(&mut world, &mut state, body, &mut events);
        assert_eq!(outcome, ShotOutcome::Miss);
        assert_eq!(state.stats.hits, 1);
        assert_eq!(state.stats.misses, 1);
        assert_eq!(state.combo, 0);
    }

    #[test]
    fn test_overlap_resolves_to_earliest_spawn() {
        let mut world = World::new();
        let mut state = active();
        let mut events = Vec::new();
        // Spawn the later id first; hecs order must not matter.
        spawn_target(&mut world, still_target(9, 182.0, 300.0));
        spawn_target(&mut world, still_target(2, 180.0, 300.0));

        let point = zones_at(Position::new(181.0, 300.0)).body.center();
        let outcome = resolve(&mut world, &mut state, point, &mut events);
        assert!(matches!(outcome, ShotOutcome::Hit { id: 2, .. }));

        let alive: Vec<u32> = world
            .query::<&TargetInfo>()
            .iter()
            .filter(|(_, info)| info.alive)
            .map(|(_, info)| info.id)
            .collect();
        assert_eq!(alive, vec![9]);
    }

    #[test]
    fn test_miss_in_empty_corner() {
        let mut world = World::new();
        let mut state = active();
        let mut events = Vec::new();
        spawn_target(&mut world, still_target(0, 180.0, 300.0));

        let outcome = resolve(&mut world, &mut state, Position::new(5.0, 5.0), &mut events);
        assert_eq!(outcome, ShotOutcome::Miss);
        assert_eq!(
            events,
            vec![MatchEvent::ShotMissed {
                point: Position::new(5.0, 5.0)
            }]
        );
    }

    #[test]
    fn test_ignored_outside_active() {
        let mut world = World::new();
        let mut state = MatchState::new(20);
        let mut events = Vec::new();
        spawn_target(&mut world, still_target(0, 180.0, 300.0));

        let outcome = resolve(&mut world, &mut state, Position::new(180.0, 300.0), &mut events);
        assert_eq!(outcome, ShotOutcome::Ignored);
        assert_eq!(state.stats.shots_fired, 0);
        assert!(events.is_empty());
    }
}
