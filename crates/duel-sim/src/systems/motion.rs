//! Target motion system.
//!
//! Each tick every live target walks toward the player, drifts sideways,
//! and possibly dashes. Targets that walk past the exit line are marked dead
//! (cleanup removes them). Hit zones are rebuilt before returning so shots
//! always resolve against current-frame geometry.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use duel_core::components::{Dash, DashMotion, Drift, HitZones, TargetInfo};
use duel_core::config::{DashConfig, MotionConfig};
use duel_core::constants::REFERENCE_FRAME_MS;
use duel_core::events::MatchEvent;
use duel_core::types::Position;

use crate::world_setup;

/// Advance all live targets by `delta_ms`.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    motion: &MotionConfig,
    dash_config: &DashConfig,
    delta_ms: f64,
    events: &mut Vec<MatchEvent>,
) {
    let frames = delta_ms / REFERENCE_FRAME_MS;

    for (_entity, (info, pos, drift, dash, zones)) in world.query_mut::<(
        &mut TargetInfo,
        &mut Position,
        &Drift,
        &mut Dash,
        &mut HitZones,
    )>() {
        if !info.alive {
            continue;
        }

        pos.y += motion.forward_speed * frames;
        pos.x += drift.per_frame * frames;

        if dash.enabled {
            dash.cooldown_ms -= delta_ms;
            if dash.cooldown_ms <= 0.0 {
                // Finish any dash still in flight before starting the next.
                if let Some(active) = dash.motion.take() {
                    pos.x += active.distance * (1.0 - ease_out_cubic(progress(&active)));
                }
                let distance = world_setup::sample_float(rng, dash_config.distance);
                dash.motion = Some(DashMotion {
                    distance,
                    duration_ms: dash_config.duration_ms,
                    elapsed_ms: 0.0,
                });
                dash.cooldown_ms = world_setup::sample_delay(rng, dash_config.cooldown) as f64;
                events.push(MatchEvent::TargetDashed {
                    id: info.id,
                    distance,
                });
            }
        }

        if let Some(active) = dash.motion.as_mut() {
            pos.x += step_dash(active, delta_ms);
            if active.elapsed_ms >= active.duration_ms {
                dash.motion = None;
            }
        }

        if pos.y > motion.exit_y {
            info.alive = false;
            log::debug!("target {} escaped at x={:.1}", info.id, pos.x);
            events.push(MatchEvent::TargetEscaped { id: info.id });
            continue;
        }

        *zones = world_setup::zones_at(*pos);
        events.push(MatchEvent::TargetMoved {
            id: info.id,
            position: *pos,
        });
    }
}

/// Lateral displacement contributed by this tick of a dash.
fn step_dash(motion: &mut DashMotion, delta_ms: f64) -> f64 {
    let before = ease_out_cubic(progress(motion));
    motion.elapsed_ms = (motion.elapsed_ms + delta_ms).min(motion.duration_ms);
    let after = ease_out_cubic(progress(motion));
    motion.distance * (after - before)
}

fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

fn progress(motion: &DashMotion) -> f64 {
    if motion.duration_ms <= 0.0 {
        1.0
    } else {
        motion.elapsed_ms / motion.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::config::{DelayRange, MatchConfig};
    use duel_core::constants::DT_MS;
    use rand::SeedableRng;

    use crate::world_setup::{spawn_target, TargetSpec};

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

    fn position_of(world: &World, entity: hecs::Entity) -> Position {
        *world.get::<&Position>(entity).unwrap()
    }

    #[test]
    fn test_forward_and_drift_per_tick() {
        let config = MatchConfig::arena();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut events = Vec::new();
        let entity = spawn_target(
            &mut world,
            TargetSpec {
                drift: 0.5,
                ..still_target(0, 100.0, 130.0)
            },
        );

        for _ in 0..60 {
            run(&mut world, &mut rng, &config.motion, &config.dash, DT_MS, &mut events);
        }

        let pos = position_of(&world, entity);
        assert!((pos.y - (130.0 + 60.0 * 0.9)).abs() < 1e-9, "y = {}", pos.y);
        assert!((pos.x - 130.0).abs() < 1e-9, "x = {}", pos.x);
        assert_eq!(events.len(), 60);
    }

    #[test]
    fn test_zones_follow_position() {
        let config = MatchConfig::arena();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut events = Vec::new();
        let entity = spawn_target(&mut world, still_target(0, 200.0, 300.0));

        run(&mut world, &mut rng, &config.motion, &config.dash, DT_MS, &mut events);

        let pos = position_of(&world, entity);
        let zones = *world.get::<&HitZones>(entity).unwrap();
        let expected = world_setup::zones_at(pos);
        assert_eq!(zones.head, expected.head);
        assert_eq!(zones.body, expected.body);
        assert!(zones.head.contains(&Position::new(pos.x, pos.y - 15.0 * zones.scale)));
    }

    #[test]
    fn test_escape_marks_dead_without_moving_zones() {
        let config = MatchConfig::arena();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut events = Vec::new();
        let exit_y = config.motion.exit_y;
        let entity = spawn_target(&mut world, still_target(4, 150.0, exit_y - 0.5));

        run(&mut world, &mut rng, &config.motion, &config.dash, DT_MS, &mut events);

        assert!(!world.get::<&TargetInfo>(entity).unwrap().alive);
        assert_eq!(events, vec![MatchEvent::TargetEscaped { id: 4 }]);

        // Dead targets are skipped on later ticks.
        events.clear();
        run(&mut world, &mut rng, &config.motion, &config.dash, DT_MS, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_dash_displacement_is_bounded_and_complete() {
        let mut config = MatchConfig::arena();
        config.dash.distance = duel_core::config::FloatRange::new(40.0, 40.0);
        config.dash.cooldown = duel_core::config::DelayRange::new(100_000, 100_000);
        config.motion.forward_speed = 0.0001;

        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut events = Vec::new();
        let entity = spawn_target(
            &mut world,
            TargetSpec {
                dash_enabled: true,
                dash_cooldown_ms: 10.0,
                ..still_target(0, 100.0, 200.0)
            },
        );

        // 150ms dash at 60Hz completes within ten ticks.
        let mut max_x = 0.0f64;
        for _ in 0..12 {
            run(&mut world, &mut rng, &config.motion, &config.dash, DT_MS, &mut events);
            max_x = max_x.max(position_of(&world, entity).x);
        }

        let pos = position_of(&world, entity);
        assert!((pos.x - 140.0).abs() < 1e-9, "x = {}", pos.x);
        assert!(max_x <= 140.0 + 1e-9);
        assert!(world.get::<&Dash>(entity).unwrap().motion.is_none());
        let dashes = events
            .iter()
            .filter(|e| matches!(e, MatchEvent::TargetDashed { .. }))
            .count();
        assert_eq!(dashes, 1);
    }

    #[test]
    fn test_cooldown_after_dash_uses_repeat_range() {
        let mut config = MatchConfig::arena();
        config.dash.probability = 1.0;
        config.dash.initial_cooldown = DelayRange::new(10, 10);
        config.dash.cooldown = DelayRange::new(5000, 5000);

        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut events = Vec::new();
        let spec = world_setup::roll_target(&mut rng, &config, 0);
        assert!(spec.dash_enabled);
        assert_eq!(spec.dash_cooldown_ms, 10.0);
        let entity = spawn_target(&mut world, spec);

        run(&mut world, &mut rng, &config.motion, &config.dash, DT_MS, &mut events);

        let dash = *world.get::<&Dash>(entity).unwrap();
        assert!(dash.motion.is_some(), "first dash should have started");
        assert_eq!(dash.cooldown_ms, 5000.0);
    }

    #[test]
    fn test_disabled_dash_never_fires() {
        let config = MatchConfig::arena();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut events = Vec::new();
        spawn_target(&mut world, still_target(0, 100.0, 130.0));

        for _ in 0..200 {
            run(&mut world, &mut rng, &config.motion, &config.dash, DT_MS, &mut events);
        }
        assert!(!events
            .iter()
            .any(|e| matches!(e, MatchEvent::TargetDashed { .. })));
    }
}
