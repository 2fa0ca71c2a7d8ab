//! Entity spawn factories and target geometry.
//!
//! Every target is created with its complete component bundle; drift and
//! dash parameters are sampled here, once, at spawn.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use duel_core::components::*;
use duel_core::config::{DelayRange, FloatRange, MatchConfig};
use duel_core::constants::*;
use duel_core::enums::TargetKind;
use duel_core::types::{Position, Rect};

/// Everything needed to place one target.
#[derive(Debug, Clone, Copy)]
pub struct TargetSpec {
    pub id: u32,
    pub kind: TargetKind,
    pub position: Position,
    pub drift: f64,
    pub dash_enabled: bool,
    pub dash_cooldown_ms: f64,
}

/// Sample a new target from the spawn band with randomized behaviour.
pub fn roll_target(rng: &mut ChaCha8Rng, config: &MatchConfig, id: u32) -> TargetSpec {
    let x = sample_float(rng, config.spawn.band);
    TargetSpec {
        id,
        kind: config.spawn.kind,
        position: Position::new(x, config.spawn.row_y),
        drift: sample_float(rng, config.motion.drift),
        dash_enabled: rng.gen_bool(config.dash.probability.clamp(0.0, 1.0)),
        dash_cooldown_ms: sample_delay(rng, config.dash.initial_cooldown) as f64,
    }
}

/// Spawn a target entity from a spec.
pub fn spawn_target(world: &mut World, spec: TargetSpec) -> hecs::Entity {
    world.spawn((
        Target,
        TargetInfo {
            id: spec.id,
            kind: spec.kind,
            alive: true,
        },
        spec.position,
        Drift {
            per_frame: spec.drift,
        },
        Dash {
            enabled: spec.dash_enabled,
            cooldown_ms: spec.dash_cooldown_ms,
            motion: None,
        },
        zones_at(spec.position),
    ))
}

/// Depth scale for a target at `y`; targets grow as they approach.
pub fn depth_scale(y: f64) -> f64 {
    (y / DEPTH_SCALE_REFERENCE_Y).clamp(DEPTH_SCALE_MIN, DEPTH_SCALE_MAX)
}

/// Head and body rectangles for a target whose origin is at `position`.
///
/// The body is clipped at the head's lower edge so the zones only share
/// that edge; head wins on the shared edge because it is tested first.
pub fn zones_at(position: Position) -> HitZones {
    let scale = depth_scale(position.y);

    let head = Rect::from_center(
        Position::new(position.x, position.y + HEAD_OFFSET_Y * scale),
        HEAD_HALF_SIZE * scale,
        HEAD_HALF_SIZE * scale,
    );
    let mut body = Rect::from_center(
        Position::new(position.x, position.y + BODY_OFFSET_Y * scale),
        BODY_HALF_WIDTH * scale,
        BODY_HALF_HEIGHT * scale,
    );
    body.min_y = body.min_y.max(head.max_y);

    HitZones { head, body, scale }
}

/// Uniform integer delay, inclusive on both ends.
pub fn sample_delay(rng: &mut ChaCha8Rng, range: DelayRange) -> u32 {
    if range.min_ms >= range.max_ms {
        return range.min_ms;
    }
    rng.gen_range(range.min_ms..=range.max_ms)
}

/// Uniform continuous value, inclusive on both ends.
pub fn sample_float(rng: &mut ChaCha8Rng, range: FloatRange) -> f64 {
    if range.min >= range.max {
        return range.min;
    }
    rng.gen_range(range.min..=range.max)
}
