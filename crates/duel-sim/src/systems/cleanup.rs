//! Cleanup system: removes targets that were hit or escaped.

use hecs::{Entity, World};

use duel_core::components::{Target, TargetInfo};

/// Despawn every target whose `alive` flag is cleared.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (info, _target)) in world.query_mut::<(&TargetInfo, &Target)>() {
        if !info.alive {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Remove every target, live or not. Returns how many were removed.
pub fn clear_all(world: &mut World, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();
    despawn_buffer.extend(
        world
            .query_mut::<&Target>()
            .into_iter()
            .map(|(entity, _)| entity),
    );

    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    removed
}
