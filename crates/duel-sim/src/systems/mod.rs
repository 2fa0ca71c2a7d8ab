//! Per-tick systems operating on the match world.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only)
//! plus the engine-owned state they need passed in explicitly.

pub mod cleanup;
pub mod hit_resolver;
pub mod match_clock;
pub mod motion;
pub mod snapshot;
pub mod spawn_scheduler;
