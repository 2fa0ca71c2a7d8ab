//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components. Every target is spawned
//! with the full bundle (`Target`, `TargetInfo`, `Position`, `Drift`,
//! `Dash`, `HitZones`); nothing is attached after spawn.

use serde::{Deserialize, Serialize};

use crate::enums::TargetKind;
use crate::types::Rect;

/// Marks an entity as a shootable target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Target;

/// Identity and liveness of a target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetInfo {
    /// Unique per spawn; increasing ids give spawn order.
    pub id: u32,
    pub kind: TargetKind,
    /// Cleared on a hit or escape. Never set again once cleared.
    pub alive: bool,
}

/// Constant lateral velocity, units per reference frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Drift {
    pub per_frame: f64,
}

/// Probabilistic sideways dash behaviour.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Dash {
    /// Sampled once at spawn.
    pub enabled: bool,
    /// Milliseconds until the next dash starts.
    pub cooldown_ms: f64,
    /// Dash currently being applied, if any.
    pub motion: Option<DashMotion>,
}

/// A single dash spread over a short duration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DashMotion {
    /// Total lateral displacement of the dash.
    pub distance: f64,
    pub duration_ms: f64,
    pub elapsed_ms: f64,
}

/// Current-frame hit geometry, recomputed from position every tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HitZones {
    pub head: Rect,
    pub body: Rect,
    /// Depth scale the zones were built with.
    pub scale: f64,
}
