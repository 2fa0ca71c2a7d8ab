//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::SceneTarget;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start the match. Only honoured while Idle.
    StartMatch,
    /// Fire at a playfield point. Ignored unless Active.
    Fire { x: f64, y: f64 },
    /// Summary screen navigation. Only honoured once Ended.
    RequestTransition { target: SceneTarget },
}
