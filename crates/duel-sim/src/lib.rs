//! Match simulation for CYBER DUEL.
//!
//! Owns the hecs ECS world, runs the match systems per step, and produces
//! `MatchSnapshot`s for whatever host drives it.

pub mod engine;
pub mod high_score;
pub mod match_state;
pub mod summary;
pub mod systems;
pub mod world_setup;

pub use duel_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use high_score::{FileHighScore, HighScoreError, HighScoreStore, MemoryHighScore};
