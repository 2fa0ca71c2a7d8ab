//! CYBER DUEL host application.
//!
//! Runs the match engine on its own thread and exposes a channel-based
//! handle to whatever drives it (the demo binary, a renderer, tests).

pub mod bot;
pub mod game_loop;
pub mod state;

pub use duel_core as core;
