//! Core types and definitions for the CYBER DUEL match simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, snapshots, events, constants and the match
//! configuration table. It has no dependency on any runtime or renderer.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
