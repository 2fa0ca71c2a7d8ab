//! Headless CYBER DUEL demo: plays one match with the aim bot and prints
//! the summary.
//!
//! Usage: `cyber-duel [match-config.json]`. Set `DUEL_HIGHSCORE_PATH` to
//! persist the high score to a JSON file; otherwise it lives in memory.

use std::time::Duration;

use anyhow::{bail, Context};
use log::{info, LevelFilter};

use duel_app::bot::AimBot;
use duel_app::game_loop::spawn_game_loop;
use duel_core::commands::PlayerCommand;
use duel_core::config::MatchConfig;
use duel_core::enums::{MatchPhase, SceneTarget};
use duel_core::events::MatchEvent;
use duel_sim::{FileHighScore, HighScoreStore, MemoryHighScore, SimConfig, SimulationEngine};

/// Demo runs at this multiple of real time.
const DEMO_TIME_SCALE: f64 = 4.0;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let match_config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading match config {path}"))?;
            MatchConfig::from_json_str(&json)
                .with_context(|| format!("parsing match config {path}"))?
        }
        None => MatchConfig::default(),
    };

    let store: Box<dyn HighScoreStore + Send> = match std::env::var("DUEL_HIGHSCORE_PATH") {
        Ok(path) => {
            info!("high score file: {path}");
            Box::new(FileHighScore::new(path))
        }
        Err(_) => Box::new(MemoryHighScore::new()),
    };

    let engine = SimulationEngine::new(
        SimConfig {
            match_config,
            ..Default::default()
        },
        store,
    );
    let handle = spawn_game_loop(engine, DEMO_TIME_SCALE)?;
    let mut bot = AimBot::default();

    info!("CYBER DUEL starting ({}s match)", match_config.duration_secs);
    handle.send(PlayerCommand::StartMatch)?;

    let summary = loop {
        let snapshot = handle
            .snapshots
            .recv_timeout(Duration::from_secs(5))
            .context("game loop stopped responding")?;

        if snapshot.phase == MatchPhase::Ended {
            match snapshot.summary {
                Some(summary) => break summary,
                None => bail!("match ended without a summary"),
            }
        }
        if let Some(command) = bot.decide(&snapshot) {
            handle.send(command)?;
        }
    };

    info!("match summary:\n{}", serde_json::to_string_pretty(&summary)?);
    if summary.new_high_score {
        info!("new high score: {}", summary.high_score);
    }

    handle.send(PlayerCommand::RequestTransition {
        target: SceneTarget::Menu,
    })?;
    loop {
        let snapshot = handle
            .snapshots
            .recv_timeout(Duration::from_secs(5))
            .context("game loop stopped responding")?;
        if snapshot
            .events
            .iter()
            .any(|e| matches!(e, MatchEvent::TransitionRequested { .. }))
        {
            info!("returning to menu");
            break;
        }
    }

    handle.shutdown()
}
