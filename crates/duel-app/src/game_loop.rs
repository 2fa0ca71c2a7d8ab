//! Game loop thread: runs the match engine at 60Hz and publishes snapshots.
//!
//! The engine is moved into the thread and never touched from anywhere
//! else. Commands arrive via `mpsc` channel and are drained at every tick
//! boundary; each snapshot goes out on a second channel.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use duel_core::constants::TICK_RATE;
use duel_core::state::MatchSnapshot;
use duel_sim::SimulationEngine;

use crate::state::{GameLoopCommand, GameLoopHandle};

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread. `time_scale` speeds up (> 1) or
/// slows down (< 1) wall-clock pacing; simulated time per tick is fixed.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    time_scale: f64,
) -> anyhow::Result<GameLoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let (snap_tx, snap_rx) = mpsc::channel::<MatchSnapshot>();

    let thread = std::thread::Builder::new()
        .name("cyber-duel-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, time_scale, cmd_rx, snap_tx);
        })?;

    Ok(GameLoopHandle {
        commands: cmd_tx,
        snapshots: snap_rx,
        thread,
    })
}

/// Wall-clock length of one tick at the given time scale.
fn effective_tick_duration(time_scale: f64) -> Duration {
    if time_scale > 0.001 {
        TICK_DURATION.div_f64(time_scale)
    } else {
        TICK_DURATION
    }
}

/// The game loop. Runs until Shutdown, or until either channel disconnects.
fn run_game_loop(
    mut engine: SimulationEngine,
    time_scale: f64,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    snap_tx: mpsc::Sender<MatchSnapshot>,
) {
    let tick_duration = effective_tick_duration(time_scale);
    let mut next_tick_time = Instant::now();
    log::debug!("game loop started at {:?} per tick", tick_duration);

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Rematch) => {
                    engine.rematch();
                }
                Ok(GameLoopCommand::Shutdown) => {
                    log::debug!("game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one fixed step
        let snapshot = engine.tick();

        // 3. Publish; stop once the receiver is gone
        if snap_tx.send(snapshot).is_err() {
            return;
        }

        // 4. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind: resync rather than burst
            next_tick_time = now;
        }
    }
}
