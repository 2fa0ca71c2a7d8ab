//! Messages and handles shared between the host and the game loop thread.

use std::sync::mpsc;
use std::thread::JoinHandle;

use anyhow::anyhow;

use duel_core::commands::PlayerCommand;
use duel_core::state::MatchSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the engine.
    Player(PlayerCommand),
    /// Discard the finished match and return to Idle. Ignored before Ended.
    Rematch,
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Host side of a running game loop.
///
/// Snapshots arrive on `snapshots` once per tick. Dropping the receiver
/// also stops the loop.
pub struct GameLoopHandle {
    pub commands: mpsc::Sender<GameLoopCommand>,
    pub snapshots: mpsc::Receiver<MatchSnapshot>,
    pub(crate) thread: JoinHandle<()>,
}

impl GameLoopHandle {
    pub fn send(&self, command: PlayerCommand) -> anyhow::Result<()> {
        self.commands
            .send(GameLoopCommand::Player(command))
            .map_err(|_| anyhow!("game loop has stopped"))
    }

    pub fn rematch(&self) -> anyhow::Result<()> {
        self.commands
            .send(GameLoopCommand::Rematch)
            .map_err(|_| anyhow!("game loop has stopped"))
    }

    /// Ask the loop to stop and wait for the thread to exit.
    pub fn shutdown(self) -> anyhow::Result<()> {
        // The loop may already be gone; joining is what matters.
        let _ = self.commands.send(GameLoopCommand::Shutdown);
        self.thread
            .join()
            .map_err(|_| anyhow!("game loop thread panicked"))
    }
}
