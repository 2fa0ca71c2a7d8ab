//! Scripted player for the demo binary and soak tests.

use duel_core::commands::PlayerCommand;
use duel_core::enums::MatchPhase;
use duel_core::state::MatchSnapshot;

/// Vertical coordinate no target can ever occupy (targets spawn at y = 130
/// and only move down).
const MISS_Y: f64 = 2.0;

/// Deterministic bot: waits `reaction_ticks` between shots, aims at the
/// head of the oldest live target, and deliberately misses every
/// `miss_every`-th shot.
#[derive(Debug, Clone)]
pub struct AimBot {
    reaction_ticks: u32,
    miss_every: u32,
    shots: u32,
    cooldown: u32,
}

impl Default for AimBot {
    fn default() -> Self {
        Self::new(12, 5)
    }
}

impl AimBot {
    /// `miss_every == 0` never misses on purpose.
    pub fn new(reaction_ticks: u32, miss_every: u32) -> Self {
        Self {
            reaction_ticks,
            miss_every,
            shots: 0,
            cooldown: reaction_ticks,
        }
    }

    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Look at one snapshot and maybe fire.
    pub fn decide(&mut self, snapshot: &MatchSnapshot) -> Option<PlayerCommand> {
        if snapshot.phase != MatchPhase::Active {
            return None;
        }
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return None;
        }
        let target = snapshot.targets.first()?;

        self.shots += 1;
        self.cooldown = self.reaction_ticks;

        let aim = target.head.center();
        let deliberate_miss = self.miss_every > 0 && self.shots % self.miss_every == 0;
        let y = if deliberate_miss { MISS_Y } else { aim.y };
        Some(PlayerCommand::Fire { x: aim.x, y })
    }
}
