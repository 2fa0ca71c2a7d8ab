//! Match controller.
//!
//! `SimulationEngine` owns the hecs world, the match state and the timers,
//! processes player commands, runs the systems in a fixed order, and
//! produces a `MatchSnapshot` every step. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use duel_core::commands::PlayerCommand;
use duel_core::config::MatchConfig;
use duel_core::constants::DT_MS;
use duel_core::enums::{MatchPhase, SceneTarget};
use duel_core::events::MatchEvent;
use duel_core::state::{MatchSnapshot, MatchSummary};
use duel_core::types::{Position, SimTime};

use crate::high_score::HighScoreStore;
use crate::match_state::MatchState;
use crate::summary;
use crate::systems;
use crate::systems::hit_resolver::ShotOutcome;
use crate::systems::match_clock::MatchClock;
use crate::systems::spawn_scheduler::SpawnScheduler;

/// Configuration for a new engine.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same match.
    pub seed: u64,
    pub match_config: MatchConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            match_config: MatchConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all match state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    config: MatchConfig,
    rng: ChaCha8Rng,
    state: MatchState,
    clock: MatchClock,
    spawner: SpawnScheduler,
    next_target_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<MatchEvent>,

    store: Box<dyn HighScoreStore + Send>,
    /// Persisted value read at match start.
    high_score_at_start: u32,
    /// Best known score; updated at match end when beaten.
    high_score: u32,
    summary: Option<MatchSummary>,
}

impl SimulationEngine {
    pub fn new(config: SimConfig, store: Box<dyn HighScoreStore + Send>) -> Self {
        let match_config = config.match_config;
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            state: MatchState::new(match_config.duration_secs),
            clock: MatchClock::new(match_config.urgency_threshold_secs),
            spawner: SpawnScheduler::default(),
            next_target_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            store,
            high_score_at_start: 0,
            high_score: 0,
            summary: None,
            config: match_config,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by one fixed 60 Hz step.
    pub fn tick(&mut self) -> MatchSnapshot {
        self.advance(DT_MS)
    }

    /// Advance by `delta_ms` of wall time and return the resulting snapshot.
    ///
    /// Queued commands resolve first, against the geometry of the previous
    /// step. Then, while Active: clock, spawner, motion, cleanup.
    pub fn advance(&mut self, delta_ms: f64) -> MatchSnapshot {
        let delta_ms = delta_ms.max(0.0);
        self.process_commands();

        if self.state.phase == MatchPhase::Active {
            self.run_systems(delta_ms);
            self.time.advance(delta_ms);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.state,
            self.high_score,
            events,
            self.summary.as_ref(),
        )
    }

    /// Throw away the finished match and return to Idle. RNG, configuration
    /// and the high-score store carry over; the host follows with `StartMatch`.
    /// Only honoured once Ended; returns whether the reset happened.
    pub fn rematch(&mut self) -> bool {
        if self.state.phase != MatchPhase::Ended {
            log::warn!("rematch ignored in {:?}", self.state.phase);
            return false;
        }
        self.world.clear();
        self.time = SimTime::default();
        self.state = MatchState::new(self.config.duration_secs);
        self.clock = MatchClock::new(self.config.urgency_threshold_secs);
        self.spawner = SpawnScheduler::default();
        self.next_target_id = 0;
        self.summary = None;
        log::debug!("engine reset for rematch");
        true
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Present once the match has ended.
    pub fn summary(&self) -> Option<&MatchSummary> {
        self.summary.as_ref()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Place a stationary, non-dashing target (for tests).
    #[cfg(test)]
    pub fn spawn_test_target(&mut self, x: f64, y: f64) -> u32 {
        use crate::world_setup::{spawn_target, TargetSpec};

        let id = self.next_target_id;
        self.next_target_id += 1;
        spawn_target(
            &mut self.world,
            TargetSpec {
                id,
                kind: self.config.spawn.kind,
                position: Position::new(x, y),
                drift: 0.0,
                dash_enabled: false,
                dash_cooldown_ms: 0.0,
            },
        );
        id
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMatch => {
                if self.state.phase == MatchPhase::Idle {
                    self.start_match();
                } else {
                    log::warn!("start ignored in {:?}", self.state.phase);
                }
            }
            PlayerCommand::Fire { x, y } => {
                let outcome = systems::hit_resolver::resolve(
                    &mut self.world,
                    &mut self.state,
                    Position::new(x, y),
                    &mut self.events,
                );
                if outcome == ShotOutcome::Ignored {
                    log::warn!("shot at ({x:.1}, {y:.1}) ignored in {:?}", self.state.phase);
                }
            }
            PlayerCommand::RequestTransition { target } => {
                if self.state.phase == MatchPhase::Ended {
                    self.request_transition(target);
                } else {
                    log::warn!("transition to {target:?} ignored in {:?}", self.state.phase);
                }
            }
        }
    }

    fn start_match(&mut self) {
        self.high_score_at_start = self.load_high_score();
        self.high_score = self.high_score_at_start;

        self.world.clear();
        self.time = SimTime::default();
        self.state = MatchState::new(self.config.duration_secs);
        self.state.phase = MatchPhase::Active;
        self.clock = MatchClock::new(self.config.urgency_threshold_secs);
        self.spawner
            .start(&mut self.rng, &self.config.spawn.tiers, self.state.time_left_secs);
        self.next_target_id = 0;
        self.summary = None;

        log::info!(
            "match started: {}s, high score {}",
            self.config.duration_secs,
            self.high_score
        );
        self.events.push(MatchEvent::MatchStarted {
            duration_secs: self.config.duration_secs,
            high_score: self.high_score,
        });
    }

    /// Missing or unreadable values count as 0.
    fn load_high_score(&self) -> u32 {
        match self.store.load() {
            Ok(value) => value.unwrap_or(0),
            Err(err) => {
                log::warn!("failed to read high score, using 0: {err}");
                0
            }
        }
    }

    fn run_systems(&mut self, delta_ms: f64) {
        // 1. Clock; expiry ends the match before anything else moves.
        if self
            .clock
            .advance(delta_ms, &mut self.state, &mut self.events)
        {
            self.end_match();
        }
        // 2. Spawner (stops itself once the phase has left Active)
        systems::spawn_scheduler::run(
            &mut self.world,
            &mut self.rng,
            &mut self.spawner,
            &self.state,
            &self.config,
            &mut self.next_target_id,
            &mut self.events,
            delta_ms,
        );
        if self.state.phase != MatchPhase::Active {
            return;
        }
        // 3. Motion, escapes, zone refresh
        systems::motion::run(
            &mut self.world,
            &mut self.rng,
            &self.config.motion,
            &self.config.dash,
            delta_ms,
            &mut self.events,
        );
        // 4. Cleanup (hit and escaped targets)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    /// Active -> Ended. Runs once, from clock expiry only.
    fn end_match(&mut self) {
        if self.state.phase != MatchPhase::Active {
            return;
        }
        self.state.phase = MatchPhase::Ended;
        systems::cleanup::clear_all(&mut self.world, &mut self.despawn_buffer);

        let summary = summary::summarize(&self.state, self.high_score_at_start);
        if summary.new_high_score {
            match self.store.save(summary.score) {
                Ok(()) => log::info!(
                    "new high score {} (was {})",
                    summary.score,
                    summary.previous_high_score
                ),
                Err(err) => log::warn!("failed to save high score {}: {err}", summary.score),
            }
        }
        self.high_score = summary.high_score;

        log::info!(
            "match ended: score {}, accuracy {}%, grade {:?}",
            summary.score,
            summary.accuracy,
            summary.grade
        );
        self.events.push(MatchEvent::MatchEnded {
            summary: summary.clone(),
        });
        self.summary = Some(summary);
    }

    fn request_transition(&mut self, target: SceneTarget) {
        log::debug!("transition requested: {target:?}");
        self.events.push(MatchEvent::TransitionRequested { target });
    }
}
