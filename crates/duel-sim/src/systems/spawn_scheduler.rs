//! Spawn scheduler: a self-rescheduling one-shot timer that drops a new
//! target into the playfield on each firing.
//!
//! The delay before the next firing is drawn from the tier matching the
//! remaining match time, so spawns speed up as the clock runs down.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use duel_core::config::{MatchConfig, SpawnTiers};
use duel_core::enums::MatchPhase;
use duel_core::events::MatchEvent;

use crate::match_state::MatchState;
use crate::world_setup;

#[derive(Debug, Clone, Default)]
pub struct SpawnScheduler {
    /// Milliseconds until the pending firing. `None` when nothing is scheduled.
    pending_ms: Option<f64>,
    stopped: bool,
}

impl SpawnScheduler {
    /// Schedule the first firing.
    pub fn start(&mut self, rng: &mut ChaCha8Rng, tiers: &SpawnTiers, time_left_secs: u32) {
        self.stopped = false;
        self.pending_ms = Some(next_delay_ms(rng, tiers, time_left_secs));
    }

    /// Stopped schedulers never fire again.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn pending_ms(&self) -> Option<f64> {
        self.pending_ms
    }

    fn stop(&mut self) {
        self.stopped = true;
        self.pending_ms = None;
    }
}

/// Delay before the next firing, in milliseconds (at least 1).
pub fn next_delay_ms(rng: &mut ChaCha8Rng, tiers: &SpawnTiers, time_left_secs: u32) -> f64 {
    let range = tiers.delay_range(time_left_secs);
    world_setup::sample_delay(rng, range).max(1) as f64
}

/// Run the scheduler for `delta_ms`. Each firing that comes due while the
/// match is Active spawns one target and reschedules; a firing outside
/// Active stops the scheduler for good.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scheduler: &mut SpawnScheduler,
    state: &MatchState,
    config: &MatchConfig,
    next_target_id: &mut u32,
    events: &mut Vec<MatchEvent>,
    delta_ms: f64,
) {
    if scheduler.stopped {
        return;
    }
    let Some(mut remaining) = scheduler.pending_ms else {
        return;
    };

    remaining -= delta_ms;
    while remaining <= 0.0 {
        if state.phase != MatchPhase::Active {
            scheduler.stop();
            return;
        }

        let id = *next_target_id;
        *next_target_id += 1;
        let spec = world_setup::roll_target(rng, config, id);
        world_setup::spawn_target(world, spec);

        log::debug!(
            "spawned target {} at x={:.1} (drift {:.2}, dash {})",
            id,
            spec.position.x,
            spec.drift,
            spec.dash_enabled
        );
        events.push(MatchEvent::TargetSpawned {
            id,
            kind: spec.kind,
            position: spec.position,
        });

        remaining += next_delay_ms(rng, &config.spawn.tiers, state.time_left_secs);
    }
    scheduler.pending_ms = Some(remaining);
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::components::TargetInfo;
    use rand::SeedableRng;

    fn active_state(time_left: u32) -> MatchState {
        let mut state = MatchState::new(time_left);
        state.phase = MatchPhase::Active;
        state
    }

    fn mean_delay(rng: &mut ChaCha8Rng, tiers: &SpawnTiers, time_left: u32) -> f64 {
        let samples = 2000;
        (0..samples)
            .map(|_| next_delay_ms(rng, tiers, time_left))
            .sum::<f64>()
            / samples as f64
    }

    #[test]
    fn test_spawn_rate_increases_toward_end() {
        for config in [MatchConfig::arena(), MatchConfig::classic()] {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            let tiers = config.spawn.tiers;
            let early = mean_delay(&mut rng, &tiers, 15);
            let middle = mean_delay(&mut rng, &tiers, 8);
            let late = mean_delay(&mut rng, &tiers, 3);
            assert!(late < middle, "late {late} should be < middle {middle}");
            assert!(middle < early, "middle {middle} should be < early {early}");
        }
    }

    #[test]
    fn test_delays_stay_in_tier() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let tiers = MatchConfig::arena().spawn.tiers;
        for (time_left, lo, hi) in [(20, 600.0, 1000.0), (10, 350.0, 700.0), (5, 150.0, 350.0)] {
            for _ in 0..500 {
                let d = next_delay_ms(&mut rng, &tiers, time_left);
                assert!((lo..=hi).contains(&d), "delay {d} outside [{lo}, {hi}]");
            }
        }
    }

    #[test]
    fn test_fires_and_reschedules() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = MatchConfig::arena();
        let state = active_state(20);
        let mut scheduler = SpawnScheduler::default();
        let mut next_id = 0;
        let mut events = Vec::new();

        scheduler.start(&mut rng, &config.spawn.tiers, state.time_left_secs);
        let first = scheduler.pending_ms().unwrap();
        assert!((600.0..=1000.0).contains(&first));

        run(
            &mut world,
            &mut rng,
            &mut scheduler,
            &state,
            &config,
            &mut next_id,
            &mut events,
            first - 1.0,
        );
        assert_eq!(next_id, 0, "not due yet");

        run(
            &mut world,
            &mut rng,
            &mut scheduler,
            &state,
            &config,
            &mut next_id,
            &mut events,
            1.0,
        );
        assert_eq!(next_id, 1);
        assert_eq!(world.query::<&TargetInfo>().iter().count(), 1);
        assert!(matches!(events[0], MatchEvent::TargetSpawned { id: 0, .. }));
        assert!(scheduler.pending_ms().unwrap() > 0.0);
    }

    #[test]
    fn test_spawns_inside_band() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let config = MatchConfig::arena();
        let state = active_state(20);
        let mut scheduler = SpawnScheduler::default();
        let mut next_id = 0;
        let mut events = Vec::new();

        scheduler.start(&mut rng, &config.spawn.tiers, 20);
        // Ten simulated seconds in one go: catch-up fires repeatedly.
        run(
            &mut world,
            &mut rng,
            &mut scheduler,
            &state,
            &config,
            &mut next_id,
            &mut events,
            10_000.0,
        );
        assert!(next_id >= 10, "expected at least 10 spawns, got {next_id}");

        for event in &events {
            if let MatchEvent::TargetSpawned { position, .. } = event {
                assert!(position.x >= config.spawn.band.min && position.x <= config.spawn.band.max);
                assert_eq!(position.y, config.spawn.row_y);
            }
        }
    }

    #[test]
    fn test_stops_permanently_outside_active() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = MatchConfig::arena();
        let mut state = active_state(20);
        let mut scheduler = SpawnScheduler::default();
        let mut next_id = 0;
        let mut events = Vec::new();

        scheduler.start(&mut rng, &config.spawn.tiers, 20);
        state.phase = MatchPhase::Ended;
        run(
            &mut world,
            &mut rng,
            &mut scheduler,
            &state,
            &config,
            &mut next_id,
            &mut events,
            2000.0,
        );
        assert!(scheduler.is_stopped());
        assert_eq!(next_id, 0);

        state.phase = MatchPhase::Active;
        run(
            &mut world,
            &mut rng,
            &mut scheduler,
            &state,
            &config,
            &mut next_id,
            &mut events,
            2000.0,
        );
        assert_eq!(next_id, 0, "a stopped scheduler never fires again");
    }
}
