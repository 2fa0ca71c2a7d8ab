//! Match clock: one-second countdown that drives late-match escalation
//! and requests the end of the match.

use duel_core::constants::CLOCK_INTERVAL_MS;
use duel_core::enums::MatchPhase;
use duel_core::events::MatchEvent;

use crate::match_state::MatchState;

/// Result of one clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    pub time_left_secs: u32,
    /// True only on the tick that first entered the urgent window.
    pub urgency_started: bool,
    /// True only on the tick that ran out the clock.
    pub expired: bool,
}

#[derive(Debug, Clone)]
pub struct MatchClock {
    urgency_threshold_secs: u32,
    /// Milliseconds until the next one-second tick.
    until_next_ms: f64,
    expired: bool,
}

impl MatchClock {
    pub fn new(urgency_threshold_secs: u32) -> Self {
        Self {
            urgency_threshold_secs,
            until_next_ms: CLOCK_INTERVAL_MS,
            expired: false,
        }
    }

    pub fn expired(&self) -> bool {
        self.expired
    }

    /// One elapsed second. No-op once expired or outside Active.
    pub fn tick(&mut self, state: &mut MatchState) -> Option<ClockTick> {
        if self.expired || state.phase != MatchPhase::Active {
            return None;
        }

        state.time_left_secs = state.time_left_secs.saturating_sub(1);

        let urgency_started =
            !state.urgent && state.time_left_secs <= self.urgency_threshold_secs;
        if urgency_started {
            state.urgent = true;
        }

        let expired = state.time_left_secs == 0;
        if expired {
            self.expired = true;
        }

        Some(ClockTick {
            time_left_secs: state.time_left_secs,
            urgency_started,
            expired,
        })
    }

    /// Feed elapsed time; fires one tick per whole second, catching up on
    /// long frames. Returns true if the clock expired during this call.
    pub fn advance(
        &mut self,
        delta_ms: f64,
        state: &mut MatchState,
        events: &mut Vec<MatchEvent>,
    ) -> bool {
        if self.expired || state.phase != MatchPhase::Active {
            return false;
        }

        self.until_next_ms -= delta_ms;
        while self.until_next_ms <= 0.0 {
            self.until_next_ms += CLOCK_INTERVAL_MS;

            let Some(tick) = self.tick(state) else {
                break;
            };
            events.push(MatchEvent::MatchTick {
                time_left_secs: tick.time_left_secs,
            });
            if tick.urgency_started {
                log::debug!("urgency window opened at {}s", tick.time_left_secs);
                events.push(MatchEvent::UrgencyStarted {
                    time_left_secs: tick.time_left_secs,
                });
            }
            if tick.expired {
                return true;
            }
        }
        false
    }
}
