//! Match parameter table.
//!
//! The casual and ranked scenes of the game share one state machine and
//! differ only in tuning. Every value that differs between them lives here;
//! `MatchConfig::arena()` is the tiered default and `MatchConfig::classic()`
//! reproduces the casual scene tuning.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::TargetKind;

/// Errors produced when loading or validating a `MatchConfig`.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid range for {field}: min {min} exceeds max {max}")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{field} must be within [0, 1], got {value}")]
    InvalidProbability { field: &'static str, value: f64 },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must equal {expected}, got {value}")]
    Mismatch {
        field: &'static str,
        expected: u32,
        value: u32,
    },

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Inclusive integer millisecond range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: u32,
    pub max_ms: u32,
}

/// Inclusive continuous range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub min: f64,
    pub max: f64,
}

/// Spawn delay tiers keyed by remaining match time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTiers {
    /// Used while `time_left > mid_at_secs`.
    pub baseline: DelayRange,
    /// Used while `late_at_secs < time_left <= mid_at_secs`.
    pub mid: DelayRange,
    /// Used while `time_left <= late_at_secs`.
    pub late: DelayRange,
    pub mid_at_secs: u32,
    pub late_at_secs: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub tiers: SpawnTiers,
    /// Horizontal spawn band.
    pub band: FloatRange,
    /// Vertical spawn row.
    pub row_y: f64,
    pub kind: TargetKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Forward travel per reference frame.
    pub forward_speed: f64,
    /// Lateral drift per reference frame, sampled once per target.
    pub drift: FloatRange,
    /// y beyond which a target escapes.
    pub exit_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Chance a target is spawned with dashing enabled.
    pub probability: f64,
    /// Cooldown before the first dash.
    pub initial_cooldown: DelayRange,
    /// Cooldown sampled after every dash.
    pub cooldown: DelayRange,
    /// Lateral displacement of one dash.
    pub distance: FloatRange,
    /// Time over which the displacement is applied.
    pub duration_ms: f64,
}

/// Complete tuning for one match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub duration_secs: u32,
    pub urgency_threshold_secs: u32,
    pub spawn: SpawnConfig,
    pub motion: MotionConfig,
    pub dash: DashConfig,
}

impl DelayRange {
    pub const fn new(min_ms: u32, max_ms: u32) -> Self {
        Self { min_ms, max_ms }
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min_ms > self.max_ms {
            return Err(ConfigError::InvalidRange {
                field,
                min: self.min_ms as f64,
                max: self.max_ms as f64,
            });
        }
        Ok(())
    }
}

impl FloatRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        // Also rejects NaN bounds.
        if !(self.min <= self.max) {
            return Err(ConfigError::InvalidRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl SpawnTiers {
    /// Delay range for the next spawn given the remaining match time.
    pub fn delay_range(&self, time_left_secs: u32) -> DelayRange {
        if time_left_secs <= self.late_at_secs {
            self.late
        } else if time_left_secs <= self.mid_at_secs {
            self.mid
        } else {
            self.baseline
        }
    }
}

impl Default for SpawnTiers {
    fn default() -> Self {
        Self {
            baseline: DelayRange::new(600, 1000),
            mid: DelayRange::new(350, 700),
            late: DelayRange::new(150, 350),
            mid_at_secs: 10,
            late_at_secs: 5,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            tiers: SpawnTiers::default(),
            band: FloatRange::new(SPAWN_BAND_MIN_X, SPAWN_BAND_MAX_X),
            row_y: SPAWN_ROW_Y,
            kind: TargetKind::Soldier,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            forward_speed: FORWARD_SPEED,
            drift: FloatRange::new(-0.6, 0.6),
            exit_y: EXIT_THRESHOLD_Y,
        }
    }
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            probability: 0.35,
            initial_cooldown: DelayRange::new(600, 1200),
            cooldown: DelayRange::new(900, 1500),
            distance: FloatRange::new(-60.0, 60.0),
            duration_ms: 150.0,
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::arena()
    }
}

impl MatchConfig {
    /// Tiered spawn table with the more aggressive dash settings.
    pub fn arena() -> Self {
        Self {
            duration_secs: DEFAULT_MATCH_DURATION_SECS,
            urgency_threshold_secs: DEFAULT_URGENCY_THRESHOLD_SECS,
            spawn: SpawnConfig::default(),
            motion: MotionConfig::default(),
            dash: DashConfig::default(),
        }
    }

    /// Casual scene tuning: wider baseline spawn delay,
    /// 30% dash chance, slower dash cooldowns.
    pub fn classic() -> Self {
        let mut config = Self::arena();
        config.spawn.tiers.baseline = DelayRange::new(400, 1100);
        config.dash.probability = 0.30;
        config.dash.initial_cooldown = DelayRange::new(800, 1500);
        config.dash.cooldown = DelayRange::new(1200, 2000);
        config
    }

    /// Same tuning with ranked-mode enemies.
    pub fn ranked(mut self) -> Self {
        self.spawn.kind = TargetKind::Ninja;
        self
    }

    /// Parse a (possibly partial) JSON table and validate it.
    /// Missing fields take their `arena()` values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every range is ordered, every probability is in [0, 1],
    /// and the late spawn tier starts with the urgent window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tiers = &self.spawn.tiers;
        tiers.baseline.validate("spawn.tiers.baseline")?;
        tiers.mid.validate("spawn.tiers.mid")?;
        tiers.late.validate("spawn.tiers.late")?;
        if tiers.late_at_secs > tiers.mid_at_secs {
            return Err(ConfigError::InvalidRange {
                field: "spawn.tiers.late_at_secs",
                min: tiers.late_at_secs as f64,
                max: tiers.mid_at_secs as f64,
            });
        }
        // The urgent window and the late spawn tier are the same window.
        if tiers.late_at_secs != self.urgency_threshold_secs {
            return Err(ConfigError::Mismatch {
                field: "spawn.tiers.late_at_secs",
                expected: self.urgency_threshold_secs,
                value: tiers.late_at_secs,
            });
        }
        if tiers.baseline.max_ms == 0 || tiers.mid.max_ms == 0 || tiers.late.max_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "spawn.tiers",
                value: 0.0,
            });
        }
        self.spawn.band.validate("spawn.band")?;
        self.motion.drift.validate("motion.drift")?;
        self.dash.initial_cooldown.validate("dash.initial_cooldown")?;
        self.dash.cooldown.validate("dash.cooldown")?;
        self.dash.distance.validate("dash.distance")?;

        if !(0.0..=1.0).contains(&self.dash.probability) {
            return Err(ConfigError::InvalidProbability {
                field: "dash.probability",
                value: self.dash.probability,
            });
        }
        if !(self.dash.duration_ms > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "dash.duration_ms",
                value: self.dash.duration_ms,
            });
        }
        if !(self.motion.forward_speed > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "motion.forward_speed",
                value: self.motion.forward_speed,
            });
        }
        Ok(())
    }
}
