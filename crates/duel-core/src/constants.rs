//! Simulation constants and tuning parameters.
//!
//! Values that vary between match variants live in `config::MatchConfig`;
//! everything here is shared by all variants.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Milliseconds per tick.
pub const DT_MS: f64 = 1000.0 / TICK_RATE as f64;

/// Frame duration that per-tick speeds are expressed against (60 Hz).
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

/// Match clock interval in milliseconds.
pub const CLOCK_INTERVAL_MS: f64 = 1000.0;

// --- Playfield ---

/// Playfield width in simulation units.
pub const PLAYFIELD_WIDTH: f64 = 360.0;


// --- Match defaults ---

/// Default match length in seconds.
pub const DEFAULT_MATCH_DURATION_SECS: u32 = 20;

/// Remaining seconds at or below which the match becomes urgent.
pub const DEFAULT_URGENCY_THRESHOLD_SECS: u32 = 5;

/// Distance between each playfield side and the spawn band.
pub const SPAWN_BAND_INSET: f64 = 80.0;

/// Spawn band left edge.
pub const SPAWN_BAND_MIN_X: f64 = SPAWN_BAND_INSET;

/// Spawn band right edge.
pub const SPAWN_BAND_MAX_X: f64 = PLAYFIELD_WIDTH - SPAWN_BAND_INSET;

/// Fixed vertical spawn row.
pub const SPAWN_ROW_Y: f64 = 130.0;

/// Targets whose y passes this line have reached the player and vanish.
pub const EXIT_THRESHOLD_Y: f64 = 500.0;

/// Forward travel per reference frame.
pub const FORWARD_SPEED: f64 = 0.9;

// --- Target geometry (unscaled, relative to target origin) ---

/// Head zone centre offset on the y axis.
pub const HEAD_OFFSET_Y: f64 = -15.0;

/// Head zone half extent (square around the head circle).
pub const HEAD_HALF_SIZE: f64 = 12.0;

/// Body zone centre offset on the y axis.
pub const BODY_OFFSET_Y: f64 = 20.0;

/// Body zone half width.
pub const BODY_HALF_WIDTH: f64 = 15.0;

/// Body zone half height.
pub const BODY_HALF_HEIGHT: f64 = 25.0;

/// y at which a target is drawn at scale 1.0.
pub const DEPTH_SCALE_REFERENCE_Y: f64 = 500.0;

/// Smallest depth scale (far away).
pub const DEPTH_SCALE_MIN: f64 = 0.5;

/// Largest depth scale (close to the player).
pub const DEPTH_SCALE_MAX: f64 = 1.2;

// --- Scoring ---

/// Points for a head hit before the multiplier.
pub const HEAD_BASE_POINTS: u32 = 2;

/// Points for a body hit before the multiplier.
pub const BODY_BASE_POINTS: u32 = 1;

/// Multiplier gained per combo step.
pub const COMBO_MULTIPLIER_STEP: f64 = 0.05;

/// Combo steps per whole multiplier unit (1 / COMBO_MULTIPLIER_STEP).
pub const COMBO_STEPS_PER_UNIT: u32 = 20;

// --- Grades (strict greater-than) ---

pub const GRADE_S_ABOVE: u32 = 85;
pub const GRADE_A_ABOVE: u32 = 70;
pub const GRADE_B_ABOVE: u32 = 50;

// --- Persistence ---

/// Key of the persisted high score.
pub const HIGH_SCORE_KEY: &str = "cyber_highscore";
