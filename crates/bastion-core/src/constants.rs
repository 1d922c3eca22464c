//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind `MissionConfig::default()`. Distances are
//! kilometres, speeds km/h, durations seconds unless noted otherwise.

/// Seconds per hour, for km/h to km/s conversion.
pub const SECS_PER_HOUR: f64 = 3600.0;

/// Seconds per day, for barrage rates quoted per day.
pub const SECS_PER_DAY: f64 = 86_400.0;

// --- Mission ---

/// Default tick length (seconds).
pub const DEFAULT_DT_SECS: f64 = 0.1;

/// Default mission horizon (seconds), two weeks.
pub const DEFAULT_HORIZON_SECS: f64 = 14.0 * SECS_PER_DAY;

// --- Barrages ---

/// Small barrages per day.
pub const SMALL_BARRAGE_RATE_PER_DAY: f64 = 1.0;

/// Big barrages per day.
pub const BIG_BARRAGE_RATE_PER_DAY: f64 = 1.0 / 3.0;

/// Threats spawned by a single barrage.
pub const THREATS_PER_BARRAGE: u32 = 10;

/// Share of drones in a big barrage; the remainder are anti-ship missiles.
pub const BIG_BARRAGE_DRONE_FRACTION: f64 = 0.6;

// --- Beam ---

/// Beam will not open an attempt on a threat closer than this.
pub const BEAM_MIN_ENGAGEMENT_RANGE_KM: f64 = 0.5;

/// Lifetime cap on beam attempts against one threat.
pub const BEAM_MAX_ATTEMPTS: u32 = 2;

/// Cooldown after an attempt runs to completion.
pub const BEAM_COOLDOWN_SECS: f64 = 2.0;

/// Cooldown after an attempt is preempted by a dome launch.
pub const BEAM_PREEMPTED_COOLDOWN_SECS: f64 = 0.5;

/// Inside this range the dwell horizon is pinned to the floor below.
pub const BEAM_NEAR_FIELD_KM: f64 = 2.0;

/// Dwell horizon used in the near field.
pub const BEAM_NEAR_FIELD_DWELL_SECS: f64 = 2.0;

/// Share of `p_max` reached at the tabulated dwell time.
pub const BEAM_TARGET_FRACTION: f64 = 0.95;

/// Optimizer search window, as a multiple of the dwell horizon.
pub const BEAM_HORIZON_FACTOR: f64 = 1.5;

/// Dense sample count over the optimizer search window.
pub const BEAM_OPTIMIZER_SAMPLES: usize = 300;

/// Relative spread of realized dwell below the optimum on a kill.
pub const BEAM_DWELL_JITTER: f64 = 0.15;

// --- Dome ---

/// Rounds the launcher may have in flight at once.
pub const DOME_MAX_ROUNDS_IN_FLIGHT: u32 = 4;

/// Rounds in flight against a single target.
pub const DOME_MAX_ROUNDS_PER_TARGET: u32 = 1;

/// Lifetime cap on dome attempts against one threat.
pub const DOME_MAX_ATTEMPTS: u32 = 2;

/// Minimum gap between launches at the same target.
pub const DOME_RELAUNCH_DELAY_SECS: f64 = 2.0;

/// Launch budget per tick.
pub const DOME_LAUNCHES_PER_TICK: u32 = 2;

/// Kinetic round speed (km/h), 750 m/s.
pub const DOME_ROUND_SPEED_KMH: f64 = 2700.0;

// --- Threat defaults ---

/// Drone kill probabilities: beam, dome, lrad.
pub const DRONE_PK: (f64, f64, f64) = (0.9, 0.8, 0.0);

/// Drone beam timing table (km → s).
pub const DRONE_TIMING_TABLE: [(f64, f64); 3] = [(3.0, 4.0), (6.0, 6.0), (14.0, 9.0)];

/// Drone dome range limit (km).
pub const DRONE_RANGE_LIMIT_KM: f64 = 0.5;

/// Anti-ship kill probabilities: beam, dome, lrad.
pub const ANTI_SHIP_PK: (f64, f64, f64) = (0.8, 0.85, 0.8);

/// Anti-ship beam timing table (km → s).
pub const ANTI_SHIP_TIMING_TABLE: [(f64, f64); 2] = [(12.0, 12.0), (14.0, 14.0)];

/// Anti-ship dome range limit (km).
pub const ANTI_SHIP_RANGE_LIMIT_KM: f64 = 4.0;

/// Ballistic kill probabilities: beam, dome, lrad.
pub const BALLISTIC_PK: (f64, f64, f64) = (0.0, 0.9, 0.0);

/// Smallest spawn distance a sampled threat may get (km).
pub const MIN_SPAWN_DISTANCE_KM: f64 = 0.1;

/// Smallest spawn speed a sampled threat may get (km/h).
pub const MIN_SPAWN_VELOCITY_KMH: f64 = 1.0;
