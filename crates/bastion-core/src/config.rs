//! Mission configuration.
//!
//! Every section defaults to the constants in [`crate::constants`], so a JSON
//! file only needs to name what it overrides.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{BarrageSize, ThreatKind};
use crate::error::{ConfigError, ConfigResult};
use crate::threat::ThreatProfile;

/// A single barrage arrival.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarrageEvent {
    /// Arrival time in mission seconds.
    pub arrival_secs: f64,
    pub size: BarrageSize,
}

/// Where the barrage schedule comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleSource {
    /// Marked Poisson process driven by [`BarrageConfig`].
    #[default]
    Poisson,
    /// Caller-supplied arrivals.
    Scripted { events: Vec<BarrageEvent> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarrageConfig {
    pub small_per_day: f64,
    pub big_per_day: f64,
    pub threats_per_barrage: u32,
    pub big_drone_fraction: f64,
}

impl Default for BarrageConfig {
    fn default() -> Self {
        Self {
            small_per_day: SMALL_BARRAGE_RATE_PER_DAY,
            big_per_day: BIG_BARRAGE_RATE_PER_DAY,
            threats_per_barrage: THREATS_PER_BARRAGE,
            big_drone_fraction: BIG_BARRAGE_DRONE_FRACTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamConfig {
    pub enabled: bool,
    pub min_engagement_range_km: f64,
    pub max_attempts_per_threat: u32,
    pub cooldown_secs: f64,
    pub preempted_cooldown_secs: f64,
    pub near_field_km: f64,
    pub near_field_dwell_secs: f64,
    pub target_fraction: f64,
    pub horizon_factor: f64,
    pub samples: usize,
    pub dwell_jitter: f64,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_engagement_range_km: BEAM_MIN_ENGAGEMENT_RANGE_KM,
            max_attempts_per_threat: BEAM_MAX_ATTEMPTS,
            cooldown_secs: BEAM_COOLDOWN_SECS,
            preempted_cooldown_secs: BEAM_PREEMPTED_COOLDOWN_SECS,
            near_field_km: BEAM_NEAR_FIELD_KM,
            near_field_dwell_secs: BEAM_NEAR_FIELD_DWELL_SECS,
            target_fraction: BEAM_TARGET_FRACTION,
            horizon_factor: BEAM_HORIZON_FACTOR,
            samples: BEAM_OPTIMIZER_SAMPLES,
            dwell_jitter: BEAM_DWELL_JITTER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomeConfig {
    pub enabled: bool,
    pub max_rounds_in_flight: u32,
    pub max_rounds_per_target: u32,
    pub max_attempts_per_threat: u32,
    pub relaunch_delay_secs: f64,
    pub launches_per_tick: u32,
    pub round_speed_kmh: f64,
}

impl Default for DomeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_rounds_in_flight: DOME_MAX_ROUNDS_IN_FLIGHT,
            max_rounds_per_target: DOME_MAX_ROUNDS_PER_TARGET,
            max_attempts_per_threat: DOME_MAX_ATTEMPTS,
            relaunch_delay_secs: DOME_RELAUNCH_DELAY_SECS,
            launches_per_tick: DOME_LAUNCHES_PER_TICK,
            round_speed_kmh: DOME_ROUND_SPEED_KMH,
        }
    }
}

/// One profile per threat kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatCatalog {
    pub drone: ThreatProfile,
    pub anti_ship: ThreatProfile,
    pub ballistic: ThreatProfile,
}

impl Default for ThreatCatalog {
    fn default() -> Self {
        Self {
            drone: ThreatProfile::drone(),
            anti_ship: ThreatProfile::anti_ship(),
            ballistic: ThreatProfile::ballistic(),
        }
    }
}

impl ThreatCatalog {
    pub fn profile(&self, kind: ThreatKind) -> &ThreatProfile {
        match kind {
            ThreatKind::Drone => &self.drone,
            ThreatKind::AntiShip => &self.anti_ship,
            ThreatKind::Ballistic => &self.ballistic,
        }
    }
}

/// Configuration for a single mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    /// RNG seed for determinism. Same seed = same mission.
    pub seed: u64,
    pub dt_secs: f64,
    pub horizon_secs: f64,
    /// Jump the clock to the next barrage when nothing is live.
    pub skip_idle: bool,
    pub schedule: ScheduleSource,
    pub barrage: BarrageConfig,
    pub beam: BeamConfig,
    pub dome: DomeConfig,
    pub threats: ThreatCatalog,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            dt_secs: DEFAULT_DT_SECS,
            horizon_secs: DEFAULT_HORIZON_SECS,
            skip_idle: true,
            schedule: ScheduleSource::default(),
            barrage: BarrageConfig::default(),
            beam: BeamConfig::default(),
            dome: DomeConfig::default(),
            threats: ThreatCatalog::default(),
        }
    }
}

impl MissionConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: MissionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        positive("dt_secs", self.dt_secs)?;
        positive("horizon_secs", self.horizon_secs)?;

        let b = &self.barrage;
        non_negative("small_per_day", b.small_per_day)?;
        non_negative("big_per_day", b.big_per_day)?;
        if matches!(self.schedule, ScheduleSource::Poisson) {
            positive("total barrage rate", b.small_per_day + b.big_per_day)?;
        }
        probability("big_drone_fraction", b.big_drone_fraction)?;
        if let ScheduleSource::Scripted { events } = &self.schedule {
            for event in events {
                non_negative("scripted arrival", event.arrival_secs)?;
            }
        }

        let beam = &self.beam;
        positive("min_engagement_range_km", beam.min_engagement_range_km)?;
        non_negative("cooldown_secs", beam.cooldown_secs)?;
        non_negative("preempted_cooldown_secs", beam.preempted_cooldown_secs)?;
        non_negative("near_field_km", beam.near_field_km)?;
        positive("near_field_dwell_secs", beam.near_field_dwell_secs)?;
        positive("horizon_factor", beam.horizon_factor)?;
        non_negative("dwell_jitter", beam.dwell_jitter)?;
        if !(beam.target_fraction > 0.0 && beam.target_fraction < 1.0) {
            return Err(ConfigError::InvalidProbability {
                what: "target_fraction",
                value: beam.target_fraction,
            });
        }
        if beam.samples == 0 {
            return Err(ConfigError::ZeroCapacity {
                what: "optimizer samples",
            });
        }

        let dome = &self.dome;
        if dome.enabled {
            for (what, value) in [
                ("max_rounds_in_flight", dome.max_rounds_in_flight),
                ("max_rounds_per_target", dome.max_rounds_per_target),
                ("launches_per_tick", dome.launches_per_tick),
            ] {
                if value == 0 {
                    return Err(ConfigError::ZeroCapacity { what });
                }
            }
        }
        non_negative("relaunch_delay_secs", dome.relaunch_delay_secs)?;
        positive("round_speed_kmh", dome.round_speed_kmh)?;

        for kind in ThreatKind::ALL {
            self.threats.profile(kind).validate(kind)?;
        }
        Ok(())
    }

    /// Mission horizon expressed in ticks.
    pub fn horizon_ticks(&self) -> u64 {
        let ratio = self.horizon_secs / self.dt_secs;
        let nearest = ratio.round();
        // Float noise must not add a tick: 1.0 / 0.1 is 10 ticks, not 11.
        if (ratio - nearest).abs() < 1e-6 {
            nearest as u64
        } else {
            ratio.ceil() as u64
        }
    }
}

fn positive(what: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { what, value })
    }
}

fn non_negative(what: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { what, value })
    }
}

fn probability(what: &'static str, value: f64) -> ConfigResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { what, value })
    }
}
