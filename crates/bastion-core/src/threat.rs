//! Threat model: per-kind profiles, beam timing tables and 1-D closing kinematics.
//!
//! A threat is a tagged record keyed by [`ThreatKind`]. The kind selects a
//! [`ThreatProfile`] from the catalog at spawn time; the threat copies what it
//! needs (kill probabilities, timing table, range limit) so the engine never
//! has to look the profile up again.

use glam::DVec2;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{InterceptMode, ThreatKind, ThreatPhase};
use crate::error::{ConfigError, ConfigResult, EngineError, EngineResult};
use crate::types::{bearing_position, ThreatId};

/// Sparse `distance (km) → dwell time (s)` table for the beam.
///
/// The dwell time is the point at which the beam kill probability is taken to
/// have reached its target fraction of `p_max`. Always holds at least two
/// points sorted by distance, so it can be interpolated anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct TimingTable {
    points: Vec<(f64, f64)>,
}

impl TimingTable {
    pub fn new(mut points: Vec<(f64, f64)>) -> ConfigResult<Self> {
        if points.len() < 2 {
            return Err(ConfigError::TimingTableTooShort(points.len()));
        }
        if let Some(&(d, _)) = points
            .iter()
            .find(|(d, t)| !d.is_finite() || !t.is_finite())
        {
            return Err(ConfigError::TimingTableNonFinite(d));
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        if let Some(w) = points.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(ConfigError::TimingTableDuplicateKey(w[0].0));
        }
        Ok(Self { points })
    }

    /// Build from a compile-time table already known to be valid.
    fn from_static(points: &[(f64, f64)]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Linear interpolation between the bracketing keys; outside the table the
    /// nearest segment's slope is extended.
    pub fn interpolate(&self, distance_km: f64) -> f64 {
        let n = self.points.len();
        let upper = self
            .points
            .partition_point(|&(d, _)| d <= distance_km)
            .clamp(1, n - 1);
        let (x1, y1) = self.points[upper - 1];
        let (x2, y2) = self.points[upper];
        y1 + (distance_km - x1) * (y2 - y1) / (x2 - x1)
    }
}

impl TryFrom<Vec<(f64, f64)>> for TimingTable {
    type Error = ConfigError;

    fn try_from(points: Vec<(f64, f64)>) -> ConfigResult<Self> {
        Self::new(points)
    }
}

impl From<TimingTable> for Vec<(f64, f64)> {
    fn from(table: TimingTable) -> Self {
        table.points
    }
}

/// Kill probability asymptote per interception mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KillProbabilities {
    pub beam: f64,
    pub dome: f64,
    pub lrad: f64,
}

impl KillProbabilities {
    pub fn get(&self, mode: InterceptMode) -> f64 {
        match mode {
            InterceptMode::Beam => self.beam,
            InterceptMode::Dome => self.dome,
            InterceptMode::Lrad => self.lrad,
        }
    }

    fn from_tuple((beam, dome, lrad): (f64, f64, f64)) -> Self {
        Self { beam, dome, lrad }
    }

    fn validate(&self) -> ConfigResult<()> {
        for (what, value) in [
            ("beam kill probability", self.beam),
            ("dome kill probability", self.dome),
            ("lrad kill probability", self.lrad),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { what, value });
            }
        }
        Ok(())
    }
}

/// Normal distribution parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    pub mean: f64,
    pub std_dev: f64,
}

impl Gaussian {
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match Normal::new(self.mean, self.std_dev) {
            Ok(normal) => normal.sample(rng),
            Err(_) => self.mean,
        }
    }
}

/// How a spawned threat's distance or speed is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpawnDistribution {
    Fixed { value: f64 },
    Normal(Gaussian),
    /// Weighted mixture of normals; weights need not sum to one.
    Mixture { components: Vec<(f64, Gaussian)> },
}

impl SpawnDistribution {
    /// Draw a value, clamped below at `floor`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, floor: f64) -> f64 {
        let raw = match self {
            SpawnDistribution::Fixed { value } => *value,
            SpawnDistribution::Normal(g) => g.sample(rng),
            SpawnDistribution::Mixture { components } => {
                let total: f64 = components.iter().map(|(w, _)| w).sum();
                let mut pick = rng.gen_range(0.0..total.max(f64::MIN_POSITIVE));
                let mut chosen = components.last().map(|(_, g)| *g);
                for (weight, g) in components {
                    if pick < *weight {
                        chosen = Some(*g);
                        break;
                    }
                    pick -= weight;
                }
                chosen.map_or(floor, |g| g.sample(rng))
            }
        };
        raw.max(floor)
    }

    fn validate(&self, what: &'static str) -> ConfigResult<()> {
        let check = |g: &Gaussian| {
            if g.mean.is_finite() && g.std_dev.is_finite() && g.std_dev >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::NonPositive {
                    what,
                    value: g.std_dev,
                })
            }
        };
        match self {
            SpawnDistribution::Fixed { value } if !value.is_finite() || *value <= 0.0 => {
                Err(ConfigError::NonPositive { what, value: *value })
            }
            SpawnDistribution::Fixed { .. } => Ok(()),
            SpawnDistribution::Normal(g) => check(g),
            SpawnDistribution::Mixture { components } => {
                if components.is_empty() {
                    return Err(ConfigError::ZeroCapacity { what });
                }
                for (weight, g) in components {
                    if !weight.is_finite() || *weight <= 0.0 {
                        return Err(ConfigError::NonPositive {
                            what,
                            value: *weight,
                        });
                    }
                    check(g)?;
                }
                Ok(())
            }
        }
    }
}

/// Per-kind configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatProfile {
    pub kill_probability: KillProbabilities,
    /// Absent for beam-immune kinds.
    pub timing_table: Option<TimingTable>,
    /// Minimum standoff for kinetic interception. `None` means the dome can
    /// engage all the way in.
    pub range_limit_km: Option<f64>,
    pub spawn_distance_km: SpawnDistribution,
    pub spawn_velocity_kmh: SpawnDistribution,
}

impl ThreatProfile {
    pub fn drone() -> Self {
        Self {
            kill_probability: KillProbabilities::from_tuple(DRONE_PK),
            timing_table: Some(TimingTable::from_static(&DRONE_TIMING_TABLE)),
            range_limit_km: Some(DRONE_RANGE_LIMIT_KM),
            spawn_distance_km: SpawnDistribution::Normal(Gaussian::new(10.0, 2.0)),
            spawn_velocity_kmh: SpawnDistribution::Normal(Gaussian::new(180.0, 5.0)),
        }
    }

    pub fn anti_ship() -> Self {
        Self {
            kill_probability: KillProbabilities::from_tuple(ANTI_SHIP_PK),
            timing_table: Some(TimingTable::from_static(&ANTI_SHIP_TIMING_TABLE)),
            range_limit_km: Some(ANTI_SHIP_RANGE_LIMIT_KM),
            spawn_distance_km: SpawnDistribution::Normal(Gaussian::new(15.0, 1.0)),
            spawn_velocity_kmh: SpawnDistribution::Mixture {
                components: vec![
                    (0.5, Gaussian::new(2000.0, 50.0)),
                    (0.5, Gaussian::new(800.0, 30.0)),
                ],
            },
        }
    }

    pub fn ballistic() -> Self {
        Self {
            kill_probability: KillProbabilities::from_tuple(BALLISTIC_PK),
            timing_table: None,
            range_limit_km: None,
            spawn_distance_km: SpawnDistribution::Normal(Gaussian::new(20.0, 3.0)),
            spawn_velocity_kmh: SpawnDistribution::Normal(Gaussian::new(3000.0, 100.0)),
        }
    }

    pub fn validate(&self, kind: ThreatKind) -> ConfigResult<()> {
        self.kill_probability.validate()?;
        if self.kill_probability.beam > 0.0 && self.timing_table.is_none() {
            return Err(ConfigError::MissingTimingTable { kind });
        }
        if let Some(limit) = self.range_limit_km {
            if !limit.is_finite() || limit < 0.0 {
                return Err(ConfigError::NonPositive {
                    what: "range limit",
                    value: limit,
                });
            }
        }
        self.spawn_distance_km.validate("spawn distance")?;
        self.spawn_velocity_kmh.validate("spawn velocity")
    }
}

/// A single inbound threat. Stored as an ECS component by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    pub id: ThreatId,
    pub kind: ThreatKind,
    /// Range to the ship (km). Never negative.
    pub distance_km: f64,
    /// Closing speed (km/h), constant for the threat's lifetime.
    pub velocity_kmh: f64,
    /// Render bearing (radians, 0 = North, clockwise).
    pub bearing: f64,
    pub phase: ThreatPhase,
    pub kill_probability: KillProbabilities,
    pub timing_table: Option<TimingTable>,
    pub range_limit_km: Option<f64>,
    /// Beam attempts reserved against this threat, preempted ones included.
    pub beam_attempts: u32,
    /// Dome rounds launched at this threat.
    pub dome_attempts: u32,
    /// Sim time (s) of the most recent dome launch at this threat.
    pub last_dome_time: Option<f64>,
}

impl Threat {
    pub fn new(
        id: ThreatId,
        kind: ThreatKind,
        profile: &ThreatProfile,
        distance_km: f64,
        velocity_kmh: f64,
        bearing: f64,
    ) -> ConfigResult<Self> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(ConfigError::InvalidThreat(format!(
                "{id} distance must be finite and non-negative, got {distance_km}"
            )));
        }
        if !velocity_kmh.is_finite() || velocity_kmh < 0.0 {
            return Err(ConfigError::InvalidThreat(format!(
                "{id} velocity must be finite and non-negative, got {velocity_kmh}"
            )));
        }
        profile.validate(kind)?;

        Ok(Self {
            id,
            kind,
            distance_km,
            velocity_kmh,
            bearing,
            phase: ThreatPhase::Inbound,
            kill_probability: profile.kill_probability,
            timing_table: profile.timing_table.clone(),
            range_limit_km: profile.range_limit_km,
            beam_attempts: 0,
            dome_attempts: 0,
            last_dome_time: None,
        })
    }

    /// Close range by `velocity * dt`, clamping at zero.
    ///
    /// A threat already at zero is terminal: the mission loop must have
    /// removed it, so advancing it again is an invalid-state error.
    pub fn update_distance(&mut self, dt_secs: f64) -> EngineResult<()> {
        if self.has_reached_ship() {
            return Err(EngineError::InvalidState { threat: self.id });
        }
        let step = self.velocity_kmh * dt_secs / SECS_PER_HOUR;
        self.distance_km = (self.distance_km - step).max(0.0);
        Ok(())
    }

    /// Seconds until range zero, `+∞` for a stationary threat.
    pub fn arrival_time(&self) -> f64 {
        if self.velocity_kmh <= 0.0 {
            return f64::INFINITY;
        }
        self.distance_km / self.velocity_kmh * SECS_PER_HOUR
    }

    pub fn range_limit(&self) -> Option<f64> {
        self.range_limit_km
    }

    /// Seconds until the threat crosses its dome range limit. Zero once
    /// inside it; without a limit this is the time to impact.
    pub fn time_to_range_limit(&self) -> f64 {
        let limit = self.range_limit_km.unwrap_or(0.0);
        let remaining = (self.distance_km - limit).max(0.0);
        if remaining == 0.0 {
            return 0.0;
        }
        if self.velocity_kmh <= 0.0 {
            return f64::INFINITY;
        }
        remaining / self.velocity_kmh * SECS_PER_HOUR
    }

    /// Inside the range limit the dome can no longer kill this threat.
    pub fn is_inside_range_limit(&self) -> bool {
        self.range_limit_km
            .is_some_and(|limit| self.distance_km < limit)
    }

    pub fn has_reached_ship(&self) -> bool {
        self.distance_km <= 0.0
    }

    pub fn is_inbound(&self) -> bool {
        self.phase == ThreatPhase::Inbound
    }

    pub fn kill_probability(&self, mode: InterceptMode) -> f64 {
        self.kill_probability.get(mode)
    }

    /// Beam-immune kinds carry no timing table.
    pub fn is_beam_capable(&self) -> bool {
        self.timing_table.is_some() && self.kill_probability.beam > 0.0
    }

    /// How many full dwells of `dwell_secs` fit before impact.
    pub fn beam_opportunities(&self, dwell_secs: f64) -> f64 {
        if dwell_secs <= 0.0 {
            return 0.0;
        }
        self.arrival_time() / dwell_secs
    }

    pub fn position(&self) -> DVec2 {
        bearing_position(self.bearing, self.distance_km)
    }
}
