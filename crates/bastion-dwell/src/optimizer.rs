//! Optimal beam dwell selection and the commit-time outcome draw.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use bastion_core::config::BeamConfig;
use bastion_core::enums::InterceptMode;
use bastion_core::threat::Threat;

use crate::curve::KillCurve;

/// Shortest realized dwell on a kill, as a share of the optimum.
const MIN_REALIZED_FRACTION: f64 = 0.1;

/// Optimizer output for one threat at its current range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DwellPlan {
    /// `T`: dwell at which the curve reaches its target fraction of `p_max`.
    pub horizon_secs: f64,
    /// `t*`: dwell maximising `P(t) / t`.
    pub dwell_secs: f64,
    /// `P(t*)`.
    pub kill_probability: f64,
    /// `P(t*) / t*`, the ranking score.
    pub ratio: f64,
}

/// Realized result of a committed beam attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamOutcome {
    pub hit: bool,
    /// Beam time the attempt consumes before it resolves.
    pub elapsed_secs: f64,
}

/// Dwell horizon `T` for a threat at its current distance.
///
/// Inside the near field `T` is pinned to the configured floor. A table
/// extrapolated down to a non-positive dwell also falls back to the floor.
/// `None` for beam-immune threats.
pub fn dwell_horizon(threat: &Threat, config: &BeamConfig) -> Option<f64> {
    let table = threat.timing_table.as_ref()?;
    if threat.distance_km <= config.near_field_km {
        return Some(config.near_field_dwell_secs);
    }
    let t = table.interpolate(threat.distance_km);
    if t.is_finite() && t > 0.0 {
        Some(t)
    } else {
        Some(config.near_field_dwell_secs)
    }
}

/// Maximise `P(t) / t` over an even grid on `(0, horizon_factor · T]`.
pub fn optimize_curve(curve: &KillCurve, horizon_factor: f64, samples: usize) -> DwellPlan {
    let window = horizon_factor * curve.horizon_secs();
    let samples = samples.max(1);

    let mut best_t = window;
    let mut best_ratio = f64::NEG_INFINITY;
    for i in 1..=samples {
        let t = window * i as f64 / samples as f64;
        let ratio = curve.ratio(t);
        if ratio > best_ratio {
            best_ratio = ratio;
            best_t = t;
        }
    }

    DwellPlan {
        horizon_secs: curve.horizon_secs(),
        dwell_secs: best_t,
        kill_probability: curve.probability(best_t),
        ratio: best_ratio,
    }
}

/// Full plan for committing the beam to `threat`.
pub fn optimize(threat: &Threat, config: &BeamConfig) -> Option<DwellPlan> {
    if !threat.is_beam_capable() {
        return None;
    }
    let horizon = dwell_horizon(threat, config)?;
    let curve = KillCurve::new(
        threat.kill_probability(InterceptMode::Beam),
        horizon,
        config.target_fraction,
    );
    Some(optimize_curve(&curve, config.horizon_factor, config.samples))
}

/// Score used to rank beam candidates without committing anything.
pub fn ranking_score(threat: &Threat, config: &BeamConfig) -> Option<f64> {
    optimize(threat, config).map(|plan| plan.ratio)
}

/// Draw the outcome of an attempt at commit time.
///
/// Success is sampled with probability `p_max`. A kill lands somewhere at or
/// before the optimum, concentrated near it; a miss burns the whole optimum.
pub fn realize<R: Rng + ?Sized>(
    plan: &DwellPlan,
    p_max: f64,
    jitter: f64,
    rng: &mut R,
) -> BeamOutcome {
    let hit = rng.gen_bool(p_max.clamp(0.0, 1.0));
    if !hit {
        return BeamOutcome {
            hit,
            elapsed_secs: plan.dwell_secs,
        };
    }

    let spread = jitter * plan.dwell_secs;
    let shortfall = match Normal::new(0.0, spread) {
        Ok(normal) if spread > 0.0 => normal.sample(rng).abs(),
        _ => 0.0,
    };
    let floor = plan.dwell_secs * MIN_REALIZED_FRACTION;
    BeamOutcome {
        hit,
        elapsed_secs: (plan.dwell_secs - shortfall).clamp(floor, plan.dwell_secs),
    }
}
