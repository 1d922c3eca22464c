//! Cumulative beam kill probability as a function of dwell time.

/// Normalized logistic curve in dwell time `t`.
///
/// `P(0) = 0`, `P(T) = fraction · p_max` and `P(t) → p_max` as `t → ∞`, where
/// `T` is the horizon read off the timing table. The raw logistic is centred
/// on `T / 2` and rescaled so its value at zero maps to zero; the steepness
/// `s = ln(1 / (1 − fraction))` is the one that lands `P(T)` exactly on target
/// after that rescale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KillCurve {
    p_max: f64,
    horizon_secs: f64,
    steepness: f64,
    offset: f64,
}

impl KillCurve {
    pub fn new(p_max: f64, horizon_secs: f64, fraction: f64) -> Self {
        let steepness = (1.0 / (1.0 - fraction)).ln();
        Self {
            p_max,
            horizon_secs,
            steepness,
            offset: sigmoid(-steepness),
        }
    }

    pub fn p_max(&self) -> f64 {
        self.p_max
    }

    pub fn horizon_secs(&self) -> f64 {
        self.horizon_secs
    }

    pub fn probability(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let x = self.steepness * (2.0 * t / self.horizon_secs - 1.0);
        self.p_max * (sigmoid(x) - self.offset) / (1.0 - self.offset)
    }

    /// Kill probability per second of dwell.
    pub fn ratio(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        self.probability(t) / t
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
