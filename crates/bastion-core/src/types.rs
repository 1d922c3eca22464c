//! Fundamental identifiers and simulation time.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Stable threat identity, assigned in spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ThreatId(pub u32);

/// Stable dome round identity, assigned in launch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoundId(pub u32);

impl fmt::Display for ThreatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs = self.tick as f64 * dt;
    }

    /// Jump forward to `tick`. Never moves backwards.
    pub fn jump_to(&mut self, tick: u64, dt: f64) {
        if tick > self.tick {
            self.tick = tick;
            self.elapsed_secs = tick as f64 * dt;
        }
    }
}

/// Render position for something on `bearing` (radians, 0 = North, clockwise)
/// at `range_km` from the ship. x = East, y = North.
pub fn bearing_position(bearing: f64, range_km: f64) -> DVec2 {
    DVec2::new(bearing.sin(), bearing.cos()) * range_km
}
