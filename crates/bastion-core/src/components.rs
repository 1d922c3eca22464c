//! ECS components for hecs entities.
//!
//! Threats are stored as [`crate::threat::Threat`] components; this module
//! holds the interceptor side. Components are plain data, logic lives in the
//! simulation systems.

use serde::{Deserialize, Serialize};

use crate::types::{RoundId, ThreatId};

/// A kinetic round in flight toward a static predicted intercept point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomeRound {
    pub id: RoundId,
    pub target: ThreatId,
    /// Shares the target's bearing so it renders on the same line.
    pub bearing: f64,
    pub speed_kmh: f64,
    /// Range from the ship (km) where the round meets the target.
    pub intercept_km: f64,
    /// Distance flown so far (km).
    pub traveled_km: f64,
    pub launched_at_secs: f64,
    pub resolves_at_secs: f64,
}

impl DomeRound {
    /// Predicted intercept for a round launched from the ship at `speed_kmh`
    /// against a threat at `distance_km` closing at `closing_kmh`.
    /// Returns (intercept range km, flight time s).
    pub fn predict_intercept(distance_km: f64, closing_kmh: f64, speed_kmh: f64) -> (f64, f64) {
        let closure = speed_kmh + closing_kmh;
        if closure <= 0.0 {
            return (distance_km, f64::INFINITY);
        }
        let flight_hours = distance_km / closure;
        (speed_kmh * flight_hours, flight_hours * crate::constants::SECS_PER_HOUR)
    }
}
