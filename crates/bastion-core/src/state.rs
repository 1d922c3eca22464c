//! Render frames and mission summaries consumed by collaborators.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::EngagementEvent;
use crate::types::{RoundId, SimTime, ThreatId};

/// Complete visible state handed to the render callback after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionFrame {
    pub time: SimTime,
    pub threats: Vec<ThreatView>,
    pub rounds: Vec<RoundView>,
    pub beam: BeamView,
    pub events: Vec<EngagementEvent>,
    /// Set on the tick the mission ends.
    pub outcome: Option<EndReason>,
}

/// A live threat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatView {
    pub id: ThreatId,
    pub kind: ThreatKind,
    pub distance_km: f64,
    pub velocity_kmh: f64,
    pub position: DVec2,
    pub beam_attempts: u32,
    pub dome_attempts: u32,
    /// Beam currently dwelling on this threat.
    pub under_beam: bool,
}

/// A dome round in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundView {
    pub id: RoundId,
    pub target: ThreatId,
    pub position: DVec2,
    pub traveled_km: f64,
    pub intercept_km: f64,
}

/// Beam channel status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeamView {
    pub target: Option<ThreatId>,
    /// Dwell committed to the current attempt (s).
    pub dwell_secs: f64,
    /// Until the current attempt resolves (s).
    pub remaining_secs: f64,
    /// Until the channel may commit again (s).
    pub cooldown_remaining_secs: f64,
}

/// Per-mission counters for offline aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionSummary {
    pub seed: u64,
    pub reason: Option<EndReason>,
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub barrages: u32,
    pub threats_spawned: u32,
    pub beam_attempts: u32,
    pub beam_kills: u32,
    pub beam_misses: u32,
    pub beam_preempted: u32,
    pub dome_kills: u32,
    pub dome_misses: u32,
    pub rounds_expended: u32,
    pub rounds_leaked: u32,
    pub rounds_discarded: u32,
    pub threats_impacted: u32,
}

impl MissionSummary {
    pub fn kills(&self) -> u32 {
        self.beam_kills + self.dome_kills
    }
}
