//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Threat category. Each kind carries its own profile in the threat catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatKind {
    /// Slow one-way attack drone.
    Drone,
    /// Sea-skimming anti-ship cruise missile.
    AntiShip,
    /// Ballistic missile. Immune to the beam, dome only.
    Ballistic,
}

impl ThreatKind {
    pub const ALL: [ThreatKind; 3] = [ThreatKind::Drone, ThreatKind::AntiShip, ThreatKind::Ballistic];
}

/// Interception mode a kill probability is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterceptMode {
    /// Directed-energy weapon.
    Beam,
    /// Kinetic launcher.
    Dome,
    /// Acoustic device. Carried in the probability tables, never scheduled.
    Lrad,
}

/// Barrage size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarrageSize {
    /// Drones only.
    Small,
    /// Drone / anti-ship mix.
    Big,
}

/// Threat lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatPhase {
    /// Closing on the ship.
    #[default]
    Inbound,
    /// Killed by the beam or a dome round.
    Destroyed,
    /// Reached range zero.
    Impact,
}

/// Result of a single engagement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterceptResult {
    Hit,
    Miss,
    /// Beam attempt cut short by a dome launch on the same target.
    Preempted,
    /// Dome round arrived after the target crossed its range limit.
    Leaked,
    /// Dome round whose target was already gone.
    Discarded,
}

/// Why a mission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// A threat reached range zero.
    ShipHit,
    /// Simulated time reached the mission horizon.
    HorizonElapsed,
    /// Schedule exhausted and nothing left in the air.
    AllThreatsNeutralized,
}
