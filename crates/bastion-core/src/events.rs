//! Events emitted by the simulation for observers and logs.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{RoundId, ThreatId};

/// Something the engine did or observed this tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngagementEvent {
    /// A scheduled barrage arrived and spawned its threats.
    BarrageArrived { size: BarrageSize, threats: u32 },
    ThreatSpawned {
        threat: ThreatId,
        kind: ThreatKind,
        distance_km: f64,
        velocity_kmh: f64,
    },
    /// Beam committed with the optimizer's dwell plan.
    BeamCommitted {
        threat: ThreatId,
        dwell_secs: f64,
        expected_pk: f64,
    },
    BeamResolved {
        threat: ThreatId,
        result: InterceptResult,
        elapsed_secs: f64,
    },
    DomeLaunched {
        threat: ThreatId,
        round: RoundId,
        intercept_km: f64,
        flight_secs: f64,
    },
    DomeResolved {
        threat: ThreatId,
        round: RoundId,
        result: InterceptResult,
    },
    /// A threat reached range zero.
    ShipHit { threat: ThreatId, kind: ThreatKind },
    MissionEnded { reason: EndReason },
}
