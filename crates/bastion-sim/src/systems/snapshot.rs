//! Snapshot system: builds the per-tick render frame.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use bastion_core::components::DomeRound;
use bastion_core::enums::EndReason;
use bastion_core::events::EngagementEvent;
use bastion_core::state::*;
use bastion_core::threat::Threat;
use bastion_core::types::{bearing_position, SimTime};

use crate::engagement::BeamChannel;

/// Build a complete MissionFrame from the current world state.
pub fn build_frame(
    world: &World,
    time: &SimTime,
    channel: &BeamChannel,
    events: Vec<EngagementEvent>,
    outcome: Option<EndReason>,
) -> MissionFrame {
    let now = time.elapsed_secs;
    let beam = channel.view(now);
    MissionFrame {
        time: *time,
        threats: build_threats(world, &beam),
        rounds: build_rounds(world),
        beam,
        events,
        outcome,
    }
}

fn build_threats(world: &World, beam: &BeamView) -> Vec<ThreatView> {
    let mut threats: Vec<ThreatView> = world
        .query::<&Threat>()
        .iter()
        .filter(|(_, threat)| threat.is_inbound())
        .map(|(_, threat)| ThreatView {
            id: threat.id,
            kind: threat.kind,
            distance_km: threat.distance_km,
            velocity_kmh: threat.velocity_kmh,
            position: threat.position(),
            beam_attempts: threat.beam_attempts,
            dome_attempts: threat.dome_attempts,
            under_beam: beam.target == Some(threat.id),
        })
        .collect();

    threats.sort_by_key(|t| t.id);
    threats
}

fn build_rounds(world: &World) -> Vec<RoundView> {
    let mut rounds: Vec<RoundView> = world
        .query::<&DomeRound>()
        .iter()
        .map(|(_, round)| RoundView {
            id: round.id,
            target: round.target,
            position: bearing_position(round.bearing, round.traveled_km),
            traveled_km: round.traveled_km,
            intercept_km: round.intercept_km,
        })
        .collect();

    rounds.sort_by_key(|r| r.id);
    rounds
}
