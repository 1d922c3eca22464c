//! Dome policy: launch kinetic rounds at the most time-critical threats.

use std::collections::HashMap;

use hecs::World;
use log::debug;

use bastion_core::components::DomeRound;
use bastion_core::config::{BeamConfig, DomeConfig};
use bastion_core::enums::{InterceptMode, InterceptResult};
use bastion_core::error::EngineResult;
use bastion_core::events::EngagementEvent;
use bastion_core::threat::Threat;
use bastion_core::types::{RoundId, ThreatId};
use bastion_dwell::optimizer::dwell_horizon;

use crate::engagement::{BeamChannel, ScoreState};

/// Run the dome policy for one tick.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    channel: &mut BeamChannel,
    dome: &DomeConfig,
    beam: &BeamConfig,
    now: f64,
    next_round_id: &mut u32,
    events: &mut Vec<EngagementEvent>,
    score: &mut ScoreState,
) -> EngineResult<()> {
    if !dome.enabled {
        return Ok(());
    }

    let outstanding = rounds_by_target(world);
    let in_flight: u32 = outstanding.values().sum();
    let budget = dome
        .launches_per_tick
        .min(dome.max_rounds_in_flight.saturating_sub(in_flight));
    if budget == 0 {
        return Ok(());
    }

    let beam_target = channel.target();
    // (entity, id, time to range limit)
    let mut candidates: Vec<(hecs::Entity, ThreatId, f64)> = world
        .query::<&Threat>()
        .iter()
        .filter(|(_, threat)| {
            let rounds = outstanding.get(&threat.id).copied().unwrap_or(0);
            let under_beam = beam_target == Some(threat.id);
            is_eligible(threat, dome, beam, now, rounds, under_beam)
        })
        .map(|(entity, threat)| (entity, threat.id, threat.time_to_range_limit()))
        .collect();
    candidates.sort_by(|a, b| a.2.total_cmp(&b.2).then(a.1.cmp(&b.1)));

    for (entity, id, _) in candidates.into_iter().take(budget as usize) {
        let Ok(mut threat) = world.get::<&mut Threat>(entity) else {
            continue;
        };
        let (intercept_km, flight_secs) = DomeRound::predict_intercept(
            threat.distance_km,
            threat.velocity_kmh,
            dome.round_speed_kmh,
        );
        threat.dome_attempts += 1;
        threat.last_dome_time = Some(now);
        let bearing = threat.bearing;
        let distance_km = threat.distance_km;
        drop(threat);

        let round_id = RoundId(*next_round_id);
        *next_round_id += 1;
        world.spawn((DomeRound {
            id: round_id,
            target: id,
            bearing,
            speed_kmh: dome.round_speed_kmh,
            intercept_km,
            traveled_km: 0.0,
            launched_at_secs: now,
            resolves_at_secs: now + flight_secs,
        },));
        score.rounds_expended += 1;
        debug!(
            "t={now:.1}s dome {round_id} -> {id} at {distance_km:.2} km, intercept {intercept_km:.2} km in {flight_secs:.1}s"
        );
        events.push(EngagementEvent::DomeLaunched {
            threat: id,
            round: round_id,
            intercept_km,
            flight_secs,
        });

        if let Some(attempt) = channel.preempt(id, now, beam.preempted_cooldown_secs) {
            debug!("t={now:.1}s beam on {id} preempted by {round_id}");
            score.record_beam(InterceptResult::Preempted);
            events.push(EngagementEvent::BeamResolved {
                threat: id,
                result: InterceptResult::Preempted,
                elapsed_secs: now - attempt.committed_at_secs,
            });
        }
    }
    Ok(())
}

/// Rounds in flight per target.
pub fn rounds_by_target(world: &World) -> HashMap<ThreatId, u32> {
    let mut counts = HashMap::new();
    for (_, round) in world.query::<&DomeRound>().iter() {
        *counts.entry(round.target).or_insert(0) += 1;
    }
    counts
}

/// Whether the dome may launch at `threat` this tick.
///
/// With the beam active, a threat is handed to the dome once a beam attempt
/// on it has finished, or as soon as the beam can no longer help. A threat
/// the beam is dwelling on is only taken over in the second case.
pub fn is_eligible(
    threat: &Threat,
    dome: &DomeConfig,
    beam: &BeamConfig,
    now: f64,
    rounds_in_flight: u32,
    under_beam: bool,
) -> bool {
    if !threat.is_inbound() || threat.kill_probability(InterceptMode::Dome) <= 0.0 {
        return false;
    }
    if threat.dome_attempts >= dome.max_attempts_per_threat
        || rounds_in_flight >= dome.max_rounds_per_target
    {
        return false;
    }
    if threat
        .last_dome_time
        .is_some_and(|t| now - t < dome.relaunch_delay_secs)
    {
        return false;
    }
    // Beyond the range limit; without one, anywhere short of impact.
    let limit = threat.range_limit().unwrap_or(0.0);
    if threat.distance_km <= limit {
        return false;
    }
    if !beam.enabled || beam_exhausted(threat, beam) {
        return true;
    }
    threat.beam_attempts > 0 && !under_beam
}

/// The beam has nothing useful left to offer this threat.
pub fn beam_exhausted(threat: &Threat, beam: &BeamConfig) -> bool {
    if !threat.is_beam_capable()
        || threat.beam_attempts >= beam.max_attempts_per_threat
        || threat.distance_km <= beam.min_engagement_range_km
    {
        return true;
    }
    dwell_horizon(threat, beam).map_or(true, |t| threat.beam_opportunities(t) < 1.0)
}
