//! Beam policy: commit the idle beam to the threat with the best kill
//! probability per second of dwell.

use std::collections::HashSet;

use hecs::World;
use log::debug;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::DomeRound;
use bastion_core::config::BeamConfig;
use bastion_core::enums::InterceptMode;
use bastion_core::error::{EngineError, EngineResult};
use bastion_core::events::EngagementEvent;
use bastion_core::threat::Threat;
use bastion_core::types::ThreatId;
use bastion_dwell::{optimize, ranking_score, realize, DwellPlan};

use crate::engagement::{BeamAttempt, BeamChannel, ScoreState};

/// Run the beam policy for one tick.
pub fn run(
    world: &mut World,
    channel: &mut BeamChannel,
    config: &BeamConfig,
    rng: &mut ChaCha8Rng,
    now: f64,
    events: &mut Vec<EngagementEvent>,
    score: &mut ScoreState,
) -> EngineResult<()> {
    if !config.enabled || !channel.is_idle(now) {
        return Ok(());
    }

    let committed = dome_committed(world);
    let Some((entity, plan)) = select_target(world, config, &committed) else {
        return Ok(());
    };

    let mut threat = world
        .get::<&mut Threat>(entity)
        .map_err(|_| EngineError::ResourceContention("beam target vanished mid-commit".into()))?;
    threat.beam_attempts += 1;
    let p_max = threat.kill_probability(InterceptMode::Beam);
    let outcome = realize(&plan, p_max, config.dwell_jitter, rng);

    let attempt = BeamAttempt {
        target: threat.id,
        plan,
        outcome,
        committed_at_secs: now,
        resolves_at_secs: now + outcome.elapsed_secs,
    };
    debug!(
        "t={now:.1}s beam -> {} at {:.2} km, dwell {:.2}s, pk {:.3} (attempt {})",
        threat.id, threat.distance_km, plan.dwell_secs, plan.kill_probability, threat.beam_attempts
    );
    events.push(EngagementEvent::BeamCommitted {
        threat: threat.id,
        dwell_secs: plan.dwell_secs,
        expected_pk: plan.kill_probability,
    });
    score.beam_attempts += 1;

    channel.commit(attempt).map_err(|rejected| {
        EngineError::ResourceContention(format!(
            "second beam commitment on {} while another is pending",
            rejected.target
        ))
    })
}

/// Threats with a dome round in flight.
pub fn dome_committed(world: &World) -> HashSet<ThreatId> {
    world
        .query::<&DomeRound>()
        .iter()
        .map(|(_, round)| round.target)
        .collect()
}

/// Whether the beam may engage `threat` at all this tick.
pub fn is_eligible(threat: &Threat, config: &BeamConfig, committed: &HashSet<ThreatId>) -> bool {
    threat.is_inbound()
        && threat.is_beam_capable()
        && !committed.contains(&threat.id)
        && threat.beam_attempts < config.max_attempts_per_threat
        && threat.distance_km > config.min_engagement_range_km
}

/// Best eligible threat by `P(t*) / t*`. Ties go to the lower threat id.
fn select_target(
    world: &World,
    config: &BeamConfig,
    committed: &HashSet<ThreatId>,
) -> Option<(hecs::Entity, DwellPlan)> {
    let mut best: Option<(hecs::Entity, ThreatId, f64)> = None;
    for (entity, threat) in world.query::<&Threat>().iter() {
        if !is_eligible(threat, config, committed) {
            continue;
        }
        let Some(score) = ranking_score(threat, config) else {
            continue;
        };
        let better = match &best {
            None => true,
            Some((_, id, current)) => score > *current || (score == *current && threat.id < *id),
        };
        if better {
            best = Some((entity, threat.id, score));
        }
    }

    let (entity, _, _) = best?;
    let threat = world.get::<&Threat>(entity).ok()?;
    optimize(&threat, config).map(|plan| (entity, plan))
}
