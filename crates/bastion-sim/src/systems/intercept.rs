//! Intercept resolution: reveal due beam attempts and roll arriving rounds.

use std::collections::HashMap;

use hecs::{Entity, World};
use log::{trace, warn};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::DomeRound;
use bastion_core::enums::{InterceptMode, InterceptResult, ThreatPhase};
use bastion_core::events::EngagementEvent;
use bastion_core::threat::Threat;
use bastion_core::types::ThreatId;

use crate::engagement::{BeamChannel, ScoreState};

/// Resolve the pending beam attempt if its deadline has passed.
pub fn resolve_beam(
    world: &mut World,
    channel: &mut BeamChannel,
    cooldown_secs: f64,
    now: f64,
    events: &mut Vec<EngagementEvent>,
    score: &mut ScoreState,
) {
    let Some(attempt) = channel.take_due(now, cooldown_secs) else {
        return;
    };

    let index = threat_index(world);
    let result = match index.get(&attempt.target) {
        None => InterceptResult::Discarded,
        Some(&entity) => match world.get::<&mut Threat>(entity) {
            Ok(mut threat) if threat.is_inbound() && !threat.has_reached_ship() => {
                if attempt.outcome.hit {
                    threat.phase = ThreatPhase::Destroyed;
                    InterceptResult::Hit
                } else {
                    InterceptResult::Miss
                }
            }
            Ok(_) => InterceptResult::Miss,
            Err(_) => InterceptResult::Discarded,
        },
    };

    trace!(
        "t={now:.1}s beam on {} resolved {:?} after {:.2}s",
        attempt.target,
        result,
        attempt.outcome.elapsed_secs
    );
    score.record_beam(result);
    events.push(EngagementEvent::BeamResolved {
        threat: attempt.target,
        result,
        elapsed_secs: attempt.outcome.elapsed_secs,
    });
}

/// Resolve every dome round that has reached its intercept point.
pub fn resolve_rounds(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    now: f64,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<EngagementEvent>,
    score: &mut ScoreState,
) {
    despawn_buffer.clear();

    let mut due: Vec<(Entity, DomeRound)> = world
        .query::<&DomeRound>()
        .iter()
        .filter(|(_, round)| now >= round.resolves_at_secs)
        .map(|(entity, round)| (entity, round.clone()))
        .collect();
    due.sort_by_key(|(_, round)| round.id);
    if due.is_empty() {
        return;
    }

    let index = threat_index(world);
    for (round_entity, round) in due {
        let target = index
            .get(&round.target)
            .and_then(|&entity| world.get::<&mut Threat>(entity).ok());
        let result = match target {
            Some(mut threat) if threat.is_inbound() => {
                if threat.is_inside_range_limit() || threat.has_reached_ship() {
                    warn!(
                        "{} leaked past {:?} range limit at {:.2} km",
                        round.id,
                        threat.kind,
                        threat.distance_km
                    );
                    InterceptResult::Leaked
                } else if rng.gen_bool(threat.kill_probability(InterceptMode::Dome).clamp(0.0, 1.0)) {
                    threat.phase = ThreatPhase::Destroyed;
                    InterceptResult::Hit
                } else {
                    InterceptResult::Miss
                }
            }
            _ => InterceptResult::Discarded,
        };

        trace!("t={now:.1}s {} on {} resolved {:?}", round.id, round.target, result);
        score.record_round(result);
        events.push(EngagementEvent::DomeResolved {
            threat: round.target,
            round: round.id,
            result,
        });
        despawn_buffer.push(round_entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Map threat ids to their entities.
pub fn threat_index(world: &World) -> HashMap<ThreatId, Entity> {
    world
        .query::<&Threat>()
        .iter()
        .map(|(entity, threat)| (threat.id, entity))
        .collect()
}
