//! Cleanup system: removes destroyed threats and flags impacts.

use hecs::{Entity, World};
use log::warn;

use bastion_core::enums::ThreatPhase;
use bastion_core::events::EngagementEvent;
use bastion_core::threat::Threat;
use bastion_core::types::ThreatId;

use crate::engagement::ScoreState;

/// Despawn threats that were killed or reached the ship.
/// Returns the first threat that hit the ship this tick, if any.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<EngagementEvent>,
    score: &mut ScoreState,
) -> Option<ThreatId> {
    despawn_buffer.clear();
    let mut first_hit = None;

    for (entity, threat) in world.query_mut::<&mut Threat>() {
        if threat.is_inbound() && threat.has_reached_ship() {
            threat.phase = ThreatPhase::Impact;
            warn!("{} ({:?}) reached the ship", threat.id, threat.kind);
            score.threats_impacted += 1;
            events.push(EngagementEvent::ShipHit {
                threat: threat.id,
                kind: threat.kind,
            });
            // Lowest id wins when several land on the same tick.
            if first_hit.map_or(true, |id| threat.id < id) {
                first_hit = Some(threat.id);
            }
        }
        if matches!(threat.phase, ThreatPhase::Destroyed | ThreatPhase::Impact) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    first_hit
}
