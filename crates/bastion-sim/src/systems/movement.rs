//! Kinematic integration system.
//!
//! Threats close range along their bearing; dome rounds fly outward toward
//! their predicted intercept point.

use hecs::World;

use bastion_core::components::DomeRound;
use bastion_core::constants::SECS_PER_HOUR;
use bastion_core::error::EngineResult;
use bastion_core::threat::Threat;

/// Advance every live threat and round by `dt` seconds.
pub fn run(world: &mut World, dt: f64) -> EngineResult<()> {
    for (_entity, threat) in world.query_mut::<&mut Threat>() {
        // Already at the ship: left for cleanup to score as an impact.
        if threat.is_inbound() && !threat.has_reached_ship() {
            threat.update_distance(dt)?;
        }
    }

    for (_entity, round) in world.query_mut::<&mut DomeRound>() {
        let step = round.speed_kmh * dt / SECS_PER_HOUR;
        round.traveled_km = (round.traveled_km + step).min(round.intercept_km);
    }
    Ok(())
}
