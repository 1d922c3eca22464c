//! Entity spawn factories for the simulation world.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::constants::{MIN_SPAWN_DISTANCE_KM, MIN_SPAWN_VELOCITY_KMH};
use bastion_core::enums::ThreatKind;
use bastion_core::error::ConfigResult;
use bastion_core::threat::{Threat, ThreatProfile};
use bastion_core::types::ThreatId;

/// Spawn a threat with explicit kinematics on a random bearing.
pub fn spawn_threat(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    id: ThreatId,
    kind: ThreatKind,
    profile: &ThreatProfile,
    distance_km: f64,
    velocity_kmh: f64,
) -> ConfigResult<(hecs::Entity, Threat)> {
    let bearing: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let threat = Threat::new(id, kind, profile, distance_km, velocity_kmh, bearing)?;
    let entity = world.spawn((threat.clone(),));
    Ok((entity, threat))
}

/// Spawn a threat with range and speed drawn from its profile.
pub fn spawn_from_profile(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    id: ThreatId,
    kind: ThreatKind,
    profile: &ThreatProfile,
) -> ConfigResult<(hecs::Entity, Threat)> {
    let distance = profile.spawn_distance_km.sample(rng, MIN_SPAWN_DISTANCE_KM);
    let velocity = profile.spawn_velocity_kmh.sample(rng, MIN_SPAWN_VELOCITY_KMH);
    spawn_threat(world, rng, id, kind, profile, distance, velocity)
}
