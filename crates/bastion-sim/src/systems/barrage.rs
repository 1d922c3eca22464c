//! Barrage generation and spawning.
//!
//! Arrivals are a single superposed Poisson process over both size classes;
//! each arrival is marked small or big in proportion to the stream rates.

use hecs::World;
use log::debug;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp};

use bastion_core::config::{BarrageConfig, BarrageEvent, ThreatCatalog};
use bastion_core::constants::SECS_PER_DAY;
use bastion_core::enums::{BarrageSize, ThreatKind};
use bastion_core::error::EngineResult;
use bastion_core::events::EngagementEvent;
use bastion_core::types::ThreatId;

use crate::engagement::ScoreState;

/// Draw the barrage schedule for a mission of `horizon_secs`.
///
/// The arrival that would land past the horizon is discarded.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    config: &BarrageConfig,
    horizon_secs: f64,
) -> Vec<BarrageEvent> {
    let total_per_day = config.small_per_day + config.big_per_day;
    if total_per_day <= 0.0 {
        return Vec::new();
    }
    let Ok(inter_arrival) = Exp::new(total_per_day / SECS_PER_DAY) else {
        return Vec::new();
    };
    let p_small = config.small_per_day / total_per_day;

    let mut events = Vec::new();
    let mut t = 0.0;
    loop {
        t += inter_arrival.sample(rng);
        if t >= horizon_secs {
            break;
        }
        let size = if rng.gen_bool(p_small.clamp(0.0, 1.0)) {
            BarrageSize::Small
        } else {
            BarrageSize::Big
        };
        events.push(BarrageEvent {
            arrival_secs: t,
            size,
        });
    }
    events
}

/// Threat kinds spawned by one barrage of `n` threats.
pub fn compose(size: BarrageSize, n: u32, drone_fraction: f64) -> Vec<ThreatKind> {
    let drones = match size {
        BarrageSize::Small => n,
        // Guard the floor against 0.6 * 10 landing a hair under 6.
        BarrageSize::Big => ((drone_fraction * n as f64 + 1e-9).floor() as u32).min(n),
    };
    let mut kinds = vec![ThreatKind::Drone; drones as usize];
    kinds.resize(n as usize, ThreatKind::AntiShip);
    kinds
}

/// Ordered arrivals with a monotonic cursor. Each event is consumed once.
#[derive(Debug, Clone, Default)]
pub struct BarrageSchedule {
    events: Vec<BarrageEvent>,
    cursor: usize,
}

impl BarrageSchedule {
    pub fn new(mut events: Vec<BarrageEvent>) -> Self {
        events.sort_by(|a, b| a.arrival_secs.total_cmp(&b.arrival_secs));
        Self { events, cursor: 0 }
    }

    pub fn events(&self) -> &[BarrageEvent] {
        &self.events
    }

    /// Events due at or before `now`, not yet consumed.
    pub fn take_due(&mut self, now: f64) -> &[BarrageEvent] {
        let start = self.cursor;
        while self
            .events
            .get(self.cursor)
            .is_some_and(|e| e.arrival_secs <= now)
        {
            self.cursor += 1;
        }
        &self.events[start..self.cursor]
    }

    pub fn next_arrival(&self) -> Option<f64> {
        self.events.get(self.cursor).map(|e| e.arrival_secs)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.events.len()
    }

    pub fn remaining(&self) -> usize {
        self.events.len() - self.cursor
    }
}

/// Spawn every barrage due at `now`.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    schedule: &mut BarrageSchedule,
    config: &BarrageConfig,
    catalog: &ThreatCatalog,
    now: f64,
    next_threat_id: &mut u32,
    events: &mut Vec<EngagementEvent>,
    score: &mut ScoreState,
) -> EngineResult<()> {
    for barrage in schedule.take_due(now) {
        let kinds = compose(
            barrage.size,
            config.threats_per_barrage,
            config.big_drone_fraction,
        );
        debug!(
            "t={now:.1}s {:?} barrage arrived with {} threats",
            barrage.size,
            kinds.len()
        );
        score.barrages += 1;
        events.push(EngagementEvent::BarrageArrived {
            size: barrage.size,
            threats: kinds.len() as u32,
        });

        for kind in kinds {
            let id = ThreatId(*next_threat_id);
            *next_threat_id += 1;
            let (_, threat) = crate::world_setup::spawn_from_profile(
                world,
                rng,
                id,
                kind,
                catalog.profile(kind),
            )?;
            score.threats_spawned += 1;
            events.push(EngagementEvent::ThreatSpawned {
                threat: id,
                kind,
                distance_km: threat.distance_km,
                velocity_kmh: threat.velocity_kmh,
            });
        }
    }
    Ok(())
}
