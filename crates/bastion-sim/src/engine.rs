//! Mission engine: the discrete-time driver.
//!
//! `MissionEngine` owns the hecs ECS world, the beam channel and the barrage
//! schedule, runs all systems in a fixed order each tick, and produces
//! `MissionFrame`s. Completely headless, deterministic for a given seed.

use std::collections::HashMap;

use hecs::World;
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::DomeRound;
use bastion_core::config::{BarrageEvent, MissionConfig, ScheduleSource};
use bastion_core::enums::{EndReason, ThreatKind};
use bastion_core::error::{ConfigResult, EngineError, EngineResult};
use bastion_core::events::EngagementEvent;
use bastion_core::state::{MissionFrame, MissionSummary};
use bastion_core::threat::Threat;
use bastion_core::types::{SimTime, ThreatId};

use crate::engagement::{BeamChannel, ScoreState};
use crate::observer::MissionObserver;
use crate::systems;
use crate::systems::barrage::BarrageSchedule;
use crate::world_setup;

/// The mission engine. Owns the ECS world and all sim state.
pub struct MissionEngine {
    config: MissionConfig,
    world: World,
    time: SimTime,
    horizon_ticks: u64,
    rng: ChaCha8Rng,
    schedule: BarrageSchedule,
    beam: BeamChannel,
    score: ScoreState,
    next_threat_id: u32,
    next_round_id: u32,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<EngagementEvent>,
    outcome: Option<EndReason>,
    final_frame: Option<MissionFrame>,
    started: bool,
}

impl MissionEngine {
    /// Build an engine whose schedule comes from `config.schedule`.
    pub fn new(config: MissionConfig) -> ConfigResult<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let events = match &config.schedule {
            ScheduleSource::Poisson => {
                systems::barrage::generate(&mut rng, &config.barrage, config.horizon_secs)
            }
            ScheduleSource::Scripted { events } => events.clone(),
        };
        Ok(Self::build(config, rng, events))
    }

    /// Build an engine with an explicit barrage schedule, ignoring
    /// `config.schedule`.
    pub fn with_schedule(config: MissionConfig, events: Vec<BarrageEvent>) -> ConfigResult<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self::build(config, rng, events))
    }

    fn build(config: MissionConfig, rng: ChaCha8Rng, events: Vec<BarrageEvent>) -> Self {
        Self {
            horizon_ticks: config.horizon_ticks(),
            world: World::new(),
            time: SimTime::default(),
            rng,
            schedule: BarrageSchedule::new(events),
            beam: BeamChannel::default(),
            score: ScoreState::default(),
            next_threat_id: 0,
            next_round_id: 0,
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            outcome: None,
            final_frame: None,
            started: false,
            config,
        }
    }

    /// Insert a threat outside the barrage schedule.
    pub fn spawn_threat(
        &mut self,
        kind: ThreatKind,
        distance_km: f64,
        velocity_kmh: f64,
    ) -> EngineResult<ThreatId> {
        let id = ThreatId(self.next_threat_id);
        world_setup::spawn_threat(
            &mut self.world,
            &mut self.rng,
            id,
            kind,
            self.config.threats.profile(kind),
            distance_km,
            velocity_kmh,
        )?;
        self.next_threat_id += 1;
        self.score.threats_spawned += 1;
        self.events.push(EngagementEvent::ThreatSpawned {
            threat: id,
            kind,
            distance_km,
            velocity_kmh,
        });
        debug!("{id} ({kind:?}) injected at {distance_km:.2} km, {velocity_kmh:.0} km/h");
        Ok(id)
    }

    /// Advance the mission by one tick and return the resulting frame.
    ///
    /// Stepping a finished mission is a no-op returning the final frame.
    pub fn step(&mut self) -> EngineResult<MissionFrame> {
        if let Some(frame) = &self.final_frame {
            return Ok(frame.clone());
        }
        if !self.started {
            self.started = true;
            info!(
                "mission seed {} starting: {} barrages over {:.1} days",
                self.config.seed,
                self.schedule.remaining(),
                self.config.horizon_secs / bastion_core::constants::SECS_PER_DAY
            );
        }

        self.skip_idle();
        self.run_systems()?;

        self.outcome = self.check_terminal();
        self.check_invariants()?;

        if let Some(reason) = self.outcome {
            self.events.push(EngagementEvent::MissionEnded { reason });
            let s = self.summary();
            info!(
                "mission seed {} ended {:?} at {:.1}s: {} kills ({} beam, {} dome), {} rounds expended",
                s.seed,
                reason,
                s.elapsed_secs,
                s.kills(),
                s.beam_kills,
                s.dome_kills,
                s.rounds_expended
            );
        }

        let events = std::mem::take(&mut self.events);
        let frame = systems::snapshot::build_frame(
            &self.world,
            &self.time,
            &self.beam,
            events,
            self.outcome,
        );
        if self.outcome.is_some() {
            self.final_frame = Some(frame.clone());
        }
        Ok(frame)
    }

    /// Drive the mission to completion, reporting to `observer`.
    pub fn run(&mut self, observer: &mut impl MissionObserver) -> EngineResult<MissionSummary> {
        while !self.is_over() {
            let frame = self.step()?;
            for event in &frame.events {
                observer.on_event(event);
            }
            observer.on_frame(&frame);
        }
        let summary = self.summary();
        observer.on_mission_end(&summary);
        Ok(summary)
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<EndReason> {
        self.outcome
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn beam(&self) -> &BeamChannel {
        &self.beam
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn beam_mut(&mut self) -> &mut BeamChannel {
        &mut self.beam
    }

    pub fn schedule(&self) -> &BarrageSchedule {
        &self.schedule
    }

    pub fn summary(&self) -> MissionSummary {
        let s = &self.score;
        MissionSummary {
            seed: self.config.seed,
            reason: self.outcome,
            ticks: self.time.tick,
            elapsed_secs: self.time.elapsed_secs,
            barrages: s.barrages,
            threats_spawned: s.threats_spawned,
            beam_attempts: s.beam_attempts,
            beam_kills: s.beam_kills,
            beam_misses: s.beam_misses,
            beam_preempted: s.beam_preempted,
            dome_kills: s.dome_kills,
            dome_misses: s.dome_misses,
            rounds_expended: s.rounds_expended,
            rounds_leaked: s.rounds_leaked,
            rounds_discarded: s.rounds_discarded,
            threats_impacted: s.threats_impacted,
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) -> EngineResult<()> {
        let dt = self.config.dt_secs;

        // 1. Barrage arrivals
        systems::barrage::run(
            &mut self.world,
            &mut self.rng,
            &mut self.schedule,
            &self.config.barrage,
            &self.config.threats,
            self.time.elapsed_secs,
            &mut self.next_threat_id,
            &mut self.events,
            &mut self.score,
        )?;
        // 2. Kinematics, then the clock
        systems::movement::run(&mut self.world, dt)?;
        self.time.advance(dt);
        let now = self.time.elapsed_secs;
        // 3. Beam policy
        systems::beam_control::run(
            &mut self.world,
            &mut self.beam,
            &self.config.beam,
            &mut self.rng,
            now,
            &mut self.events,
            &mut self.score,
        )?;
        // 4. Dome policy
        systems::dome_control::run(
            &mut self.world,
            &mut self.beam,
            &self.config.dome,
            &self.config.beam,
            now,
            &mut self.next_round_id,
            &mut self.events,
            &mut self.score,
        )?;
        // 5. Resolution
        systems::intercept::resolve_beam(
            &mut self.world,
            &mut self.beam,
            self.config.beam.cooldown_secs,
            now,
            &mut self.events,
            &mut self.score,
        );
        systems::intercept::resolve_rounds(
            &mut self.world,
            &mut self.rng,
            now,
            &mut self.despawn_buffer,
            &mut self.events,
            &mut self.score,
        );
        // 6. Cleanup (destroyed, impacted)
        if let Some(id) = systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &mut self.events,
            &mut self.score,
        ) {
            debug!("t={now:.1}s ship hit by {id}");
            self.outcome = Some(EndReason::ShipHit);
        }
        Ok(())
    }

    fn check_terminal(&self) -> Option<EndReason> {
        if self.outcome == Some(EndReason::ShipHit) {
            Some(EndReason::ShipHit)
        } else if self.time.tick >= self.horizon_ticks {
            Some(EndReason::HorizonElapsed)
        } else if self.schedule.is_exhausted() && self.is_quiet() {
            Some(EndReason::AllThreatsNeutralized)
        } else {
            None
        }
    }

    /// Nothing in the air and the beam idle.
    fn is_quiet(&self) -> bool {
        self.beam.pending().is_none()
            && self.world.query::<&Threat>().iter().next().is_none()
            && self.world.query::<&DomeRound>().iter().next().is_none()
    }

    /// Jump the clock to the next barrage when nothing is live.
    fn skip_idle(&mut self) {
        if !self.config.skip_idle || !self.is_quiet() {
            return;
        }
        let Some(next) = self.schedule.next_arrival() else {
            return;
        };
        let dt = self.config.dt_secs;
        let mut tick = (next / dt).floor() as u64;
        if (tick as f64) * dt < next {
            tick += 1;
        }
        // Leave one tick so the advance lands on the horizon, not past it.
        let tick = tick.min(self.horizon_ticks.saturating_sub(1));
        if tick > self.time.tick {
            debug!(
                "idle: skipping {} ticks to t={:.1}s",
                tick - self.time.tick,
                tick as f64 * dt
            );
            self.time.jump_to(tick, dt);
        }
    }

    /// Hard resource limits. A violation is a scheduler bug, never a miss.
    fn check_invariants(&self) -> EngineResult<()> {
        let dome = &self.config.dome;
        let beam = &self.config.beam;

        let mut per_target: HashMap<ThreatId, u32> = HashMap::new();
        let mut in_flight = 0;
        for (_, round) in self.world.query::<&DomeRound>().iter() {
            in_flight += 1;
            *per_target.entry(round.target).or_insert(0) += 1;
        }
        if in_flight > dome.max_rounds_in_flight {
            return Err(EngineError::ResourceContention(format!(
                "{in_flight} dome rounds in flight, cap is {}",
                dome.max_rounds_in_flight
            )));
        }
        if let Some((target, n)) = per_target
            .iter()
            .find(|(_, n)| **n > dome.max_rounds_per_target)
        {
            return Err(EngineError::ResourceContention(format!(
                "{n} concurrent rounds on {target}"
            )));
        }
        if let Some(target) = self.beam.target() {
            if per_target.contains_key(&target) {
                return Err(EngineError::ResourceContention(format!(
                    "beam and dome both committed to {target}"
                )));
            }
        }

        for (_, threat) in self.world.query::<&Threat>().iter() {
            if threat.beam_attempts > beam.max_attempts_per_threat {
                return Err(EngineError::ResourceContention(format!(
                    "{} has {} beam attempts",
                    threat.id, threat.beam_attempts
                )));
            }
            if threat.dome_attempts > dome.max_attempts_per_threat {
                return Err(EngineError::ResourceContention(format!(
                    "{} has {} dome attempts",
                    threat.id, threat.dome_attempts
                )));
            }
        }
        Ok(())
    }
}
