//! Beam channel and score bookkeeping.
//!
//! Owned by `MissionEngine`, NOT stored as ECS entities. Dome rounds live in
//! the world; the beam is a single exclusive resource and lives here.

use bastion_core::enums::InterceptResult;
use bastion_core::state::BeamView;
use bastion_core::types::ThreatId;
use bastion_dwell::{BeamOutcome, DwellPlan};

/// A committed beam attempt. The outcome is drawn at commit time and revealed
/// when the clock passes `resolves_at_secs`.
#[derive(Debug, Clone)]
pub struct BeamAttempt {
    pub target: ThreatId,
    pub plan: DwellPlan,
    pub outcome: BeamOutcome,
    pub committed_at_secs: f64,
    pub resolves_at_secs: f64,
}

impl BeamAttempt {
    pub fn is_due(&self, now: f64) -> bool {
        now >= self.resolves_at_secs
    }
}

/// The beam: at most one pending attempt, plus a cooldown gate.
#[derive(Debug, Clone, Default)]
pub struct BeamChannel {
    pending: Option<BeamAttempt>,
    cooldown_until_secs: f64,
}

impl BeamChannel {
    /// No pending attempt and cooldown elapsed.
    pub fn is_idle(&self, now: f64) -> bool {
        self.pending.is_none() && now >= self.cooldown_until_secs
    }

    pub fn pending(&self) -> Option<&BeamAttempt> {
        self.pending.as_ref()
    }

    pub fn target(&self) -> Option<ThreatId> {
        self.pending.as_ref().map(|a| a.target)
    }

    pub fn cooldown_until_secs(&self) -> f64 {
        self.cooldown_until_secs
    }

    /// Reserve the beam. Returns the rejected attempt if one is already pending.
    pub fn commit(&mut self, attempt: BeamAttempt) -> Result<(), BeamAttempt> {
        if self.pending.is_some() {
            return Err(attempt);
        }
        self.pending = Some(attempt);
        Ok(())
    }

    /// Take the pending attempt if its deadline has passed, starting the long
    /// cooldown.
    pub fn take_due(&mut self, now: f64, cooldown_secs: f64) -> Option<BeamAttempt> {
        if !self.pending.as_ref().is_some_and(|a| a.is_due(now)) {
            return None;
        }
        self.cooldown_until_secs = now + cooldown_secs;
        self.pending.take()
    }

    /// Cancel the pending attempt on `target`, starting the short cooldown.
    pub fn preempt(
        &mut self,
        target: ThreatId,
        now: f64,
        cooldown_secs: f64,
    ) -> Option<BeamAttempt> {
        if self.target() != Some(target) {
            return None;
        }
        self.cooldown_until_secs = now + cooldown_secs;
        self.pending.take()
    }

    pub fn view(&self, now: f64) -> BeamView {
        let cooldown_remaining_secs = (self.cooldown_until_secs - now).max(0.0);
        match &self.pending {
            Some(attempt) => BeamView {
                target: Some(attempt.target),
                dwell_secs: attempt.outcome.elapsed_secs,
                remaining_secs: (attempt.resolves_at_secs - now).max(0.0),
                cooldown_remaining_secs,
            },
            None => BeamView {
                cooldown_remaining_secs,
                ..Default::default()
            },
        }
    }
}

/// Running counters tracked by the engine.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub barrages: u32,
    pub threats_spawned: u32,
    pub beam_attempts: u32,
    pub beam_kills: u32,
    pub beam_misses: u32,
    pub beam_preempted: u32,
    pub dome_kills: u32,
    pub dome_misses: u32,
    pub rounds_expended: u32,
    pub rounds_leaked: u32,
    pub rounds_discarded: u32,
    pub threats_impacted: u32,
}

impl ScoreState {
    pub fn record_beam(&mut self, result: InterceptResult) {
        match result {
            InterceptResult::Hit => self.beam_kills += 1,
            InterceptResult::Preempted => self.beam_preempted += 1,
            _ => self.beam_misses += 1,
        }
    }

    pub fn record_round(&mut self, result: InterceptResult) {
        match result {
            InterceptResult::Hit => self.dome_kills += 1,
            InterceptResult::Leaked => self.rounds_leaked += 1,
            InterceptResult::Discarded => self.rounds_discarded += 1,
            _ => self.dome_misses += 1,
        }
    }
}
