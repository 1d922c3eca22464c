//! Dwell-time optimizer for BASTION.
//!
//! Turns a threat's beam timing table into a kill-probability curve and picks
//! the dwell that maximises probability per second of beam time, the scarce
//! resource shared across every inbound threat. Pure functions, no ECS
//! dependency, no state.

pub mod curve;
pub mod optimizer;

pub use bastion_core as core;
pub use curve::KillCurve;
pub use optimizer::{optimize, ranking_score, realize, BeamOutcome, DwellPlan};

#[cfg(test)]
mod tests;
