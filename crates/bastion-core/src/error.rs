//! Error taxonomy.
//!
//! Stochastic misses are business outcomes and never surface here. What does:
//! bad configuration (fails fast at construction), kinematics driven past a
//! terminal boundary, and resource-contention invariants that the scheduler
//! must never violate.

use thiserror::Error;

use crate::enums::ThreatKind;
use crate::types::ThreatId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("timing table needs at least two points, got {0}")]
    TimingTableTooShort(usize),

    #[error("timing table has a non-finite entry at distance {0}")]
    TimingTableNonFinite(f64),

    #[error("timing table has duplicate distance key {0}")]
    TimingTableDuplicateKey(f64),

    #[error("{what} must be a probability in [0, 1], got {value}")]
    InvalidProbability { what: &'static str, value: f64 },

    #[error("{what} must be positive and finite, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("{what} must be at least 1")]
    ZeroCapacity { what: &'static str },

    #[error("{kind:?} threats must have a timing table when their beam kill probability is non-zero")]
    MissingTimingTable { kind: ThreatKind },

    #[error("invalid threat state: {0}")]
    InvalidThreat(String),

    #[error("could not parse mission config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("threat {threat} advanced after reaching range zero")]
    InvalidState { threat: ThreatId },

    #[error("resource contention: {0}")]
    ResourceContention(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
pub type EngineResult<T> = Result<T, EngineError>;
