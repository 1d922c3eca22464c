//! Engagement simulation engine for BASTION.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces MissionFrames for renderers and summaries for result sinks.

pub mod engagement;
pub mod engine;
pub mod observer;
pub mod systems;
pub mod world_setup;

pub use bastion_core as core;
pub use bastion_dwell as dwell;
pub use engine::MissionEngine;
pub use observer::{MissionObserver, NoopObserver, SummaryCollector};
