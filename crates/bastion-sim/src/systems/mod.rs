//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; it lives in components or is passed in.

pub mod barrage;
pub mod beam_control;
pub mod cleanup;
pub mod dome_control;
pub mod intercept;
pub mod movement;
pub mod snapshot;
