//! Core types and definitions for the BASTION engagement simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the threat model, configuration, errors, events, render frames and
//! constants. It has no dependency on the ECS or any runtime framework.

pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod threat;
pub mod types;

#[cfg(test)]
mod tests;
