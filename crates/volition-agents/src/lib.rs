//! Agent resource state and mutation logic for the Volition decision engine.
//!
//! This crate contains everything that touches an agent's numbers -- health,
//! energy, attack power, and the weights that steer its priorities. It sits
//! between `volition-types` (the data shapes) and `volition-core` (the
//! decision loop that decides when these numbers change).
//!
//! # Modules
//!
//! - [`combat`] -- Synchronized stats handle and atomic damage application
//! - [`config`] -- Configurable behavior parameters ([`BehaviorConfig`])
//! - [`death`] -- Death conditions ([`DeathCause`], [`check_death`])
//! - [`error`] -- Error types for agent state operations ([`AgentError`])
//! - [`stats`] -- Resource state with clamping, and priority weights
//!
//! [`check_death`]: death::check_death

pub mod combat;
pub mod config;
pub mod death;
pub mod error;
pub mod stats;

// Re-export primary types at crate root for convenience.
pub use combat::{DamageOutcome, SharedStats};
pub use config::BehaviorConfig;
pub use death::{DeathCause, check_death};
pub use error::AgentError;
pub use stats::{ResourceState, STAT_CAP, Weights};
