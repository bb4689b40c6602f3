//! Shared type definitions for the Volition decision engine.
//!
//! This crate is the single source of truth for the types used across the
//! Volition workspace. It holds no logic beyond simple accessors -- the
//! decision engine itself lives in `volition-core`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`position`] -- World positions and distance computation
//! - [`possibility`] -- Possibility kinds and item boost payloads
//! - [`events`] -- Telemetry events published by the engine

pub mod events;
pub mod ids;
pub mod position;
pub mod possibility;

// Re-export all public types at crate root for convenience.
pub use events::TelemetryEvent;
pub use ids::{AgentId, CandidateId};
pub use position::Position;
pub use possibility::{ItemBoosts, PossibilityKind};
