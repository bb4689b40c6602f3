//! Utility-based decision engine for autonomous simulated agents.
//!
//! Each agent periodically perceives nearby objects, scores every viable
//! action against its own resource state, commits to the highest-scoring
//! action, executes it to completion or failure, and repeats. This crate
//! owns that loop; spatial perception, navigation, telemetry display, and
//! world mutation are external collaborators reached through narrow traits.
//!
//! # Modules
//!
//! - [`agent`] -- The per-agent decision loop and its builder
//! - [`config`] -- Configuration loading from `volition-config.yaml`
//! - [`decision`] -- Candidate evaluation and first-wins selection
//! - [`executor`] -- Navigation polling, cooldown gates, action resolution
//! - [`navigation`] -- The [`Mover`] collaborator trait
//! - [`perception`] -- The [`PerceptionProvider`] collaborator trait
//! - [`possibility`] -- Candidate descriptors and the possibility model
//! - [`runner`] -- The bounded async simulation loop
//! - [`telemetry`] -- The fire-and-forget [`TelemetrySink`] trait
//! - [`utility`] -- Pure utility scoring
//! - [`world`] -- One-way world mutation commands ([`WorldHandle`])
//!
//! [`Mover`]: navigation::Mover
//! [`PerceptionProvider`]: perception::PerceptionProvider
//! [`TelemetrySink`]: telemetry::TelemetrySink
//! [`WorldHandle`]: world::WorldHandle

pub mod agent;
pub mod config;
pub mod decision;
pub mod executor;
pub mod navigation;
pub mod perception;
pub mod possibility;
pub mod runner;
pub mod telemetry;
pub mod utility;
pub mod world;

// Re-export the primary surface at crate root for convenience.
pub use agent::{Agent, AgentBuilder, BuildError, Phase, TickOutcome};
pub use decision::{Choice, evaluate};
pub use navigation::{Mover, StubMover};
pub use perception::{PerceptionProvider, StubPerception};
pub use possibility::{Candidate, PossibilityModel, RivalRef};
pub use runner::{
    NoOpCallback, RunnerError, SimulationEndReason, SimulationResult, SimulationState,
    TickCallback, TickSummary, run_simulation, run_tick,
};
pub use telemetry::{NullTelemetry, RecordingTelemetry, TelemetrySink};
pub use utility::{ATTACK_ENERGY_COST, calc_utility};
pub use world::{StubWorld, WorldHandle};
