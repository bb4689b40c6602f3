//! Error types for the simulation binary.
//!
//! [`EngineError`] is the top-level error type that wraps all failure
//! modes during startup and simulation execution.

/// Top-level error for the simulation binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: volition_core::config::ConfigError,
    },

    /// An agent could not be assembled.
    #[error("agent build error: {source}")]
    Build {
        /// The underlying build error.
        #[from]
        source: volition_core::BuildError,
    },

    /// A spawned agent was given invalid parameters.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: volition_agents::AgentError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: volition_core::runner::RunnerError,
    },
}
