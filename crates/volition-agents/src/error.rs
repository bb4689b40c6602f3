//! Error types for agent state operations.
//!
//! Operations that can fail return typed errors rather than panicking.

/// Errors that can occur during agent state construction and mutation.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A priority weight was outside the valid [0, 1] range.
    #[error("invalid weight {name}: {value} is outside [0, 1]")]
    InvalidWeight {
        /// Which weight was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}
