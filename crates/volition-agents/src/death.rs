//! Death conditions for agents.
//!
//! An agent dies when its health reaches 0. The only way health drops in
//! this simulation is combat damage, so the cause is always [`DeathCause::Slain`];
//! the enum exists so telemetry and logs name the cause explicitly rather
//! than implying it.

use crate::stats::ResourceState;

/// The cause of an agent's death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeathCause {
    /// Health was depleted by a rival's attack.
    Slain,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Slain => write!(f, "slain"),
        }
    }
}

/// Check whether an agent meets the death condition.
///
/// Returns `Some(cause)` if the agent is dead, `None` if alive. This only
/// inspects the current state -- it does not mutate anything.
pub const fn check_death(state: &ResourceState) -> Option<DeathCause> {
    if state.is_dead() {
        Some(DeathCause::Slain)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alive_agent_has_no_death_cause() {
        let state = ResourceState::new(1, 0, 0);
        assert_eq!(check_death(&state), None);
    }

    #[test]
    fn zero_health_is_death() {
        let state = ResourceState::new(0, 100, 20);
        assert_eq!(check_death(&state), Some(DeathCause::Slain));
    }
}
