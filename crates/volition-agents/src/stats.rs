//! Agent resource state with clamping, and the priority weights that steer
//! utility scoring.
//!
//! Every stat lives in [0, [`STAT_CAP`]]. No mutation in this module can
//! leave a stat above the cap, and health can never be stored negative --
//! it floors at 0, which is the death condition checked in
//! [`crate::death`].

use serde::{Deserialize, Serialize};
use volition_types::ItemBoosts;

use crate::error::AgentError;

/// Upper bound for health, energy, and attack.
pub const STAT_CAP: u32 = 100;

/// An agent's mutable resource state.
///
/// Owned exclusively by one agent; concurrent access goes through
/// [`crate::combat::SharedStats`], which serializes all writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Current health in [0, 100]. Reaching 0 kills the agent.
    pub health: u32,
    /// Current energy in [0, 100]. Spent by attacks, restored by regen.
    pub energy: u32,
    /// Current attack power in [0, 100]. Damage dealt per landed attack.
    pub attack: u32,
}

impl ResourceState {
    /// Create a resource state, clamping each stat to the cap.
    pub const fn new(health: u32, energy: u32, attack: u32) -> Self {
        Self {
            health: clamp_stat(health),
            energy: clamp_stat(energy),
            attack: clamp_stat(attack),
        }
    }

    /// Apply item boosts, clamping each stat to the cap independently.
    pub const fn apply_boosts(&mut self, boosts: &ItemBoosts) {
        self.health = clamp_stat(self.health.saturating_add(boosts.health));
        self.energy = clamp_stat(self.energy.saturating_add(boosts.energy));
        self.attack = clamp_stat(self.attack.saturating_add(boosts.attack));
    }

    /// Passive energy regeneration, applied once per tick.
    pub const fn regen_energy(&mut self, rate: u32) {
        self.energy = clamp_stat(self.energy.saturating_add(rate));
    }

    /// Spend energy on an action. Energy floors at 0.
    pub const fn deduct_energy(&mut self, cost: u32) {
        self.energy = self.energy.saturating_sub(cost);
    }

    /// Take damage. Health floors at 0; returns the remaining health.
    pub const fn take_damage(&mut self, damage: u32) -> u32 {
        self.health = self.health.saturating_sub(damage);
        self.health
    }

    /// Whether this agent's health has been depleted.
    pub const fn is_dead(&self) -> bool {
        self.health == 0
    }
}

impl Default for ResourceState {
    /// The starting stats of a freshly spawned agent.
    fn default() -> Self {
        Self {
            health: 100,
            energy: 100,
            attack: 20,
        }
    }
}

/// Clamp a stat value to [`STAT_CAP`].
const fn clamp_stat(value: u32) -> u32 {
    if value > STAT_CAP { STAT_CAP } else { value }
}

/// Per-agent priority weights, each in [0, 1].
///
/// The weights are independent -- there is no requirement that they sum
/// to 1. An agent with a high health weight values survival; one with a
/// high damage-dealt weight values aggression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    /// Priority on preserving or restoring health.
    pub health: f64,
    /// Priority on conserving or restoring energy.
    pub energy: f64,
    /// Priority on growing attack power.
    pub attack: f64,
    /// Priority on dealing damage to rivals.
    pub damage_dealt: f64,
}

impl Weights {
    /// Create a weight set, rejecting any value outside [0, 1].
    pub fn new(
        health: f64,
        energy: f64,
        attack: f64,
        damage_dealt: f64,
    ) -> Result<Self, AgentError> {
        check_weight("health", health)?;
        check_weight("energy", energy)?;
        check_weight("attack", attack)?;
        check_weight("damage_dealt", damage_dealt)?;
        Ok(Self {
            health,
            energy,
            attack,
            damage_dealt,
        })
    }
}

impl Default for Weights {
    /// A balanced weight set with every priority at 0.5.
    fn default() -> Self {
        Self {
            health: 0.5,
            energy: 0.5,
            attack: 0.5,
            damage_dealt: 0.5,
        }
    }
}

/// Validate that a single weight lies in [0, 1].
fn check_weight(name: &'static str, value: f64) -> Result<(), AgentError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(AgentError::InvalidWeight { name, value })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_oversized_stats() {
        let state = ResourceState::new(150, 200, 101);
        assert_eq!(state.health, 100);
        assert_eq!(state.energy, 100);
        assert_eq!(state.attack, 100);
    }

    #[test]
    fn boosts_clamp_each_stat_independently() {
        let mut state = ResourceState::new(90, 40, 95);
        state.apply_boosts(&ItemBoosts::new(50, 30, 50));
        assert_eq!(state.health, 100);
        assert_eq!(state.energy, 70);
        assert_eq!(state.attack, 100);
    }

    #[test]
    fn boosts_never_exceed_cap_regardless_of_magnitude() {
        let mut state = ResourceState::new(1, 1, 1);
        state.apply_boosts(&ItemBoosts::new(u32::MAX, u32::MAX, u32::MAX));
        assert_eq!(state.health, 100);
        assert_eq!(state.energy, 100);
        assert_eq!(state.attack, 100);
    }

    #[test]
    fn regen_clamps_to_cap() {
        let mut state = ResourceState::new(50, 99, 20);
        state.regen_energy(5);
        assert_eq!(state.energy, 100);
    }

    #[test]
    fn energy_deduction_floors_at_zero() {
        let mut state = ResourceState::new(50, 5, 20);
        state.deduct_energy(10);
        assert_eq!(state.energy, 0);
    }

    #[test]
    fn damage_floors_health_at_zero() {
        let mut state = ResourceState::new(30, 50, 20);
        let remaining = state.take_damage(45);
        assert_eq!(remaining, 0);
        assert_eq!(state.health, 0);
        assert!(state.is_dead());
    }

    #[test]
    fn damage_below_health_leaves_agent_alive() {
        let mut state = ResourceState::new(60, 50, 20);
        let remaining = state.take_damage(40);
        assert_eq!(remaining, 20);
        assert!(!state.is_dead());
    }

    #[test]
    fn weights_accept_full_range() {
        assert!(Weights::new(0.0, 1.0, 0.5, 0.25).is_ok());
    }

    #[test]
    fn weights_reject_out_of_range_values() {
        let result = Weights::new(1.5, 0.5, 0.5, 0.5);
        assert!(matches!(
            result,
            Err(AgentError::InvalidWeight { name: "health", .. })
        ));

        let result = Weights::new(0.5, -0.1, 0.5, 0.5);
        assert!(matches!(
            result,
            Err(AgentError::InvalidWeight { name: "energy", .. })
        ));
    }

    #[test]
    fn weights_do_not_need_to_sum_to_one() {
        assert!(Weights::new(1.0, 1.0, 1.0, 1.0).is_ok());
    }
}
