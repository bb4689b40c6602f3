//! Configurable parameters for agent behavior mechanics.
//!
//! Defaults match the values used throughout the test scenarios: 2 energy
//! regenerated per tick, a 6-tick attack cooldown (1.5 s at the default
//! 250 ms tick interval), no pickup cooldown, and a 10-unit arrival
//! threshold.

use serde::Deserialize;

/// Tunable behavior parameters, loaded from the `behavior` section of the
/// simulation configuration.
///
/// Attack and pickup cooldowns are configured independently; setting them
/// equal gives the two action kinds cooldown parity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BehaviorConfig {
    /// Energy regenerated passively at the start of every tick.
    #[serde(default = "default_energy_regen_per_tick")]
    pub energy_regen_per_tick: u32,

    /// Ticks an agent must wait between landed attacks.
    #[serde(default = "default_attack_cooldown_ticks")]
    pub attack_cooldown_ticks: u64,

    /// Ticks an agent must wait between item pickups. 0 disables the gate.
    #[serde(default = "default_pickup_cooldown_ticks")]
    pub pickup_cooldown_ticks: u64,

    /// Distance below which an agent counts as having reached its target.
    #[serde(default = "default_arrival_threshold")]
    pub arrival_threshold: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            energy_regen_per_tick: default_energy_regen_per_tick(),
            attack_cooldown_ticks: default_attack_cooldown_ticks(),
            pickup_cooldown_ticks: default_pickup_cooldown_ticks(),
            arrival_threshold: default_arrival_threshold(),
        }
    }
}

const fn default_energy_regen_per_tick() -> u32 {
    2
}

const fn default_attack_cooldown_ticks() -> u64 {
    6
}

const fn default_pickup_cooldown_ticks() -> u64 {
    0
}

const fn default_arrival_threshold() -> f32 {
    10.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = BehaviorConfig::default();
        assert_eq!(config.energy_regen_per_tick, 2);
        assert_eq!(config.attack_cooldown_ticks, 6);
        assert_eq!(config.pickup_cooldown_ticks, 0);
        assert!((config.arrival_threshold - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: BehaviorConfig =
            serde_json::from_str(r#"{"attack_cooldown_ticks": 12}"#).unwrap();
        assert_eq!(config.attack_cooldown_ticks, 12);
        assert_eq!(config.energy_regen_per_tick, 2);
    }
}
