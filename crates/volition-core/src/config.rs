//! Configuration loading and typed config structures for the simulation.
//!
//! The canonical configuration lives in `volition-config.yaml` at the
//! project root. This module defines strongly-typed structs mirroring the
//! YAML structure and a loader that reads the file. Every field has a
//! default, so an empty file (or a missing section) yields a runnable
//! configuration.

use std::path::Path;

use serde::Deserialize;
use volition_agents::BehaviorConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `volition-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, seed, timing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Simulation boundary parameters.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Per-agent behavior parameters.
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Initial population and item spawning.
    #[serde(default)]
    pub spawn: SpawnConfig,

    /// Sensing radii for perception queries.
    #[serde(default)]
    pub perception: PerceptionConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducible spawning.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Simulation boundary configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of ticks before the run ends.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Maximum wall-clock seconds before the run ends.
    #[serde(default = "default_max_real_time_seconds")]
    pub max_real_time_seconds: u64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
            max_real_time_seconds: default_max_real_time_seconds(),
        }
    }
}

/// Initial spawning configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpawnConfig {
    /// Number of agents to spawn at simulation start.
    #[serde(default = "default_initial_agents")]
    pub initial_agents: u32,

    /// Number of consumable items scattered at simulation start.
    #[serde(default = "default_initial_items")]
    pub initial_items: u32,

    /// Half-extent of the square arena; positions land in
    /// `[-half_extent, half_extent]` on each horizontal axis.
    #[serde(default = "default_arena_half_extent")]
    pub arena_half_extent: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial_agents: default_initial_agents(),
            initial_items: default_initial_items(),
            arena_half_extent: default_arena_half_extent(),
        }
    }
}

/// Sensing radius configuration.
///
/// Items and rival agents are sensed at different ranges, so an agent may
/// see a nearby pickup while a distant rival stays invisible.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PerceptionConfig {
    /// Radius within which items are perceived.
    #[serde(default = "default_item_sense_radius")]
    pub item_sense_radius: f32,

    /// Radius within which rival agents are perceived.
    #[serde(default = "default_agent_sense_radius")]
    pub agent_sense_radius: f32,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            item_sense_radius: default_item_sense_radius(),
            agent_sense_radius: default_agent_sense_radius(),
        }
    }
}

fn default_world_name() -> String {
    "Volition".to_string()
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_interval_ms() -> u64 {
    250
}

const fn default_max_ticks() -> u64 {
    1_000
}

const fn default_max_real_time_seconds() -> u64 {
    300
}

const fn default_initial_agents() -> u32 {
    6
}

const fn default_initial_items() -> u32 {
    12
}

const fn default_arena_half_extent() -> f32 {
    100.0
}

const fn default_item_sense_radius() -> f32 {
    60.0
}

const fn default_agent_sense_radius() -> f32 {
    80.0
}
