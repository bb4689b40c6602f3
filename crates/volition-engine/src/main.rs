//! Simulation binary for Volition.
//!
//! Wires together the arena world, the agent spawner, and the bounded
//! tick loop. Loads configuration, seeds the world, and runs until a
//! termination condition is met.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `volition-config.yaml` (or the path given
//!    as the first argument)
//! 3. Seed the arena with items and agents
//! 4. Run the simulation loop
//! 5. Log the result

mod arena;
mod error;
mod spawner;
mod telemetry;

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use volition_core::TelemetrySink;
use volition_core::config::SimulationConfig;
use volition_core::runner::{self, SimulationState, TickCallback, TickSummary};

use crate::error::EngineError;
use crate::telemetry::TracingTelemetry;

/// Logs a compact line per tick and surfaces deaths immediately.
struct SummaryCallback;

impl TickCallback for SummaryCallback {
    fn on_tick(&mut self, summary: &TickSummary, _state: &SimulationState) {
        debug!(
            tick = summary.tick,
            agents_alive = summary.agents_alive,
            "Tick complete"
        );
        for id in &summary.deaths {
            info!(agent = %id, tick = summary.tick, "Casualty this tick");
        }
    }
}

/// Application entry point for the simulation binary.
///
/// # Errors
///
/// Returns an error if configuration loading, world seeding, or the
/// simulation loop fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("volition-engine starting");

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "volition-config.yaml".to_string());
    let config = load_config(Path::new(&config_path))?;
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        tick_interval_ms = config.world.tick_interval_ms,
        max_ticks = config.simulation.max_ticks,
        "Configuration loaded"
    );

    let telemetry: Arc<dyn TelemetrySink> = Arc::new(TracingTelemetry);
    let spawn = spawner::spawn_world(&config, &telemetry)?;

    let mut state = SimulationState::new(spawn.agents);
    let mut callback = SummaryCallback;
    let result = runner::run_simulation(
        &mut state,
        &config.simulation,
        config.world.tick_interval_ms,
        &mut callback,
    )
    .await
    .map_err(EngineError::from)?;

    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        agents_alive = result.final_summary.as_ref().map(|s| s.agents_alive),
        items_left = spawn.arena.item_count(),
        "Simulation ended"
    );
    Ok(())
}

/// Load configuration, falling back to defaults when the file is absent.
fn load_config(path: &Path) -> Result<SimulationConfig, EngineError> {
    if path.exists() {
        Ok(SimulationConfig::from_file(path)?)
    } else {
        info!(path = %path.display(), "No config file found, using defaults");
        Ok(SimulationConfig::default())
    }
}
