//! The bounded async simulation loop.
//!
//! [`run_tick`] executes one synchronous tick across every living agent.
//! [`run_simulation`] wraps it in an async loop that sleeps the configured
//! tick interval and stops on the first boundary hit:
//!
//! - **Tick limit**: `max_ticks` have executed
//! - **Time limit**: `max_real_time_seconds` of wall-clock time elapsed
//! - **Extinction**: no living agents remain
//!
//! Agents tick in insertion order within a tick. Dead agents are retired
//! at the end of the tick in which they died, so an agent slain mid-tick
//! never acts again.

use std::time::Instant;

use tracing::{debug, info};
use volition_types::AgentId;

use crate::agent::{Agent, TickOutcome};
use crate::config::SimulationBoundsConfig;

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The simulation was started with no agents.
    #[error("cannot run a simulation with no agents")]
    NoAgents,
}

/// The reason a bounded simulation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEndReason {
    /// The configured tick limit was reached.
    MaxTicksReached,
    /// The configured wall-clock limit was reached.
    MaxRealTimeReached,
    /// Every agent died.
    Extinction,
}

/// Result of a bounded simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
}

/// Mutable state threaded through the tick loop.
pub struct SimulationState {
    /// The living agents, in spawn order.
    pub agents: Vec<Agent>,
    /// The last executed tick number; 0 before the first tick.
    pub tick: u64,
}

impl SimulationState {
    /// Create the initial state from a set of spawned agents.
    pub const fn new(agents: Vec<Agent>) -> Self {
        Self { agents, tick: 0 }
    }
}

/// What happened during one tick.
#[derive(Debug, Clone)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Per-agent outcomes, in tick order.
    pub outcomes: Vec<TickOutcome>,
    /// Number of living agents at end of tick.
    pub agents_alive: u32,
    /// Agents retired during this tick.
    pub deaths: Vec<AgentId>,
}

/// Callback invoked after each tick completes.
///
/// Implementations can use this to print summaries, feed dashboards, etc.
pub trait TickCallback: Send {
    /// Called after a tick completes.
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &SimulationState) {}
}

/// Execute one tick across every living agent and retire the dead.
pub fn run_tick(state: &mut SimulationState) -> TickSummary {
    state.tick = state.tick.saturating_add(1);
    let tick = state.tick;
    debug!(tick, agents = state.agents.len(), "Tick started");

    let outcomes: Vec<TickOutcome> = state.agents.iter_mut().map(|a| a.tick(tick)).collect();

    // Retire after the full pass, so an agent slain by an earlier-ticking
    // rival still surfaces its own `died` outcome this tick.
    let deaths: Vec<AgentId> = state
        .agents
        .iter()
        .filter(|a| a.is_dead())
        .map(Agent::id)
        .collect();
    state.agents.retain(|a| !a.is_dead());

    for id in &deaths {
        info!(agent = %id, tick, "Agent retired");
    }

    TickSummary {
        tick,
        outcomes,
        agents_alive: u32::try_from(state.agents.len()).unwrap_or(u32::MAX),
        deaths,
    }
}

/// Run the simulation loop until a termination condition is met.
///
/// # Arguments
///
/// * `state` - Mutable simulation state (agents plus tick counter)
/// * `bounds` - Tick and wall-clock limits
/// * `tick_interval_ms` - Real-time milliseconds between ticks; 0 runs flat out
/// * `callback` - Called after each tick for observer updates
///
/// # Errors
///
/// Returns [`RunnerError::NoAgents`] if the state holds no agents at start.
pub async fn run_simulation(
    state: &mut SimulationState,
    bounds: &SimulationBoundsConfig,
    tick_interval_ms: u64,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    if state.agents.is_empty() {
        return Err(RunnerError::NoAgents);
    }

    let started = Instant::now();
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks = bounds.max_ticks,
        max_real_time_seconds = bounds.max_real_time_seconds,
        tick_interval_ms,
        "Simulation starting"
    );

    loop {
        if started.elapsed().as_secs() >= bounds.max_real_time_seconds {
            info!(
                max_seconds = bounds.max_real_time_seconds,
                "Real-time limit reached"
            );
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::MaxRealTimeReached,
                final_summary: last_summary,
                total_ticks,
            });
        }

        let summary = run_tick(state);
        total_ticks = total_ticks.saturating_add(1);
        callback.on_tick(&summary, state);

        if summary.agents_alive == 0 {
            info!(tick = summary.tick, "All agents dead -- extinction");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::Extinction,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        if summary.tick >= bounds.max_ticks {
            info!(tick = summary.tick, max_ticks = bounds.max_ticks, "Tick limit reached");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::MaxTicksReached,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        last_summary = Some(summary);

        if tick_interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(tick_interval_ms)).await;
        }
    }
}
