//! Telemetry sink that routes engine events into structured log output.
//!
//! Stat changes are frequent and flow at debug level; everything an
//! observer would care about (choices, attacks, deaths) flows at info.

use tracing::{debug, info};
use volition_core::TelemetrySink;
use volition_types::TelemetryEvent;

/// A [`TelemetrySink`] backed by the `tracing` subscriber.
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn publish(&self, event: TelemetryEvent) {
        match event {
            TelemetryEvent::StatsChanged {
                agent_id,
                health,
                energy,
                attack,
                tick,
            } => {
                debug!(agent = %agent_id, health, energy, attack, tick, "Stats changed");
            }
            TelemetryEvent::ActionChosen {
                agent_id,
                kind,
                target,
                utility,
                tick,
            } => {
                info!(agent = %agent_id, %kind, target = %target, utility, tick, "Action chosen");
            }
            TelemetryEvent::ItemApplied {
                agent_id,
                target,
                tick,
            } => {
                info!(agent = %agent_id, item = %target, tick, "Item applied");
            }
            TelemetryEvent::AttackLanded {
                attacker,
                target,
                damage,
                target_health,
                tick,
            } => {
                info!(attacker = %attacker, target = %target, damage, target_health, tick, "Attack landed");
            }
            TelemetryEvent::ActionAborted {
                agent_id,
                kind,
                tick,
            } => {
                info!(agent = %agent_id, %kind, tick, "Action aborted");
            }
            TelemetryEvent::AgentDied { agent_id, tick } => {
                info!(agent = %agent_id, tick, "Agent died");
            }
        }
    }
}
