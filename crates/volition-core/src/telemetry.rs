//! The telemetry collaborator.
//!
//! Stat changes, chosen actions, and deaths are published as events so an
//! observer -- a log, a HUD, a dashboard -- can display them. Publication
//! is strictly one-way: the engine never blocks on a sink and never reads
//! anything back, so a slow or absent observer cannot affect decisions.

use std::sync::{Mutex, MutexGuard};

use volition_types::TelemetryEvent;

/// Receiver of engine telemetry events.
pub trait TelemetrySink {
    /// Accept an event. Must not block the caller.
    fn publish(&self, event: TelemetryEvent);
}

/// A sink that discards every event.
///
/// The default when no observer is wired up -- telemetry is an optional
/// collaborator, unlike perception and navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn publish(&self, _event: TelemetryEvent) {}
}

/// A sink that records every event, for tests.
#[derive(Debug, Default)]
pub struct RecordingTelemetry {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingTelemetry {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events published so far, in order.
    pub fn events(&self) -> Vec<TelemetryEvent> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TelemetryEvent>> {
        match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn publish(&self, event: TelemetryEvent) {
        self.lock().push(event);
    }
}

#[cfg(test)]
mod tests {
    use volition_types::AgentId;

    use super::*;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingTelemetry::new();
        let a = AgentId::new();
        sink.publish(TelemetryEvent::AgentDied { agent_id: a, tick: 1 });
        sink.publish(TelemetryEvent::AgentDied { agent_id: a, tick: 2 });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events.first(),
            Some(&TelemetryEvent::AgentDied { agent_id: a, tick: 1 })
        );
    }

    #[test]
    fn null_sink_accepts_events() {
        let sink = NullTelemetry;
        sink.publish(TelemetryEvent::AgentDied {
            agent_id: AgentId::new(),
            tick: 1,
        });
    }
}
