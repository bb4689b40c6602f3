//! Telemetry events published by the decision engine.
//!
//! Every observable state change produces an event handed to the telemetry
//! sink: stat mutations, chosen actions with their utility, action results,
//! and deaths. Publication is one-way and fire-and-forget -- the engine
//! never blocks on or reads back from telemetry.

use serde::{Deserialize, Serialize};

use crate::ids::{AgentId, CandidateId};
use crate::possibility::PossibilityKind;

/// A single telemetry event.
///
/// Events carry the tick on which they occurred so sinks can order and
/// correlate them without consulting the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// An agent's resource stats changed.
    StatsChanged {
        /// The agent whose stats changed.
        agent_id: AgentId,
        /// Current health after the change.
        health: u32,
        /// Current energy after the change.
        energy: u32,
        /// Current attack power after the change.
        attack: u32,
        /// The tick on which the change happened.
        tick: u64,
    },

    /// An agent committed to the highest-utility possibility.
    ActionChosen {
        /// The acting agent.
        agent_id: AgentId,
        /// The kind of action chosen.
        kind: PossibilityKind,
        /// The target candidate.
        target: CandidateId,
        /// The winning utility score.
        utility: f64,
        /// The tick on which the choice was made.
        tick: u64,
    },

    /// An agent consumed an item and applied its boosts.
    ItemApplied {
        /// The acting agent.
        agent_id: AgentId,
        /// The item that was consumed.
        target: CandidateId,
        /// The tick on which the item was applied.
        tick: u64,
    },

    /// An agent landed an attack on a rival.
    AttackLanded {
        /// The attacking agent.
        attacker: AgentId,
        /// The agent that took the damage.
        target: AgentId,
        /// Damage dealt (the attacker's attack value).
        damage: u32,
        /// The target's health after the damage was applied.
        target_health: u32,
        /// The tick on which the attack landed.
        tick: u64,
    },

    /// A committed action was abandoned before it resolved.
    ActionAborted {
        /// The acting agent.
        agent_id: AgentId,
        /// The kind of action that was abandoned.
        kind: PossibilityKind,
        /// The tick on which the action was abandoned.
        tick: u64,
    },

    /// An agent's health reached zero and it was removed from the world.
    AgentDied {
        /// The agent that died.
        agent_id: AgentId,
        /// The tick on which the death occurred.
        tick: u64,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_with_tag() {
        let event = TelemetryEvent::AgentDied {
            agent_id: AgentId::new(),
            tick: 7,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json.get("event").and_then(|v| v.as_str()), Some("agent_died"));
        assert_eq!(json.get("tick").and_then(serde_json::Value::as_u64), Some(7));
    }

    #[test]
    fn chosen_action_round_trips() {
        let event = TelemetryEvent::ActionChosen {
            agent_id: AgentId::new(),
            kind: PossibilityKind::Attack,
            target: CandidateId::new(),
            utility: 17.5,
            tick: 3,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: TelemetryEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
