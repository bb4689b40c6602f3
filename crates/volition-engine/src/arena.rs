//! The in-memory arena world backing the simulation binary.
//!
//! The arena tracks item and agent entities on a flat plane and hands each
//! agent three views of itself: a radius-limited perception query, a
//! straight-line mover, and a one-way mutation handle. All three share one
//! lock over the arena state; each call acquires it briefly and never holds
//! it across agent code.
//!
//! Items and rival agents are sensed at independent radii, so a nearby
//! pickup can be visible while a distant rival is not.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};
use volition_agents::SharedStats;
use volition_core::config::PerceptionConfig;
use volition_core::{Candidate, Mover, PerceptionProvider, WorldHandle};
use volition_types::{AgentId, CandidateId, ItemBoosts, Position};

/// Distance an agent covers per re-issued movement request.
const MOVE_SPEED: f32 = 5.0;

struct ItemEntity {
    position: Position,
    boosts: ItemBoosts,
}

struct AgentEntity {
    candidate_id: CandidateId,
    position: Position,
    stats: SharedStats,
}

#[derive(Default)]
struct ArenaState {
    items: BTreeMap<CandidateId, ItemEntity>,
    agents: BTreeMap<AgentId, AgentEntity>,
}

/// The shared arena world.
pub struct Arena {
    state: Arc<Mutex<ArenaState>>,
    perception: PerceptionConfig,
}

impl Arena {
    /// Create an empty arena with the given sensing radii.
    pub fn new(perception: PerceptionConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(ArenaState::default())),
            perception,
        }
    }

    /// Place a consumable item and return its candidate identity.
    pub fn add_item(&self, position: Position, boosts: ItemBoosts) -> CandidateId {
        let id = CandidateId::new();
        lock(&self.state).items.insert(id, ItemEntity { position, boosts });
        debug!(item = %id, %position, "Item placed");
        id
    }

    /// Register an agent entity at a starting position.
    ///
    /// The stats handle is the same one the agent itself holds, so rivals
    /// perceive and damage live state.
    pub fn register_agent(&self, agent_id: AgentId, position: Position, stats: SharedStats) {
        let entity = AgentEntity {
            candidate_id: CandidateId::new(),
            position,
            stats,
        };
        lock(&self.state).agents.insert(agent_id, entity);
        debug!(agent = %agent_id, %position, "Agent registered");
    }

    /// Number of items currently in the arena.
    pub fn item_count(&self) -> usize {
        lock(&self.state).items.len()
    }

    /// Number of agent entities currently in the arena.
    pub fn agent_count(&self) -> usize {
        lock(&self.state).agents.len()
    }

    /// The perception view for one agent.
    pub fn perception_for(&self, agent_id: AgentId) -> ArenaPerception {
        ArenaPerception {
            state: Arc::clone(&self.state),
            perception: self.perception.clone(),
            agent_id,
        }
    }

    /// The mover for one agent.
    pub fn mover_for(&self, agent_id: AgentId) -> ArenaMover {
        ArenaMover {
            state: Arc::clone(&self.state),
            agent_id,
            target: None,
        }
    }
}

impl WorldHandle for Arena {
    fn remove_candidate(&self, id: CandidateId) {
        if lock(&self.state).items.remove(&id).is_some() {
            debug!(item = %id, "Item removed from arena");
        }
    }

    fn destroy_agent(&self, id: AgentId) {
        if lock(&self.state).agents.remove(&id).is_some() {
            info!(agent = %id, "Agent destroyed in arena");
        }
    }
}

/// Radius-limited perception over the arena, from one agent's vantage.
pub struct ArenaPerception {
    state: Arc<Mutex<ArenaState>>,
    perception: PerceptionConfig,
    agent_id: AgentId,
}

impl PerceptionProvider for ArenaPerception {
    fn candidates_in_range(&self) -> Vec<Candidate> {
        let state = lock(&self.state);
        let Some(own) = state.agents.get(&self.agent_id) else {
            // Destroyed agents see nothing.
            return Vec::new();
        };
        let origin = own.position;

        let mut candidates = Vec::new();
        for (id, item) in &state.items {
            if origin.distance_to(&item.position) <= self.perception.item_sense_radius {
                candidates.push(Candidate::item(*id, item.position, item.boosts));
            }
        }
        for (agent_id, entity) in &state.agents {
            if *agent_id == self.agent_id {
                continue;
            }
            if entity.stats.snapshot().is_dead() {
                continue;
            }
            if origin.distance_to(&entity.position) <= self.perception.agent_sense_radius {
                candidates.push(Candidate::rival(
                    entity.candidate_id,
                    entity.position,
                    *agent_id,
                    entity.stats.clone(),
                ));
            }
        }
        candidates
    }
}

/// Straight-line movement at a fixed speed per tick.
///
/// Each re-issued `move_to` advances the agent one step toward the target,
/// which matches the executor's retry rhythm of one request per tick.
pub struct ArenaMover {
    state: Arc<Mutex<ArenaState>>,
    agent_id: AgentId,
    target: Option<Position>,
}

impl Mover for ArenaMover {
    fn move_to(&mut self, target: Position) {
        self.target = Some(target);
        let mut state = lock(&self.state);
        if let Some(entity) = state.agents.get_mut(&self.agent_id) {
            entity.position = step_toward(entity.position, target, MOVE_SPEED);
        }
    }

    fn distance_to_target(&self) -> f32 {
        let Some(target) = self.target else {
            return f32::INFINITY;
        };
        let state = lock(&self.state);
        state
            .agents
            .get(&self.agent_id)
            .map_or(f32::INFINITY, |entity| entity.position.distance_to(&target))
    }

    fn cancel(&mut self) {
        self.target = None;
    }
}

/// One movement step from `from` toward `to`, clamped at the target.
fn step_toward(from: Position, to: Position, speed: f32) -> Position {
    let distance = from.distance_to(&to);
    if distance <= speed {
        return to;
    }
    let t = speed / distance;
    Position::new(
        (to.x - from.x).mul_add(t, from.x),
        (to.y - from.y).mul_add(t, from.y),
        (to.z - from.z).mul_add(t, from.z),
    )
}

fn lock(state: &Arc<Mutex<ArenaState>>) -> MutexGuard<'_, ArenaState> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
