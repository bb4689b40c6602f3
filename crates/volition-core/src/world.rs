//! One-way world mutation commands.
//!
//! When an agent consumes an item or kills a rival, the world must change:
//! the item disappears from the candidate pool, the dead agent leaves the
//! simulation. The engine issues these as fire-and-forget commands and
//! never waits for acknowledgement -- whatever owns the scene applies them
//! at its own pace.

use std::sync::{Mutex, MutexGuard};

use volition_types::{AgentId, CandidateId};

/// Receiver of world mutation commands issued by the engine.
pub trait WorldHandle {
    /// Remove a consumed item (or otherwise spent candidate) from the world.
    fn remove_candidate(&self, id: CandidateId);

    /// Remove a dead agent from the simulation.
    fn destroy_agent(&self, id: AgentId);
}

/// Recorded commands inside a [`StubWorld`].
#[derive(Debug, Default)]
struct StubWorldState {
    removed: Vec<CandidateId>,
    destroyed: Vec<AgentId>,
}

/// A recording world handle for tests.
#[derive(Debug, Default)]
pub struct StubWorld {
    state: Mutex<StubWorldState>,
}

impl StubWorld {
    /// Create an empty recording world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidates the engine has asked to remove, in order.
    pub fn removed(&self) -> Vec<CandidateId> {
        self.lock().removed.clone()
    }

    /// Agents the engine has asked to destroy, in order.
    pub fn destroyed(&self) -> Vec<AgentId> {
        self.lock().destroyed.clone()
    }

    fn lock(&self) -> MutexGuard<'_, StubWorldState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl WorldHandle for StubWorld {
    fn remove_candidate(&self, id: CandidateId) {
        self.lock().removed.push(id);
    }

    fn destroy_agent(&self, id: AgentId) {
        self.lock().destroyed.push(id);
    }
}
