//! The perception collaborator.
//!
//! Spatial sensing is external to the engine. Whatever tracks object
//! positions -- a physics scene, a spatial index, a test script -- exposes
//! the single query the decision loop needs: the set of candidates
//! currently within sensing range. The provider refreshes at its own
//! cadence; the engine reads the set once per evaluation and never mutates
//! it.

use std::sync::Mutex;

use crate::possibility::Candidate;

/// Source of candidates within an agent's sensing range.
pub trait PerceptionProvider {
    /// The candidates currently in range, already filtered to exclude the
    /// perceiving agent itself.
    fn candidates_in_range(&self) -> Vec<Candidate>;
}

/// A scripted perception provider for tests and wiring before a real
/// provider exists.
///
/// Holds a fixed candidate list that tests can swap between ticks to
/// simulate objects appearing, moving out of range, or being consumed.
#[derive(Debug, Default)]
pub struct StubPerception {
    candidates: Mutex<Vec<Candidate>>,
}

impl StubPerception {
    /// Create an empty stub provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stub provider pre-loaded with candidates.
    pub fn with_candidates(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates: Mutex::new(candidates),
        }
    }

    /// Replace the candidate set reported on the next query.
    pub fn set_candidates(&self, candidates: Vec<Candidate>) {
        match self.candidates.lock() {
            Ok(mut guard) => *guard = candidates,
            Err(mut poisoned) => **poisoned.get_mut() = candidates,
        }
    }
}

impl PerceptionProvider for StubPerception {
    fn candidates_in_range(&self) -> Vec<Candidate> {
        match self.candidates.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
