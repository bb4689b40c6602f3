//! The navigation collaborator.
//!
//! Moving an agent through the world is external to the engine. The mover
//! accepts a destination and reports the remaining distance; the decision
//! loop polls that distance once per tick while navigating and re-issues
//! the destination until it arrives. No assumption is made about the path
//! algorithm, and an unreachable target simply keeps the loop retrying --
//! that is the expected steady state, not a fault.

use std::sync::{Arc, Mutex, MutexGuard};

use volition_types::Position;

/// Drives one agent's movement toward a target position.
pub trait Mover {
    /// Set (or re-issue) the destination. Idempotent for an unchanged
    /// destination; progress happens at the mover's own cadence.
    fn move_to(&mut self, position: Position);

    /// Remaining straight-line distance to the current destination.
    /// Implementations report `f32::INFINITY` when no destination is set.
    fn distance_to_target(&self) -> f32;

    /// Drop the current destination and stop moving.
    fn cancel(&mut self);
}

/// Internal state of a [`StubMover`].
#[derive(Debug)]
struct StubMoverState {
    target: Option<Position>,
    distance: f32,
    move_count: u32,
    cancelled: bool,
}

/// A scripted mover for tests.
///
/// Distance is set explicitly by the test rather than derived from any
/// movement model, which makes arrival and retry behavior deterministic
/// to exercise. Handles are cheap clones of shared state, so a test can
/// keep one while the agent owns another.
#[derive(Debug, Clone)]
pub struct StubMover {
    inner: Arc<Mutex<StubMoverState>>,
}

impl StubMover {
    /// Create a stub mover with no destination.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StubMoverState {
                target: None,
                distance: f32::INFINITY,
                move_count: 0,
                cancelled: false,
            })),
        }
    }

    /// Script the distance reported on subsequent polls.
    pub fn set_distance(&self, distance: f32) {
        self.lock().distance = distance;
    }

    /// The destination most recently issued, if any.
    pub fn target(&self) -> Option<Position> {
        self.lock().target
    }

    /// How many times a destination has been issued.
    pub fn move_count(&self) -> u32 {
        self.lock().move_count
    }

    /// Whether navigation has been cancelled since the last `move_to`.
    pub fn cancelled(&self) -> bool {
        self.lock().cancelled
    }

    fn lock(&self) -> MutexGuard<'_, StubMoverState> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for StubMover {
    fn default() -> Self {
        Self::new()
    }
}

impl Mover for StubMover {
    fn move_to(&mut self, position: Position) {
        let mut state = self.lock();
        state.target = Some(position);
        state.move_count = state.move_count.saturating_add(1);
        state.cancelled = false;
    }

    fn distance_to_target(&self) -> f32 {
        self.lock().distance
    }

    fn cancel(&mut self) {
        let mut state = self.lock();
        state.target = None;
        state.cancelled = true;
    }
}
