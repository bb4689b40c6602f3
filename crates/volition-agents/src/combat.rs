//! Synchronized access to an agent's resource state.
//!
//! The decision loop has a single-writer discipline: only the owning
//! agent's executor mutates its own [`ResourceState`]. The one place where
//! another agent must write -- damage application -- goes through
//! [`SharedStats::apply_damage`], which performs the subtraction, the clamp
//! to 0, and the death check under a single lock acquisition. There is no
//! window in which another caller can observe a half-applied attack.
//!
//! Reads for utility scoring use [`SharedStats::snapshot`] and may be up to
//! one tick stale. That is tolerated by design -- utility scoring is an
//! estimate, not a contract.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;
use volition_types::ItemBoosts;

use crate::stats::ResourceState;

/// Outcome of an atomic damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Health remaining after the damage and clamp.
    pub remaining_health: u32,
    /// Whether this damage reduced health to 0.
    pub died: bool,
}

/// A shareable, synchronized handle to one agent's [`ResourceState`].
///
/// The owning agent holds one clone and treats it as its private state;
/// rival agents hold clones solely to read snapshots for scoring and to
/// apply damage through the synchronized entry point.
#[derive(Debug, Clone)]
pub struct SharedStats {
    inner: Arc<Mutex<ResourceState>>,
}

impl SharedStats {
    /// Wrap a resource state in a synchronized handle.
    pub fn new(state: ResourceState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Read the current state.
    ///
    /// The returned copy is point-in-time: by the time the caller uses it,
    /// a concurrent attack may already have changed the underlying state.
    pub fn snapshot(&self) -> ResourceState {
        *self.lock()
    }

    /// Apply damage atomically with the health clamp and death check.
    ///
    /// This is the only cross-agent write in the system. The subtraction,
    /// floor at 0, and death determination all happen under one lock, so
    /// two concurrent attackers can never produce a lost update on health.
    ///
    /// `died` reports the alive-to-dead transition, not the dead state:
    /// only the hit that actually depletes health observes the kill, and
    /// further hits on a corpse report `died == false`.
    pub fn apply_damage(&self, damage: u32) -> DamageOutcome {
        let mut state = self.lock();
        let was_alive = !state.is_dead();
        let remaining_health = state.take_damage(damage);
        let died = was_alive && state.is_dead();
        debug!(damage, remaining_health, died, "Damage applied");
        DamageOutcome {
            remaining_health,
            died,
        }
    }

    /// Apply item boosts and return the resulting state.
    pub fn apply_boosts(&self, boosts: &ItemBoosts) -> ResourceState {
        let mut state = self.lock();
        state.apply_boosts(boosts);
        *state
    }

    /// Spend energy and return the resulting state.
    pub fn deduct_energy(&self, cost: u32) -> ResourceState {
        let mut state = self.lock();
        state.deduct_energy(cost);
        *state
    }

    /// Apply passive energy regeneration and return the resulting state.
    pub fn regen_energy(&self, rate: u32) -> ResourceState {
        let mut state = self.lock();
        state.regen_energy(rate);
        *state
    }

    /// Acquire the lock, recovering the inner state if a previous holder
    /// panicked. Stat mutations are simple integer writes that cannot be
    /// left half-done, so the last written state is always coherent.
    fn lock(&self) -> MutexGuard<'_, ResourceState> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_writes() {
        let stats = SharedStats::new(ResourceState::new(80, 60, 20));
        let _ = stats.deduct_energy(10);
        let snap = stats.snapshot();
        assert_eq!(snap.energy, 50);
        assert_eq!(snap.health, 80);
    }

    #[test]
    fn damage_reports_death_atomically() {
        let stats = SharedStats::new(ResourceState::new(25, 100, 20));
        let outcome = stats.apply_damage(30);
        assert_eq!(outcome.remaining_health, 0);
        assert!(outcome.died);
        assert!(stats.snapshot().is_dead());
    }

    #[test]
    fn non_lethal_damage_leaves_agent_alive() {
        let stats = SharedStats::new(ResourceState::new(60, 100, 20));
        let outcome = stats.apply_damage(40);
        assert_eq!(outcome.remaining_health, 20);
        assert!(!outcome.died);
    }

    #[test]
    fn hits_on_a_corpse_do_not_report_the_kill() {
        let stats = SharedStats::new(ResourceState::new(10, 100, 20));
        let lethal = stats.apply_damage(10);
        assert!(lethal.died);

        // Only the alive-to-dead transition counts as the kill.
        let post_mortem = stats.apply_damage(5);
        assert_eq!(post_mortem.remaining_health, 0);
        assert!(!post_mortem.died);
    }

    #[test]
    fn clones_share_the_same_state() {
        let stats = SharedStats::new(ResourceState::default());
        let handle = stats.clone();
        let _ = handle.apply_damage(30);
        assert_eq!(stats.snapshot().health, 70);
    }

    #[test]
    fn concurrent_attacks_never_lose_updates() {
        let stats = SharedStats::new(ResourceState::new(100, 100, 20));
        let mut handles = Vec::new();
        for _ in 0..10 {
            let shared = stats.clone();
            handles.push(std::thread::spawn(move || {
                let _ = shared.apply_damage(5);
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(stats.snapshot().health, 50);
    }

    #[test]
    fn exactly_one_attacker_observes_the_kill() {
        let stats = SharedStats::new(ResourceState::new(30, 100, 20));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let shared = stats.clone();
            handles.push(std::thread::spawn(move || shared.apply_damage(10).died));
        }
        let kills: usize = handles
            .into_iter()
            .map(|h| usize::from(h.join().unwrap()))
            .sum();
        assert_eq!(kills, 1);
        assert_eq!(stats.snapshot().health, 0);
    }
}
