//! Action execution: navigation polling, cooldown gates, and resolution.
//!
//! Once the decision loop commits to a possibility, the executor owns it
//! until it resolves or aborts. Each tick the executor:
//!
//! 1. Checks the target is still valid (present in the candidate set, and
//!    for rivals, still alive). A stale target aborts back to idle with no
//!    penalty and no retry of that target.
//! 2. Polls the mover's remaining distance. Below the arrival threshold the
//!    agent has arrived; otherwise the destination is re-issued and the
//!    executor waits a tick. Re-issuing is retry, not failure, and has no
//!    timeout.
//! 3. On arrival, waits for the action's cooldown gate -- arrival alone
//!    never bypasses cooldown.
//! 4. Resolves: applies item boosts, or trades damage with the rival.
//!
//! Attack and pickup cooldowns are tracked independently so configuration
//! decides whether the two action kinds share a rhythm.

use tracing::{debug, info};
use volition_agents::{BehaviorConfig, SharedStats};
use volition_types::{AgentId, PossibilityKind, TelemetryEvent};

use crate::navigation::Mover;
use crate::possibility::{Candidate, PossibilityModel};
use crate::telemetry::TelemetrySink;
use crate::utility::ATTACK_ENERGY_COST;
use crate::world::WorldHandle;

/// Everything the executor needs to act on the world during one tick.
///
/// Borrowed from the owning agent; the executor itself holds only its
/// commitment and cooldown state.
pub struct ExecutionContext<'a> {
    /// The current tick number.
    pub tick: u64,
    /// The acting agent's identity.
    pub agent_id: AgentId,
    /// The acting agent's own stats handle.
    pub stats: &'a SharedStats,
    /// Behavior parameters (cooldowns, arrival threshold).
    pub config: &'a BehaviorConfig,
    /// The agent's mover.
    pub mover: &'a mut dyn Mover,
    /// World mutation command receiver.
    pub world: &'a dyn WorldHandle,
    /// Telemetry event receiver.
    pub telemetry: &'a dyn TelemetrySink,
}

/// What the executor did with the current commitment this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    /// No commitment to advance.
    Idle,
    /// Still closing on the target; destination re-issued.
    Navigating,
    /// Arrived, but the cooldown gate is closed; holding position.
    HoldingForCooldown,
    /// The action resolved this tick.
    Completed,
    /// The target went stale and the commitment was abandoned.
    Aborted,
}

/// Drives one agent's committed action to completion or abandonment.
#[derive(Debug)]
pub struct ActionExecutor {
    /// First tick at which another attack may resolve.
    attack_ready_at: u64,
    /// First tick at which another pickup may resolve.
    pickup_ready_at: u64,
    /// The commitment currently being driven, if any.
    current: Option<PossibilityModel>,
}

impl ActionExecutor {
    /// Create an executor with open cooldown gates and no commitment.
    pub const fn new() -> Self {
        Self {
            attack_ready_at: 0,
            pickup_ready_at: 0,
            current: None,
        }
    }

    /// Whether the executor is driving a commitment.
    pub const fn is_committed(&self) -> bool {
        self.current.is_some()
    }

    /// The kind of the current commitment, if any.
    pub const fn current_kind(&self) -> Option<PossibilityKind> {
        match &self.current {
            Some(model) => Some(model.kind()),
            None => None,
        }
    }

    /// Commit to a possibility and issue the first navigation request.
    pub fn begin(&mut self, model: PossibilityModel, ctx: &mut ExecutionContext<'_>) {
        debug!(
            agent = %ctx.agent_id,
            kind = %model.kind(),
            target = %model.candidate(),
            "Committing to action"
        );
        ctx.mover.move_to(model.position());
        self.current = Some(model);
    }

    /// Advance the current commitment by one tick.
    ///
    /// `candidates` is the perception set read this tick, used to detect
    /// targets that were destroyed or left sensing range.
    pub fn advance(
        &mut self,
        candidates: &[Candidate],
        ctx: &mut ExecutionContext<'_>,
    ) -> ExecStatus {
        let Some(model) = self.current.clone() else {
            return ExecStatus::Idle;
        };

        if target_is_stale(&model, candidates) {
            debug!(
                agent = %ctx.agent_id,
                target = %model.candidate(),
                "Target gone before arrival, abandoning action"
            );
            self.abort(&model, ctx);
            return ExecStatus::Aborted;
        }

        let distance = ctx.mover.distance_to_target();
        if distance >= ctx.config.arrival_threshold {
            // Not there yet: re-issue the destination and wait a tick.
            ctx.mover.move_to(model.position());
            return ExecStatus::Navigating;
        }

        if !self.action_ready(model.kind(), ctx.tick) {
            return ExecStatus::HoldingForCooldown;
        }

        match model {
            PossibilityModel::ApplyItem {
                candidate, boosts, ..
            } => {
                let state = ctx.stats.apply_boosts(&boosts);
                ctx.world.remove_candidate(candidate);
                ctx.mover.cancel();
                self.pickup_ready_at =
                    ctx.tick.saturating_add(ctx.config.pickup_cooldown_ticks);

                ctx.telemetry.publish(TelemetryEvent::ItemApplied {
                    agent_id: ctx.agent_id,
                    target: candidate,
                    tick: ctx.tick,
                });
                ctx.telemetry.publish(TelemetryEvent::StatsChanged {
                    agent_id: ctx.agent_id,
                    health: state.health,
                    energy: state.energy,
                    attack: state.attack,
                    tick: ctx.tick,
                });
                info!(
                    agent = %ctx.agent_id,
                    item = %candidate,
                    health = state.health,
                    energy = state.energy,
                    attack = state.attack,
                    "Item applied"
                );
            }

            PossibilityModel::Attack { rival, .. } => {
                let own = ctx.stats.deduct_energy(ATTACK_ENERGY_COST);
                ctx.telemetry.publish(TelemetryEvent::StatsChanged {
                    agent_id: ctx.agent_id,
                    health: own.health,
                    energy: own.energy,
                    attack: own.attack,
                    tick: ctx.tick,
                });

                // Damage, clamp, and death check happen atomically inside
                // the rival's stats handle.
                let outcome = rival.stats.apply_damage(own.attack);
                ctx.telemetry.publish(TelemetryEvent::AttackLanded {
                    attacker: ctx.agent_id,
                    target: rival.agent_id,
                    damage: own.attack,
                    target_health: outcome.remaining_health,
                    tick: ctx.tick,
                });
                info!(
                    agent = %ctx.agent_id,
                    target = %rival.agent_id,
                    damage = own.attack,
                    target_health = outcome.remaining_health,
                    "Attack landed"
                );

                if outcome.died {
                    // Removal is commanded on the same tick as the lethal
                    // write; nothing further is dispatched at this agent.
                    ctx.world.destroy_agent(rival.agent_id);
                    ctx.telemetry.publish(TelemetryEvent::AgentDied {
                        agent_id: rival.agent_id,
                        tick: ctx.tick,
                    });
                    info!(agent = %ctx.agent_id, target = %rival.agent_id, "Rival slain");
                }

                ctx.mover.cancel();
                self.attack_ready_at =
                    ctx.tick.saturating_add(ctx.config.attack_cooldown_ticks);
            }
        }

        self.current = None;
        ExecStatus::Completed
    }

    /// Abandon the current commitment: cancel navigation, publish the
    /// abort, and return to idle. No penalty is applied.
    fn abort(&mut self, model: &PossibilityModel, ctx: &mut ExecutionContext<'_>) {
        ctx.mover.cancel();
        ctx.telemetry.publish(TelemetryEvent::ActionAborted {
            agent_id: ctx.agent_id,
            kind: model.kind(),
            tick: ctx.tick,
        });
        self.current = None;
    }

    /// Whether the cooldown gate for `kind` is open at `tick`.
    const fn action_ready(&self, kind: PossibilityKind, tick: u64) -> bool {
        match kind {
            PossibilityKind::Attack => tick >= self.attack_ready_at,
            PossibilityKind::ApplyItem => tick >= self.pickup_ready_at,
        }
    }
}

impl Default for ActionExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the committed target has been destroyed or left sensing range.
///
/// Items are stale when their id no longer appears in the candidate set.
/// Rivals are additionally stale when already dead -- a corpse takes no
/// further damage.
fn target_is_stale(model: &PossibilityModel, candidates: &[Candidate]) -> bool {
    let in_range = candidates.iter().any(|c| c.id == model.candidate());
    match model {
        PossibilityModel::ApplyItem { .. } => !in_range,
        PossibilityModel::Attack { rival, .. } => !in_range || rival.stats.snapshot().is_dead(),
    }
}
