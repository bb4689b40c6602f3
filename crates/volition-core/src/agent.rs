//! The autonomous agent: collaborator wiring and the per-tick loop.
//!
//! An agent owns its stats handle, its decision weights, and its executor,
//! and borrows the world through four collaborator seams: perception,
//! navigation, world mutation, and telemetry. The first three are
//! mandatory -- an agent cannot sense, move, or act without them, so a
//! missing one fails construction rather than surfacing later as a
//! mysterious no-op. Telemetry alone is optional and defaults to a null
//! sink.
//!
//! The tick loop never evaluates while an action is in flight: once the
//! executor holds a commitment, each tick advances it and nothing else.
//! Interruption happens only through target staleness, never through a
//! better option appearing mid-navigation.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};
use volition_agents::{BehaviorConfig, ResourceState, SharedStats, Weights, check_death};
use volition_types::{AgentId, PossibilityKind, TelemetryEvent};

use crate::decision::evaluate;
use crate::executor::{ActionExecutor, ExecStatus, ExecutionContext};
use crate::navigation::Mover;
use crate::perception::PerceptionProvider;
use crate::telemetry::{NullTelemetry, TelemetrySink};
use crate::world::WorldHandle;

/// A required collaborator was not supplied to [`AgentBuilder::build`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// No perception provider was supplied.
    #[error("agent requires a perception provider")]
    MissingPerception,
    /// No mover was supplied.
    #[error("agent requires a mover")]
    MissingMover,
    /// No world handle was supplied.
    #[error("agent requires a world handle")]
    MissingWorld,
}

/// What the agent is doing, as reported after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No viable possibility; waiting for the world to change.
    Idle,
    /// Scored the candidate set and committed to a new action this tick.
    /// Navigation toward the target begins on the same tick.
    Evaluating,
    /// Committed and closing on the target.
    Navigating(PossibilityKind),
    /// Arrived but waiting out a cooldown gate.
    ActionCooldown,
}

/// The observable result of one agent tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// The agent that ticked.
    pub agent_id: AgentId,
    /// The phase the agent ended the tick in.
    pub phase: Phase,
    /// The winning utility, when a choice was made this tick.
    pub utility: Option<f64>,
    /// Whether the agent is dead. A dead agent does nothing and should be
    /// retired by its owner.
    pub died: bool,
}

/// Assembles an [`Agent`] from its collaborators.
///
/// ```
/// use std::sync::Arc;
/// use volition_core::{Agent, StubMover, StubPerception, StubWorld};
///
/// let agent = Agent::builder("scout")
///     .perception(Arc::new(StubPerception::new()))
///     .mover(Box::new(StubMover::new()))
///     .world(Arc::new(StubWorld::new()))
///     .build()
///     .unwrap();
/// assert_eq!(agent.name(), "scout");
/// ```
pub struct AgentBuilder {
    name: String,
    id: Option<AgentId>,
    stats: ResourceState,
    weights: Weights,
    config: BehaviorConfig,
    perception: Option<Arc<dyn PerceptionProvider>>,
    mover: Option<Box<dyn Mover>>,
    world: Option<Arc<dyn WorldHandle>>,
    telemetry: Option<Arc<dyn TelemetrySink>>,
}

impl AgentBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            stats: ResourceState::default(),
            weights: Weights::default(),
            config: BehaviorConfig::default(),
            perception: None,
            mover: None,
            world: None,
            telemetry: None,
        }
    }

    /// Use a pre-chosen identity instead of a fresh one.
    ///
    /// Useful when collaborators are keyed by agent id and must be wired
    /// up before construction.
    #[must_use]
    pub fn id(mut self, id: AgentId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the agent's starting resource state.
    #[must_use]
    pub fn stats(mut self, stats: ResourceState) -> Self {
        self.stats = stats;
        self
    }

    /// Set the agent's decision weights.
    #[must_use]
    pub fn weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the agent's behavior parameters.
    #[must_use]
    pub fn config(mut self, config: BehaviorConfig) -> Self {
        self.config = config;
        self
    }

    /// Supply the perception provider (required).
    #[must_use]
    pub fn perception(mut self, perception: Arc<dyn PerceptionProvider>) -> Self {
        self.perception = Some(perception);
        self
    }

    /// Supply the mover (required).
    #[must_use]
    pub fn mover(mut self, mover: Box<dyn Mover>) -> Self {
        self.mover = Some(mover);
        self
    }

    /// Supply the world handle (required).
    #[must_use]
    pub fn world(mut self, world: Arc<dyn WorldHandle>) -> Self {
        self.world = Some(world);
        self
    }

    /// Supply a telemetry sink (optional; defaults to a null sink).
    #[must_use]
    pub fn telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Finish construction, failing fast on any missing required
    /// collaborator.
    pub fn build(self) -> Result<Agent, BuildError> {
        let perception = self.perception.ok_or(BuildError::MissingPerception)?;
        let mover = self.mover.ok_or(BuildError::MissingMover)?;
        let world = self.world.ok_or(BuildError::MissingWorld)?;
        let telemetry = self
            .telemetry
            .unwrap_or_else(|| Arc::new(NullTelemetry));

        let agent = Agent {
            id: self.id.unwrap_or_else(AgentId::new),
            name: self.name,
            stats: SharedStats::new(self.stats),
            weights: self.weights,
            config: self.config,
            executor: ActionExecutor::new(),
            perception,
            mover,
            world,
            telemetry,
        };
        info!(agent = %agent.id, name = %agent.name, "Agent assembled");
        Ok(agent)
    }
}

/// An autonomous agent driven by utility-scored decisions.
pub struct Agent {
    id: AgentId,
    name: String,
    stats: SharedStats,
    weights: Weights,
    config: BehaviorConfig,
    executor: ActionExecutor,
    perception: Arc<dyn PerceptionProvider>,
    mover: Box<dyn Mover>,
    world: Arc<dyn WorldHandle>,
    telemetry: Arc<dyn TelemetrySink>,
}

// The dyn collaborator fields cannot derive Debug; identity and tunables
// are what logs and assertion failures need anyway.
impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("weights", &self.weights)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Agent {
    /// Start building an agent.
    pub fn builder(name: impl Into<String>) -> AgentBuilder {
        AgentBuilder::new(name)
    }

    /// The agent's identity.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// The agent's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A shareable handle to this agent's stats, for rivals to read and
    /// damage.
    pub fn stats_handle(&self) -> SharedStats {
        self.stats.clone()
    }

    /// Whether this agent's health has reached zero.
    pub fn is_dead(&self) -> bool {
        self.stats.snapshot().is_dead()
    }

    /// Run one tick of the agent's loop.
    ///
    /// Order within the tick: death check, passive energy regeneration,
    /// then either advancing the in-flight action or evaluating the current
    /// candidate set for a new one.
    pub fn tick(&mut self, tick: u64) -> TickOutcome {
        if let Some(cause) = check_death(&self.stats.snapshot()) {
            debug!(agent = %self.id, %cause, tick, "Dead agent skipped");
            return TickOutcome {
                agent_id: self.id,
                phase: Phase::Idle,
                utility: None,
                died: true,
            };
        }

        self.regen(tick);

        let candidates = self.perception.candidates_in_range();
        debug!(
            agent = %self.id,
            tick,
            candidates = candidates.len(),
            committed = self.executor.is_committed(),
            "Tick"
        );

        if self.executor.is_committed() {
            let kind = self.executor.current_kind();
            let mut ctx = ExecutionContext {
                tick,
                agent_id: self.id,
                stats: &self.stats,
                config: &self.config,
                mover: self.mover.as_mut(),
                world: self.world.as_ref(),
                telemetry: self.telemetry.as_ref(),
            };
            let status = self.executor.advance(&candidates, &mut ctx);
            let phase = match (status, kind) {
                (ExecStatus::Navigating, Some(kind)) => Phase::Navigating(kind),
                (ExecStatus::HoldingForCooldown, _) => Phase::ActionCooldown,
                _ => Phase::Idle,
            };
            return TickOutcome {
                agent_id: self.id,
                phase,
                utility: None,
                died: self.is_dead(),
            };
        }

        let snapshot = self.stats.snapshot();
        let Some(choice) = evaluate(&candidates, &snapshot, &self.weights) else {
            return TickOutcome {
                agent_id: self.id,
                phase: Phase::Idle,
                utility: None,
                died: false,
            };
        };

        self.telemetry.publish(TelemetryEvent::ActionChosen {
            agent_id: self.id,
            kind: choice.model.kind(),
            target: choice.model.candidate(),
            utility: choice.utility,
            tick,
        });

        let utility = choice.utility;
        let mut ctx = ExecutionContext {
            tick,
            agent_id: self.id,
            stats: &self.stats,
            config: &self.config,
            mover: self.mover.as_mut(),
            world: self.world.as_ref(),
            telemetry: self.telemetry.as_ref(),
        };
        self.executor.begin(choice.model, &mut ctx);

        TickOutcome {
            agent_id: self.id,
            phase: Phase::Evaluating,
            utility: Some(utility),
            died: false,
        }
    }

    /// Apply passive energy regeneration, publishing the stat change only
    /// when it actually moved the value (regeneration at the cap is a
    /// no-op).
    fn regen(&mut self, tick: u64) {
        let before = self.stats.snapshot().energy;
        let state = self.stats.regen_energy(self.config.energy_regen_per_tick);
        if state.energy != before {
            self.telemetry.publish(TelemetryEvent::StatsChanged {
                agent_id: self.id,
                health: state.health,
                energy: state.energy,
                attack: state.attack,
                tick,
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use volition_types::{CandidateId, ItemBoosts, Position};

    use super::*;
    use crate::navigation::StubMover;
    use crate::perception::StubPerception;
    use crate::telemetry::RecordingTelemetry;
    use crate::world::StubWorld;

    struct Harness {
        perception: Arc<StubPerception>,
        mover: StubMover,
        world: Arc<StubWorld>,
        telemetry: Arc<RecordingTelemetry>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                perception: Arc::new(StubPerception::new()),
                mover: StubMover::new(),
                world: Arc::new(StubWorld::new()),
                telemetry: Arc::new(RecordingTelemetry::new()),
            }
        }

        fn agent(&self, stats: ResourceState) -> Agent {
            Agent::builder("test-agent")
                .stats(stats)
                .perception(Arc::clone(&self.perception) as Arc<dyn PerceptionProvider>)
                .mover(Box::new(self.mover.clone()))
                .world(Arc::clone(&self.world) as Arc<dyn WorldHandle>)
                .telemetry(Arc::clone(&self.telemetry) as Arc<dyn TelemetrySink>)
                .build()
                .unwrap()
        }
    }

    fn health_item(position: Position) -> crate::possibility::Candidate {
        crate::possibility::Candidate::item(
            CandidateId::new(),
            position,
            ItemBoosts::new(30, 0, 0),
        )
    }

    #[test]
    fn debug_output_names_the_agent() {
        let harness = Harness::new();
        let agent = harness.agent(ResourceState::default());
        let rendered = format!("{agent:?}");
        assert!(rendered.contains("test-agent"));
        assert!(rendered.contains(&agent.id().to_string()));
    }

    #[test]
    fn missing_collaborators_fail_construction() {
        let err = Agent::builder("a").build().unwrap_err();
        assert!(matches!(err, BuildError::MissingPerception));

        let err = Agent::builder("a")
            .perception(Arc::new(StubPerception::new()))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingMover));

        let err = Agent::builder("a")
            .perception(Arc::new(StubPerception::new()))
            .mover(Box::new(StubMover::new()))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingWorld));
    }

    #[test]
    fn empty_world_leaves_agent_idle() {
        let harness = Harness::new();
        let mut agent = harness.agent(ResourceState::new(40, 40, 20));
        let outcome = agent.tick(1);
        assert_eq!(outcome.phase, Phase::Idle);
        assert_eq!(outcome.utility, None);
        assert!(!outcome.died);
    }

    #[test]
    fn viable_item_commits_and_starts_navigation() {
        let harness = Harness::new();
        let target = Position::new(30.0, 0.0, 0.0);
        harness.perception.set_candidates(vec![health_item(target)]);
        harness.mover.set_distance(30.0);

        let mut agent = harness.agent(ResourceState::new(40, 100, 20));
        let outcome = agent.tick(1);
        assert_eq!(outcome.phase, Phase::Evaluating);
        assert!(outcome.utility.unwrap() > 0.0);
        // Navigation is issued on the choice tick itself.
        assert_eq!(harness.mover.target(), Some(target));
        assert!(harness
            .telemetry
            .events()
            .iter()
            .any(|e| matches!(e, TelemetryEvent::ActionChosen { .. })));

        // The next tick the agent is en route, not re-evaluating.
        let outcome = agent.tick(2);
        assert_eq!(outcome.phase, Phase::Navigating(PossibilityKind::ApplyItem));
        assert_eq!(outcome.utility, None);
    }

    #[test]
    fn committed_agent_does_not_re_evaluate() {
        let harness = Harness::new();
        let far_item = health_item(Position::new(50.0, 0.0, 0.0));
        harness.perception.set_candidates(vec![far_item.clone()]);
        harness.mover.set_distance(50.0);

        let mut agent = harness.agent(ResourceState::new(40, 100, 20));
        let first = agent.tick(1);
        assert_eq!(first.phase, Phase::Evaluating);
        assert!(first.utility.is_some());

        // A second, better item appears; the agent stays on course.
        let better = crate::possibility::Candidate::item(
            CandidateId::new(),
            Position::new(1.0, 0.0, 0.0),
            ItemBoosts::new(60, 60, 0),
        );
        harness
            .perception
            .set_candidates(vec![far_item, better]);
        let second = agent.tick(2);
        assert_eq!(
            second.phase,
            Phase::Navigating(PossibilityKind::ApplyItem)
        );
        assert_eq!(second.utility, None);
    }

    #[test]
    fn full_health_item_yields_idle() {
        let harness = Harness::new();
        harness
            .perception
            .set_candidates(vec![health_item(Position::default())]);

        let mut agent = harness.agent(ResourceState::new(100, 100, 20));
        let outcome = agent.tick(1);
        assert_eq!(outcome.phase, Phase::Idle);
    }

    #[test]
    fn arrival_completes_pickup_and_returns_to_idle() {
        let harness = Harness::new();
        let item = health_item(Position::new(5.0, 0.0, 0.0));
        harness.perception.set_candidates(vec![item.clone()]);
        harness.mover.set_distance(5.0);

        let mut agent = harness.agent(ResourceState::new(40, 100, 20));
        let _ = agent.tick(1);
        let outcome = agent.tick(2);
        assert_eq!(outcome.phase, Phase::Idle);
        assert_eq!(harness.world.removed(), vec![item.id]);
        assert_eq!(agent.stats_handle().snapshot().health, 70);
    }

    #[test]
    fn dead_agent_does_nothing() {
        let harness = Harness::new();
        harness
            .perception
            .set_candidates(vec![health_item(Position::default())]);

        let mut agent = harness.agent(ResourceState::new(0, 100, 20));
        let outcome = agent.tick(1);
        assert!(outcome.died);
        assert_eq!(outcome.phase, Phase::Idle);
        // No regen, no evaluation, no telemetry.
        assert_eq!(agent.stats_handle().snapshot().energy, 100);
        assert!(harness.telemetry.events().is_empty());
    }

    #[test]
    fn energy_regenerates_each_tick_up_to_the_cap() {
        let harness = Harness::new();
        let mut agent = harness.agent(ResourceState::new(100, 97, 20));

        let _ = agent.tick(1);
        assert_eq!(agent.stats_handle().snapshot().energy, 99);
        let _ = agent.tick(2);
        assert_eq!(agent.stats_handle().snapshot().energy, 100);

        // At the cap regen is a no-op and publishes nothing further.
        let events_before = harness.telemetry.events().len();
        let _ = agent.tick(3);
        assert_eq!(agent.stats_handle().snapshot().energy, 100);
        assert_eq!(harness.telemetry.events().len(), events_before);
    }
}
