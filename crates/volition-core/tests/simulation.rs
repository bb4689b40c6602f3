//! End-to-end scenarios driving full agents through the tick loop.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use volition_agents::{ResourceState, Weights};
use volition_core::config::SimulationBoundsConfig;
use volition_core::runner::{run_simulation, NoOpCallback, SimulationEndReason, SimulationState};
use volition_core::{
    Agent, Candidate, PerceptionProvider, Phase, RecordingTelemetry, StubMover, StubPerception,
    StubWorld, TelemetrySink, WorldHandle, run_tick,
};
use volition_types::{CandidateId, ItemBoosts, Position, TelemetryEvent};

struct Wiring {
    perception: Arc<StubPerception>,
    mover: StubMover,
    world: Arc<StubWorld>,
    telemetry: Arc<RecordingTelemetry>,
}

impl Wiring {
    fn new() -> Self {
        Self {
            perception: Arc::new(StubPerception::new()),
            mover: StubMover::new(),
            world: Arc::new(StubWorld::new()),
            telemetry: Arc::new(RecordingTelemetry::new()),
        }
    }

    fn agent(&self, name: &str, stats: ResourceState, weights: Weights) -> Agent {
        Agent::builder(name)
            .stats(stats)
            .weights(weights)
            .perception(Arc::clone(&self.perception) as Arc<dyn PerceptionProvider>)
            .mover(Box::new(self.mover.clone()))
            .world(Arc::clone(&self.world) as Arc<dyn WorldHandle>)
            .telemetry(Arc::clone(&self.telemetry) as Arc<dyn TelemetrySink>)
            .build()
            .unwrap()
    }
}

#[test]
fn duel_kills_the_weaker_agent_and_retires_it_the_same_tick() {
    let strong_wiring = Wiring::new();
    let weak_wiring = Wiring::new();

    // The strong agent one-shots the weak one; the weak one's attack is
    // vetoed because its health is below the rival's attack value.
    let strong = strong_wiring.agent(
        "strong",
        ResourceState::new(100, 100, 30),
        Weights::default(),
    );
    let weak = weak_wiring.agent("weak", ResourceState::new(25, 100, 10), Weights::default());

    let strong_stats = strong.stats_handle();
    let weak_stats = weak.stats_handle();
    let weak_id = weak.id();

    strong_wiring.perception.set_candidates(vec![Candidate::rival(
        CandidateId::new(),
        Position::new(5.0, 0.0, 0.0),
        weak_id,
        weak_stats.clone(),
    )]);
    weak_wiring.perception.set_candidates(vec![Candidate::rival(
        CandidateId::new(),
        Position::new(-5.0, 0.0, 0.0),
        strong.id(),
        strong_stats.clone(),
    )]);
    strong_wiring.mover.set_distance(5.0);
    weak_wiring.mover.set_distance(5.0);

    let mut state = SimulationState::new(vec![strong, weak]);

    // Tick 1: the strong agent commits; the weak agent's attack scores 0
    // (health 25 < rival attack 30) so it idles.
    let summary = run_tick(&mut state);
    assert_eq!(summary.outcomes[0].phase, Phase::Evaluating);
    assert!(summary.outcomes[0].utility.is_some());
    assert_eq!(summary.outcomes[1].phase, Phase::Idle);

    // Tick 2: the strong agent arrives and lands a lethal blow; the weak
    // agent reports its own death and is retired before tick 3.
    let summary = run_tick(&mut state);
    assert!(weak_stats.snapshot().is_dead());
    assert!(summary.outcomes[1].died);
    assert_eq!(summary.deaths, vec![weak_id]);
    assert_eq!(summary.agents_alive, 1);
    assert_eq!(state.agents.len(), 1);

    // The kill was commanded against the world the same tick it happened.
    assert_eq!(strong_wiring.world.destroyed(), vec![weak_id]);
    assert!(strong_wiring
        .telemetry
        .events()
        .iter()
        .any(|e| matches!(e, TelemetryEvent::AgentDied { agent_id, .. } if *agent_id == weak_id)));

    // Attack cost was paid exactly once.
    assert_eq!(strong_stats.snapshot().energy, 90);
}

#[test]
fn equal_utility_candidates_resolve_to_the_first_perceived() {
    let wiring = Wiring::new();
    let first = Candidate::item(
        CandidateId::new(),
        Position::new(10.0, 0.0, 0.0),
        ItemBoosts::new(30, 0, 0),
    );
    let second = Candidate::item(
        CandidateId::new(),
        Position::new(-10.0, 0.0, 0.0),
        ItemBoosts::new(30, 0, 0),
    );
    wiring
        .perception
        .set_candidates(vec![first.clone(), second]);
    wiring.mover.set_distance(2.0);

    let mut agent = wiring.agent("picker", ResourceState::new(40, 100, 20), Weights::default());
    let _ = agent.tick(1);
    let _ = agent.tick(2);

    assert_eq!(wiring.world.removed(), vec![first.id]);
}

#[test]
fn vanished_target_aborts_and_the_agent_recovers_next_tick() {
    let wiring = Wiring::new();
    let item = Candidate::item(
        CandidateId::new(),
        Position::new(50.0, 0.0, 0.0),
        ItemBoosts::new(30, 0, 0),
    );
    wiring.perception.set_candidates(vec![item]);
    wiring.mover.set_distance(50.0);

    let mut agent = wiring.agent("chaser", ResourceState::new(40, 100, 20), Weights::default());
    let outcome = agent.tick(1);
    assert_eq!(outcome.phase, Phase::Evaluating);

    // Another agent consumed the item while we were walking.
    let replacement = Candidate::item(
        CandidateId::new(),
        Position::new(3.0, 0.0, 0.0),
        ItemBoosts::new(20, 0, 0),
    );
    wiring.perception.set_candidates(vec![replacement.clone()]);

    let outcome = agent.tick(2);
    assert_eq!(outcome.phase, Phase::Idle);
    assert!(wiring
        .telemetry
        .events()
        .iter()
        .any(|e| matches!(e, TelemetryEvent::ActionAborted { .. })));

    // Next tick the agent evaluates fresh and commits to the replacement.
    wiring.mover.set_distance(3.0);
    let outcome = agent.tick(3);
    assert_eq!(outcome.phase, Phase::Evaluating);
    let _ = agent.tick(4);
    assert_eq!(wiring.world.removed(), vec![replacement.id]);
}

#[test]
fn agent_with_nothing_to_do_idles_and_regenerates() {
    let wiring = Wiring::new();
    let mut agent = wiring.agent("loafer", ResourceState::new(100, 50, 20), Weights::default());

    for tick in 1..=5 {
        let outcome = agent.tick(tick);
        assert_eq!(outcome.phase, Phase::Idle);
    }
    assert_eq!(agent.stats_handle().snapshot().energy, 60);
}

#[tokio::test]
async fn bounded_run_finishes_at_the_tick_limit() {
    let wiring = Wiring::new();
    let agent = wiring.agent("survivor", ResourceState::default(), Weights::default());
    let mut state = SimulationState::new(vec![agent]);

    let bounds = SimulationBoundsConfig {
        max_ticks: 8,
        max_real_time_seconds: 600,
    };
    let result = run_simulation(&mut state, &bounds, 0, &mut NoOpCallback)
        .await
        .unwrap();
    assert!(matches!(
        result.end_reason,
        SimulationEndReason::MaxTicksReached
    ));
    assert_eq!(result.total_ticks, 8);
    assert_eq!(state.tick, 8);
}
