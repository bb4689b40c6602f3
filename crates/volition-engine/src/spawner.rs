//! Seeds the arena with agents and consumable items.
//!
//! All randomness flows through one seeded RNG, so the same seed always
//! produces the same starting world: positions, item boost rolls, agent
//! names, stats, and weights.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use volition_agents::{ResourceState, Weights};
use volition_core::config::SimulationConfig;
use volition_core::{Agent, TelemetrySink, WorldHandle};
use volition_types::{AgentId, ItemBoosts, Position};

use crate::arena::Arena;
use crate::error::EngineError;

/// Built-in pool of agent names. Used in order; overflow gets a numeric
/// suffix.
const NAME_POOL: &[&str] = &[
    "Asha", "Bramble", "Cinder", "Dara", "Ember", "Flint", "Greta", "Hollis", "Ira", "Juniper",
    "Kestrel", "Lowen", "Moss", "Nadia", "Orin", "Petra",
];

/// The assembled starting world.
pub struct SpawnResult {
    /// The shared arena, already populated.
    pub arena: Arc<Arena>,
    /// The spawned agents, ready to tick.
    pub agents: Vec<Agent>,
}

/// Build the arena and its starting population from configuration.
///
/// # Errors
///
/// Returns [`EngineError`] if an agent fails to assemble.
pub fn spawn_world(
    config: &SimulationConfig,
    telemetry: &Arc<dyn TelemetrySink>,
) -> Result<SpawnResult, EngineError> {
    let mut rng = StdRng::seed_from_u64(config.world.seed);
    let arena = Arc::new(Arena::new(config.perception.clone()));
    let half = config.spawn.arena_half_extent;

    for _ in 0..config.spawn.initial_items {
        let position = random_position(&mut rng, half);
        let boosts = roll_item(&mut rng);
        let _ = arena.add_item(position, boosts);
    }

    let mut agents = Vec::with_capacity(usize::try_from(config.spawn.initial_agents).unwrap_or(0));
    for index in 0..config.spawn.initial_agents {
        let agent_id = AgentId::new();
        let position = random_position(&mut rng, half);
        let stats = random_stats(&mut rng);
        let weights = random_weights(&mut rng)?;

        let agent = Agent::builder(agent_name(index))
            .id(agent_id)
            .stats(stats)
            .weights(weights)
            .config(config.behavior.clone())
            .perception(Arc::new(arena.perception_for(agent_id)))
            .mover(Box::new(arena.mover_for(agent_id)))
            .world(Arc::clone(&arena) as Arc<dyn WorldHandle>)
            .telemetry(Arc::clone(telemetry))
            .build()?;

        arena.register_agent(agent_id, position, agent.stats_handle());
        info!(
            agent = %agent_id,
            name = %agent.name(),
            %position,
            health = stats.health,
            attack = stats.attack,
            "Agent spawned"
        );
        agents.push(agent);
    }

    info!(
        items = arena.item_count(),
        agents = agents.len(),
        seed = config.world.seed,
        "World seeded"
    );
    Ok(SpawnResult { arena, agents })
}

fn agent_name(index: u32) -> String {
    let pool_len = u32::try_from(NAME_POOL.len()).unwrap_or(u32::MAX);
    let slot = usize::try_from(index % pool_len).unwrap_or(0);
    let base = NAME_POOL.get(slot).copied().unwrap_or("Agent");
    if index < pool_len {
        base.to_string()
    } else {
        format!("{base}-{}", index / pool_len)
    }
}

fn random_position(rng: &mut StdRng, half_extent: f32) -> Position {
    Position::new(
        rng.random_range(-half_extent..=half_extent),
        0.0,
        rng.random_range(-half_extent..=half_extent),
    )
}

/// Roll one of three item profiles: restorative, energizing, or a weapon.
fn roll_item(rng: &mut StdRng) -> ItemBoosts {
    match rng.random_range(0..3_u8) {
        0 => ItemBoosts::new(rng.random_range(20..=40), 0, 0),
        1 => ItemBoosts::new(0, rng.random_range(20..=40), 0),
        _ => ItemBoosts::new(0, 0, rng.random_range(5..=15)),
    }
}

fn random_stats(rng: &mut StdRng) -> ResourceState {
    ResourceState::new(
        rng.random_range(60..=100),
        rng.random_range(60..=100),
        rng.random_range(10..=30),
    )
}

fn random_weights(rng: &mut StdRng) -> Result<Weights, EngineError> {
    Ok(Weights::new(
        rng.random_range(0.0..=1.0),
        rng.random_range(0.0..=1.0),
        rng.random_range(0.0..=1.0),
        rng.random_range(0.0..=1.0),
    )?)
}
