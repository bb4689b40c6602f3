//! Pure utility scoring for possibilities.
//!
//! Utility is the weighted *marginal gain* of an action for a given agent,
//! not an absolute projected value: an agent already at full health scores
//! zero gain from a health item no matter how heavily it weights health.
//! This gives diminishing incentive to pick up items the agent does not
//! need.
//!
//! Scoring is deterministic given its inputs and has no side effects. The
//! only shared state it touches is the rival's stats handle, read once to
//! obtain the rival's current values.

use volition_agents::{ResourceState, STAT_CAP, Weights};

use crate::possibility::PossibilityModel;

/// Fixed energy cost of one attack.
pub const ATTACK_ENERGY_COST: u32 = 10;

/// Compute the utility of a possibility for an agent.
///
/// `own` is the acting agent's stats snapshot; `weights` its priorities.
///
/// The result is a signed scalar. Item and attack scores are non-negative
/// with the current weight domain, but callers must not treat a negative
/// value as an error -- ordering is all that matters.
pub fn calc_utility(model: &PossibilityModel, own: &ResourceState, weights: &Weights) -> f64 {
    match model {
        PossibilityModel::ApplyItem { boosts, .. } => {
            // Project each stat independently, clamped to the cap, and take
            // the marginal gain over the current value.
            let gain_health = projected_gain(own.health, boosts.health);
            let gain_energy = projected_gain(own.energy, boosts.energy);
            let gain_attack = projected_gain(own.attack, boosts.attack);

            (gain_health * weights.health
                + gain_energy * weights.energy
                + gain_attack * weights.attack)
                / 3.0
        }

        PossibilityModel::Attack { rival, .. } => {
            // Read the rival's current stats, not a perception-time snapshot.
            let rival_stats = rival.stats.snapshot();

            // Veto: an attack that would exhaust our energy or kill us
            // outright has exactly zero utility and is never chosen.
            if own.energy <= ATTACK_ENERGY_COST || own.health < rival_stats.attack {
                return 0.0;
            }

            // Trading blows costs us the rival's attack in health and deals
            // our attack in damage.
            let self_loss = f64::from(rival_stats.attack);
            let damage_dealt = f64::from(own.attack);

            (self_loss * weights.health + damage_dealt * weights.damage_dealt) / 2.0
        }
    }
}

/// Marginal gain of adding `boost` to `current`, with the projection
/// clamped to [`STAT_CAP`].
fn projected_gain(current: u32, boost: u32) -> f64 {
    let projected = current.saturating_add(boost).min(STAT_CAP);
    f64::from(projected.saturating_sub(current))
}
