//! Candidate evaluation and selection.
//!
//! Once per tick -- and only when not already committed to an action -- an
//! agent scans its current candidate set, builds a possibility model for
//! each viable candidate, scores it, and keeps a strictly-greater running
//! maximum. Ties keep the earliest-seen candidate, and a maximum that never
//! rises above the zero baseline leaves the agent idle.

use tracing::debug;
use volition_agents::{ResourceState, Weights};

use crate::possibility::{Candidate, PossibilityModel};
use crate::utility::calc_utility;

/// The outcome of one evaluation cycle: the winning possibility and its
/// utility score.
#[derive(Debug, Clone)]
pub struct Choice {
    /// The selected possibility.
    pub model: PossibilityModel,
    /// The utility the selection scored.
    pub utility: f64,
}

/// Evaluate a candidate set and select the best possibility.
///
/// Candidates that cannot be turned into a possibility model (no kind, or a
/// malformed payload) are skipped without affecting the rest of the scan.
/// Returns `None` when no candidate scores above 0 -- the caller stays
/// idle for this tick.
///
/// Selection is deterministic: the same candidates and the same stats
/// always yield the same choice, and equal maximal scores resolve to the
/// first candidate encountered.
pub fn evaluate(candidates: &[Candidate], own: &ResourceState, weights: &Weights) -> Option<Choice> {
    let mut best: Option<Choice> = None;
    let mut best_utility = 0.0_f64;

    for candidate in candidates {
        let Some(model) = PossibilityModel::from_candidate(candidate) else {
            continue;
        };

        let utility = calc_utility(&model, own, weights);

        // Strictly greater: ties keep the earliest-seen candidate.
        if utility > best_utility {
            best_utility = utility;
            best = Some(Choice { model, utility });
        }
    }

    match &best {
        Some(choice) => debug!(
            candidates = candidates.len(),
            kind = %choice.model.kind(),
            target = %choice.model.candidate(),
            utility = choice.utility,
            "Selected possibility"
        ),
        None => debug!(candidates = candidates.len(), "No positive-utility possibility"),
    }

    best
}
