//! Candidate descriptors and the possibility model.
//!
//! Perception yields [`Candidate`] descriptors: a snapshot of the facts the
//! engine can discover about one nearby object. The capability queries of
//! the source design (does this object expose an item? a rival agent?) are
//! modeled as optional payload fields populated at construction, not as
//! runtime reflection.
//!
//! A [`PossibilityModel`] is built fresh from a candidate on every
//! evaluation cycle and never persisted. The kind discriminates the
//! payload, so constructing an attack possibility without a rival handle is
//! unrepresentable.

use tracing::warn;
use volition_agents::SharedStats;
use volition_types::{AgentId, CandidateId, ItemBoosts, Position, PossibilityKind};

use crate::utility::ATTACK_ENERGY_COST;

/// A non-owning reference to a rival agent: its identity plus a live handle
/// to its stats.
///
/// Utility scoring reads the rival's *current* stats through this handle
/// rather than a snapshot taken at perception time, since the rival may
/// change between evaluation and execution.
#[derive(Debug, Clone)]
pub struct RivalRef {
    /// The rival agent's identity.
    pub agent_id: AgentId,
    /// Live handle to the rival's resource state.
    pub stats: SharedStats,
}

/// The facts perception discovered about one object in range.
///
/// `kind` is what the object claims to be; the payload fields are what it
/// actually exposes. Scenery and other non-actionable objects carry no
/// kind and are filtered out silently during possibility construction.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Stable identity of the world object.
    pub id: CandidateId,
    /// The object's world position.
    pub position: Position,
    /// The possibility kind the object claims, if any.
    pub kind: Option<PossibilityKind>,
    /// Item boost payload, present for item candidates.
    pub boosts: Option<ItemBoosts>,
    /// Rival agent payload, present for agent candidates.
    pub rival: Option<RivalRef>,
}

impl Candidate {
    /// Describe an item candidate.
    pub const fn item(id: CandidateId, position: Position, boosts: ItemBoosts) -> Self {
        Self {
            id,
            position,
            kind: Some(PossibilityKind::ApplyItem),
            boosts: Some(boosts),
            rival: None,
        }
    }

    /// Describe a rival agent candidate.
    pub const fn rival(
        id: CandidateId,
        position: Position,
        agent_id: AgentId,
        stats: SharedStats,
    ) -> Self {
        Self {
            id,
            position,
            kind: Some(PossibilityKind::Attack),
            boosts: None,
            rival: Some(RivalRef { agent_id, stats }),
        }
    }

    /// Describe an object that offers no action (scenery, debris).
    pub const fn unknown(id: CandidateId, position: Position) -> Self {
        Self {
            id,
            position,
            kind: None,
            boosts: None,
            rival: None,
        }
    }
}

/// A typed, immutable description of one actionable opportunity.
#[derive(Debug, Clone)]
pub enum PossibilityModel {
    /// Pick up the item at `position` and apply `boosts` to self.
    ApplyItem {
        /// The item's candidate identity.
        candidate: CandidateId,
        /// Where the item sits.
        position: Position,
        /// The boosts the item grants.
        boosts: ItemBoosts,
    },
    /// Close with the rival at `position` and trade damage.
    Attack {
        /// The rival's candidate identity.
        candidate: CandidateId,
        /// Where the rival was last perceived.
        position: Position,
        /// Live reference to the rival's stats.
        rival: RivalRef,
    },
}

impl PossibilityModel {
    /// Build a possibility model from a candidate descriptor.
    ///
    /// Returns `None` in two distinct cases:
    /// - the candidate claims no kind: not a valid target, skipped silently;
    /// - the candidate claims a kind but lacks the matching payload: a
    ///   malformed descriptor, skipped with a non-fatal diagnostic.
    pub fn from_candidate(candidate: &Candidate) -> Option<Self> {
        let kind = candidate.kind?;

        match kind {
            PossibilityKind::ApplyItem => match candidate.boosts {
                Some(boosts) => Some(Self::ApplyItem {
                    candidate: candidate.id,
                    position: candidate.position,
                    boosts,
                }),
                None => {
                    warn!(candidate = %candidate.id, "Item candidate without boost payload, skipping");
                    None
                }
            },
            PossibilityKind::Attack => match &candidate.rival {
                Some(rival) => Some(Self::Attack {
                    candidate: candidate.id,
                    position: candidate.position,
                    rival: rival.clone(),
                }),
                None => {
                    warn!(candidate = %candidate.id, "Attack candidate without rival payload, skipping");
                    None
                }
            },
        }
    }

    /// The kind of this possibility.
    pub const fn kind(&self) -> PossibilityKind {
        match self {
            Self::ApplyItem { .. } => PossibilityKind::ApplyItem,
            Self::Attack { .. } => PossibilityKind::Attack,
        }
    }

    /// The candidate this possibility targets.
    pub const fn candidate(&self) -> CandidateId {
        match self {
            Self::ApplyItem { candidate, .. } | Self::Attack { candidate, .. } => *candidate,
        }
    }

    /// The world position the agent must reach to act.
    pub const fn position(&self) -> Position {
        match self {
            Self::ApplyItem { position, .. } | Self::Attack { position, .. } => *position,
        }
    }

    /// The energy this action costs: fixed for attacks, free for pickups.
    pub const fn energy_cost(&self) -> u32 {
        match self {
            Self::ApplyItem { .. } => 0,
            Self::Attack { .. } => ATTACK_ENERGY_COST,
        }
    }
}
