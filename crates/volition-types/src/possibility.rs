//! Possibility kinds and item payloads.
//!
//! A possibility is one actionable opportunity derived from a perceived
//! object: picking up and applying an item, or attacking a rival agent.
//! The full possibility model (with live target handles) lives in
//! `volition-core`; this module holds only the data shapes that cross
//! crate boundaries.

use serde::{Deserialize, Serialize};

/// The kind of action a candidate object offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PossibilityKind {
    /// Pick up an item and apply its boosts to the acting agent.
    ApplyItem,
    /// Close with a rival agent and trade damage.
    Attack,
}

impl core::fmt::Display for PossibilityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ApplyItem => write!(f, "apply_item"),
            Self::Attack => write!(f, "attack"),
        }
    }
}

/// The stat boosts an item grants when applied to an agent.
///
/// All boosts are non-negative; the receiving agent clamps each stat to
/// its cap independently on application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemBoosts {
    /// Health restored by the item.
    pub health: u32,
    /// Energy restored by the item.
    pub energy: u32,
    /// Attack power granted by the item.
    pub attack: u32,
}

impl ItemBoosts {
    /// Create a boost payload from its three components.
    pub const fn new(health: u32, energy: u32, attack: u32) -> Self {
        Self {
            health,
            energy,
            attack,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display_names() {
        assert_eq!(PossibilityKind::ApplyItem.to_string(), "apply_item");
        assert_eq!(PossibilityKind::Attack.to_string(), "attack");
    }

    #[test]
    fn default_boosts_are_zero() {
        let boosts = ItemBoosts::default();
        assert_eq!(boosts, ItemBoosts::new(0, 0, 0));
    }
}
