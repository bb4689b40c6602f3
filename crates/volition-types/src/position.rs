//! World positions and distance computation.
//!
//! The engine makes no assumptions about how movement happens -- it only
//! needs target positions to hand to the mover and straight-line distances
//! for sensing radii. Positions live on a flat plane with a height offset,
//! matching the arena the engine binary sets up.

use serde::{Deserialize, Serialize};

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// East-west coordinate.
    pub x: f32,
    /// Height above the ground plane.
    pub y: f32,
    /// North-south coordinate.
    pub z: f32,
}

impl Position {
    /// Create a position from its three coordinates.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx.mul_add(dx, dy.mul_add(dy, dz * dz)).sqrt()
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}
