//! Static world features: bushes and grass

use serde::{Deserialize, Serialize};

use crate::core::types::Position;

/// Decorative foliage circle drawn on top of a bush, relative to its center
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Leaf {
    pub offset: Position,
    pub radius: f32,
}

/// A bush: blocks movement and shelters hiding escortees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Position,
    /// Visual radius; collision and concealment use fractions of it
    pub radius: f32,
    pub rotation: f32,
    pub leaves: Vec<Leaf>,
}

impl Obstacle {
    /// Radius used for collision, smaller than the drawn foliage
    pub fn collision_radius(&self, fraction: f32) -> f32 {
        self.radius * fraction
    }

    /// Whether a point counts as concealed by this bush
    pub fn conceals(&self, point: Position, fraction: f32) -> bool {
        point.distance(self.position) <= self.radius * fraction
    }
}

/// A grass blade rectangle; purely decorative
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GrassTuft {
    pub position: Position,
    pub height: f32,
    pub width: f32,
}
