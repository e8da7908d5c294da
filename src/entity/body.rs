//! Physical body shared by every moving entity

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Position};
use crate::simulation::constants::{
    CRIMINAL_RADIUS, CRIMINAL_SPEED, DOG_RADIUS, DOG_SPEED, ESCORTEE_RADIUS, ESCORTEE_SPEED,
    GUARDIAN_RADIUS, GUARDIAN_SPEED, WOLF_RADIUS, WOLF_SPEED,
};

/// Enemy variants; stats differ only in radius and speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Wolf,
    Dog,
    Criminal,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Wolf, EnemyKind::Dog, EnemyKind::Criminal];
}

/// What an entity is, for collision weighting and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Guardian,
    Escortee,
    Enemy(EnemyKind),
}

impl EntityKind {
    /// Collision radius for this kind
    pub fn radius(&self) -> f32 {
        match self {
            EntityKind::Guardian => GUARDIAN_RADIUS,
            EntityKind::Escortee => ESCORTEE_RADIUS,
            EntityKind::Enemy(EnemyKind::Wolf) => WOLF_RADIUS,
            EntityKind::Enemy(EnemyKind::Dog) => DOG_RADIUS,
            EntityKind::Enemy(EnemyKind::Criminal) => CRIMINAL_RADIUS,
        }
    }

    /// Distance covered per tick when moving
    pub fn speed(&self) -> f32 {
        match self {
            EntityKind::Guardian => GUARDIAN_SPEED,
            EntityKind::Escortee => ESCORTEE_SPEED,
            EntityKind::Enemy(EnemyKind::Wolf) => WOLF_SPEED,
            EntityKind::Enemy(EnemyKind::Dog) => DOG_SPEED,
            EntityKind::Enemy(EnemyKind::Criminal) => CRIMINAL_SPEED,
        }
    }
}

/// Position, health and motion stats of an entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
    /// Not integrated by the step; kept for snapshots
    pub velocity: Position,
    pub health: f32,
    pub max_health: f32,
    pub radius: f32,
    pub speed: f32,
    /// Facing angle in radians
    pub angle: f32,
}

impl Body {
    pub fn new(kind: EntityKind, position: Position, max_health: f32) -> Self {
        Self {
            id: EntityId::new(),
            kind,
            position,
            velocity: Position::ZERO,
            health: max_health,
            max_health,
            radius: kind.radius(),
            speed: kind.speed(),
            angle: 0.0,
        }
    }

    /// Step `speed` units straight at `target` and face it
    pub fn step_towards(&mut self, target: Position) {
        let delta = target - self.position;
        let angle = delta.y.atan2(delta.x);
        self.position.x += angle.cos() * self.speed;
        self.position.y += angle.sin() * self.speed;
        self.angle = angle;
    }

    /// Subtract health, never going below zero; returns true when this hit
    /// took the body from alive to zero
    pub fn take_damage(&mut self, amount: f32) -> bool {
        let was_alive = self.health > 0.0;
        self.health = (self.health - amount).max(0.0);
        was_alive && self.health <= 0.0
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            (self.health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
