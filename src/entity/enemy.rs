//! Hostile entities chasing the family

use serde::{Deserialize, Serialize};

use crate::core::types::Position;
use crate::entity::body::{Body, EnemyKind, EntityKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: Body,
    pub is_dead: bool,
    /// Remaining ticks of the damage flash
    pub hit_flash: u32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, position: Position, health: f32) -> Self {
        Self {
            kind,
            body: Body::new(EntityKind::Enemy(kind), position, health),
            is_dead: false,
            hit_flash: 0,
        }
    }

    /// Apply damage; returns true only on the tick the enemy dies
    pub fn hit(&mut self, damage: f32, flash_ticks: u32) -> bool {
        self.hit_flash = flash_ticks;
        self.body.take_damage(damage);
        if !self.is_dead && self.body.health <= 0.0 {
            self.is_dead = true;
            return true;
        }
        false
    }
}
