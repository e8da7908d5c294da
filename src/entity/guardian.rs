//! The player-controlled guardian
//!
//! The guardian never takes damage; it has no death state.

use serde::{Deserialize, Serialize};

use crate::core::types::{Millis, Position};
use crate::entity::body::{Body, EntityKind};
use crate::simulation::constants::GUARDIAN_HEALTH;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guardian {
    pub body: Body,
    /// Remaining ticks of the bite animation
    pub attack_ticks: u32,
    /// Remaining ticks of the bark ring animation
    pub bark_ticks: u32,
    pub last_attack_ms: Option<Millis>,
    pub last_bark_ms: Option<Millis>,
}

impl Guardian {
    pub fn new(position: Position) -> Self {
        Self {
            body: Body::new(EntityKind::Guardian, position, GUARDIAN_HEALTH),
            attack_ticks: 0,
            bark_ticks: 0,
            last_attack_ms: None,
            last_bark_ms: None,
        }
    }

    pub fn can_attack(&self, now: Millis, cooldown_ms: Millis) -> bool {
        cooldown_ready(self.last_attack_ms, now, cooldown_ms)
    }

    pub fn can_bark(&self, now: Millis, cooldown_ms: Millis) -> bool {
        cooldown_ready(self.last_bark_ms, now, cooldown_ms)
    }

    /// Count the animation timers down by one tick
    pub fn tick_counters(&mut self) {
        self.attack_ticks = self.attack_ticks.saturating_sub(1);
        self.bark_ticks = self.bark_ticks.saturating_sub(1);
    }

    /// Keep the whole body inside the world rectangle
    pub fn clamp_to_world(&mut self, width: f32, height: f32) {
        let r = self.body.radius;
        self.body.position.x = self.body.position.x.clamp(r, width - r);
        self.body.position.y = self.body.position.y.clamp(r, height - r);
    }
}

/// A never-used action is ready; otherwise `cooldown` must have fully elapsed
fn cooldown_ready(last: Option<Millis>, now: Millis, cooldown: Millis) -> bool {
    match last {
        None => true,
        Some(at) => now.saturating_sub(at) >= cooldown,
    }
}
