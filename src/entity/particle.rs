//! Short-lived visual feedback particles
//!
//! Particles have no gameplay effect, but they are integrated and aged by the
//! step like everything else.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Position;

/// Palette slot for a particle; the renderer picks the actual color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleTint {
    /// Faint dust behind the running guardian
    Dust,
    /// Pale puffs on enemies caught by a bark
    Shockwave,
    /// White flecks of the bite swing
    Spark,
    /// Dark red burst on a bitten enemy
    Blood,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub position: Position,
    pub velocity: Position,
    /// 1.0 when spawned, removed once it reaches 0
    pub life: f32,
    pub tint: ParticleTint,
    pub size: f32,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    pub fn update(&mut self, decay: f32) {
        self.position += self.velocity;
        self.life -= decay;
    }
}

/// Push `count` particles scattering from `origin` with up to `speed`/2 per axis
pub fn burst<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    origin: Position,
    tint: ParticleTint,
    count: usize,
    speed: f32,
) {
    particles.extend((0..count).map(|_| Particle {
        position: origin,
        velocity: Position::new(
            (rng.gen::<f32>() - 0.5) * speed,
            (rng.gen::<f32>() - 0.5) * speed,
        ),
        life: 1.0,
        tint,
        size: 2.0 + rng.gen::<f32>() * 4.0,
    }));
}

/// Integrate and age every particle, dropping the expired ones
pub fn update_particles(particles: &mut Vec<Particle>, decay: f32) {
    for particle in particles.iter_mut() {
        particle.update(decay);
    }
    particles.retain(Particle::is_alive);
}
