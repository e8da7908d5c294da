//! Entity model: the guardian, the escortees, enemies and particles

pub mod body;
pub mod enemy;
pub mod escortee;
pub mod guardian;
pub mod particle;

pub use body::{Body, EnemyKind, EntityKind};
pub use enemy::Enemy;
pub use escortee::Escortee;
pub use guardian::Guardian;
pub use particle::{Particle, ParticleTint};
