//! Enemy spawning ahead of the guardian and culling behind it

use rand::Rng;

use crate::core::config::GameConfig;
use crate::core::types::Position;
use crate::entity::{Enemy, EnemyKind};
use crate::simulation::constants::{VIEWPORT_WIDTH, WORLD_HEIGHT};
use crate::simulation::session::Session;
use crate::simulation::tick::SimulationEvent;

/// Roll the per-tick spawn chance and place a random enemy off screen ahead
pub fn maybe_spawn_enemy<R: Rng>(
    session: &mut Session,
    config: &GameConfig,
    rng: &mut R,
    events: &mut Vec<SimulationEvent>,
) {
    if rng.gen::<f32>() >= config.spawn_chance {
        return;
    }
    let x = session.guardian.body.position.x
        + config.spawn_ahead_min
        + rng.gen::<f32>() * config.spawn_ahead_jitter;
    let y = rng.gen::<f32>() * WORLD_HEIGHT;
    let kind = EnemyKind::ALL[rng.gen_range(0..EnemyKind::ALL.len())];

    session
        .enemies
        .push(Enemy::new(kind, Position::new(x, y), config.enemy_health));
    tracing::debug!("Spawned {:?} at ({:.0}, {:.0})", kind, x, y);
    events.push(SimulationEvent::EnemySpawned { kind });
}

/// Drop dead enemies and those more than a viewport behind the guardian
pub fn cull_enemies(enemies: &mut Vec<Enemy>, guardian_x: f32) {
    enemies.retain(|e| !e.is_dead && e.body.position.x > guardian_x - VIEWPORT_WIDTH);
}
