//! Guardian actions: bark knockback and bite attack
//!
//! Both actions are gated by a wall-clock cooldown and can fire on the same
//! tick as movement.

use rand::Rng;

use crate::audio::AudioCue;
use crate::core::config::GameConfig;
use crate::core::types::{Millis, Position};
use crate::entity::particle::{burst, ParticleTint};
use crate::simulation::constants::ATTACK_SWING_OFFSET;
use crate::simulation::session::Session;
use crate::simulation::tick::{NarrationTopic, SimulationEvent};
use crate::spatial::bark_force;

/// Bark if the cooldown allows; pushes every nearby enemy away
///
/// Returns false when the bark was still cooling down.
pub fn try_bark<R: Rng>(
    session: &mut Session,
    config: &GameConfig,
    now: Millis,
    rng: &mut R,
    events: &mut Vec<SimulationEvent>,
) -> bool {
    let guardian = &mut session.guardian;
    if !guardian.can_bark(now, config.bark_cooldown_ms) {
        return false;
    }
    guardian.bark_ticks = config.bark_visual_ticks;
    guardian.last_bark_ms = Some(now);
    let origin = guardian.body.position;

    events.push(SimulationEvent::Sound(AudioCue::Bark));
    events.push(SimulationEvent::NarrationRequested(NarrationTopic::Bark));

    let mut enemies_pushed = 0;
    for enemy in session.enemies.iter_mut().filter(|e| !e.is_dead) {
        let delta = enemy.body.position - origin;
        let force = bark_force(delta.length(), config.bark_range, config.bark_max_force);
        if force <= 0.0 {
            continue;
        }
        let angle = delta.y.atan2(delta.x);
        enemy.body.position += Position::new(angle.cos(), angle.sin()) * force;
        enemy.hit_flash = config.bark_hit_flash_ticks;
        burst(
            &mut session.particles,
            rng,
            enemy.body.position,
            ParticleTint::Shockwave,
            3,
            2.0,
        );
        enemies_pushed += 1;
    }

    tracing::debug!("Bark at tick {} pushed {} enemies", session.tick, enemies_pushed);
    events.push(SimulationEvent::Barked { enemies_pushed });
    true
}

/// Bite every enemy in reach if the cooldown allows
///
/// Kills are scored exactly once, on the tick the enemy's health reaches zero.
pub fn try_attack<R: Rng>(
    session: &mut Session,
    config: &GameConfig,
    now: Millis,
    rng: &mut R,
    events: &mut Vec<SimulationEvent>,
) -> bool {
    let guardian = &mut session.guardian;
    if !guardian.can_attack(now, config.attack_cooldown_ms) {
        return false;
    }
    guardian.attack_ticks = config.attack_visual_ticks;
    guardian.last_attack_ms = Some(now);
    let origin = guardian.body.position;
    let radius = guardian.body.radius;
    let facing = guardian.body.angle;

    events.push(SimulationEvent::Sound(AudioCue::Attack));
    let swing = origin + Position::new(facing.cos(), facing.sin()) * ATTACK_SWING_OFFSET;
    burst(&mut session.particles, rng, swing, ParticleTint::Spark, 5, 2.0);

    let mut enemies_hit = 0;
    for enemy in session.enemies.iter_mut().filter(|e| !e.is_dead) {
        let reach = radius + enemy.body.radius + config.attack_reach;
        if enemy.body.position.distance(origin) >= reach {
            continue;
        }
        enemies_hit += 1;
        let killed = enemy.hit(config.attack_damage, config.attack_hit_flash_ticks);
        burst(
            &mut session.particles,
            rng,
            enemy.body.position,
            ParticleTint::Blood,
            10,
            5.0,
        );
        if killed {
            session.score += config.kill_score;
            tracing::debug!("{:?} killed at tick {}", enemy.kind, session.tick);
            events.push(SimulationEvent::EnemyKilled {
                kind: enemy.kind,
                score: session.score,
            });
        }
    }

    events.push(SimulationEvent::Attacked { enemies_hit });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EnemyKind, Enemy};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session_with_enemy_at(offset: f32) -> Session {
        let mut session = Session::begin();
        let at = session.guardian.body.position + Position::new(offset, 0.0);
        session.enemies.push(Enemy::new(EnemyKind::Wolf, at, 50.0));
        session
    }

    #[test]
    fn test_attack_cooldown_blocks_second_trigger() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut events = Vec::new();
        let mut session = session_with_enemy_at(30.0);

        assert!(try_attack(&mut session, &config, 1_000, &mut rng, &mut events));
        let particles = session.particles.len();
        assert!(!try_attack(&mut session, &config, 1_200, &mut rng, &mut events));
        assert_eq!(session.enemies[0].body.health, 25.0);
        assert_eq!(session.guardian.last_attack_ms, Some(1_000));
        assert_eq!(session.particles.len(), particles);

        assert!(try_attack(&mut session, &config, 1_350, &mut rng, &mut events));
        assert!(session.enemies[0].is_dead);
        assert_eq!(session.score, 250);
    }

    #[test]
    fn test_attack_reach() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut events = Vec::new();
        // 18 + 16 + 40 = 74
        let mut session = session_with_enemy_at(74.0);
        try_attack(&mut session, &config, 0, &mut rng, &mut events);
        assert_eq!(session.enemies[0].body.health, 50.0);

        let mut session = session_with_enemy_at(73.0);
        try_attack(&mut session, &config, 0, &mut rng, &mut events);
        assert_eq!(session.enemies[0].body.health, 25.0);
        assert_eq!(session.enemies[0].hit_flash, 8);
    }

    #[test]
    fn test_kill_scores_once() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut events = Vec::new();
        let mut session = session_with_enemy_at(20.0);
        session.enemies[0].body.health = 25.0;

        try_attack(&mut session, &config, 0, &mut rng, &mut events);
        assert!(session.enemies[0].is_dead);
        assert_eq!(session.enemies[0].body.health, 0.0);
        assert_eq!(session.score, 250);

        // still present, attacked again later: no second award
        try_attack(&mut session, &config, 1_000, &mut rng, &mut events);
        assert_eq!(session.score, 250);
        let kills = events
            .iter()
            .filter(|e| matches!(e, SimulationEvent::EnemyKilled { .. }))
            .count();
        assert_eq!(kills, 1);
    }

    #[test]
    fn test_bark_pushes_with_linear_falloff() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut events = Vec::new();
        let mut session = session_with_enemy_at(90.0);
        let start_x = session.enemies[0].body.position.x;

        assert!(try_bark(&mut session, &config, 0, &mut rng, &mut events));
        assert!((session.enemies[0].body.position.x - (start_x + 30.0)).abs() < 1e-3);
        assert_eq!(session.enemies[0].hit_flash, 5);
        assert_eq!(session.guardian.bark_ticks, 20);
        assert!(events.contains(&SimulationEvent::NarrationRequested(NarrationTopic::Bark)));
    }

    #[test]
    fn test_bark_out_of_range_untouched() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut events = Vec::new();
        let mut session = session_with_enemy_at(180.0);
        let before = session.enemies[0].body.position;
        try_bark(&mut session, &config, 0, &mut rng, &mut events);
        assert_eq!(session.enemies[0].body.position, before);
        assert_eq!(session.enemies[0].hit_flash, 0);
    }

    #[test]
    fn test_bark_cooldown() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut events = Vec::new();
        let mut session = Session::begin();
        assert!(try_bark(&mut session, &config, 5_000, &mut rng, &mut events));
        assert!(!try_bark(&mut session, &config, 5_999, &mut rng, &mut events));
        assert!(try_bark(&mut session, &config, 6_000, &mut rng, &mut events));
    }
}
