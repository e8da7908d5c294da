//! Enemy targeting and contact damage
//!
//! Targets are re-picked every tick: the nearest visible escortee, or the
//! guardian when the whole family is concealed.

use crate::audio::AudioCue;
use crate::core::config::GameConfig;
use crate::core::types::Position;
use crate::entity::Escortee;
use crate::simulation::session::{GameStatus, Session};
use crate::simulation::tick::SimulationEvent;
use crate::world::WorldLayout;

/// Who an enemy is chasing this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Guardian,
    Escortee(usize),
}

/// An escortee is seen unless it is hiding close enough to its bush center
pub fn is_visible(escortee: &Escortee, layout: &WorldLayout, concealment_fraction: f32) -> bool {
    if !escortee.is_hiding {
        return true;
    }
    match escortee.target_obstacle.and_then(|id| layout.obstacle(id)) {
        Some(bush) => !bush.conceals(escortee.body.position, concealment_fraction),
        None => true,
    }
}

/// Pick the nearest visible escortee, falling back to the guardian
///
/// Returns the target and its distance from `from`.
pub fn select_target(
    from: Position,
    escortees: &[Escortee],
    guardian_position: Position,
    layout: &WorldLayout,
    concealment_fraction: f32,
) -> (Target, f32) {
    let mut best: Option<(Target, f32)> = None;
    for (i, escortee) in escortees.iter().enumerate() {
        if !is_visible(escortee, layout, concealment_fraction) {
            continue;
        }
        let d = from.distance(escortee.body.position);
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((Target::Escortee(i), d));
        }
    }
    best.unwrap_or_else(|| (Target::Guardian, from.distance(guardian_position)))
}

/// Chase targets and chip away at escortees in contact
///
/// The first escortee death flips the session to Lost.
pub fn update_enemies(
    session: &mut Session,
    layout: &WorldLayout,
    config: &GameConfig,
    events: &mut Vec<SimulationEvent>,
) {
    let guardian_position = session.guardian.body.position;
    for enemy in session.enemies.iter_mut().filter(|e| !e.is_dead) {
        let (target, dist) = select_target(
            enemy.body.position,
            &session.escortees,
            guardian_position,
            layout,
            config.concealment_fraction,
        );

        let target_position = match target {
            Target::Guardian => guardian_position,
            Target::Escortee(i) => session.escortees[i].body.position,
        };
        enemy.body.step_towards(target_position);

        // The guardian cannot be hurt
        let Target::Escortee(i) = target else {
            continue;
        };
        let escortee = &mut session.escortees[i];
        if dist >= enemy.body.radius + escortee.body.radius {
            continue;
        }
        let died = escortee.body.take_damage(config.contact_damage);
        if died && session.status == GameStatus::Playing {
            session.status = GameStatus::Lost;
            tracing::info!("Escortee {} killed at tick {}; session lost", i, session.tick);
            events.push(SimulationEvent::Sound(AudioCue::EscorteeDeath));
            events.push(SimulationEvent::EscorteeDied { index: i });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ObstacleId;
    use crate::entity::{EnemyKind, Enemy};
    use crate::world::Obstacle;

    fn bush_layout() -> WorldLayout {
        WorldLayout::from_obstacles(vec![Obstacle {
            position: Position::new(1000.0, 400.0),
            radius: 60.0,
            rotation: 0.0,
            leaves: Vec::new(),
        }])
    }

    #[test]
    fn test_targets_nearest_visible_escortee() {
        let session = Session::begin();
        let (target, _) = select_target(
            Position::new(60.0, 500.0),
            &session.escortees,
            session.guardian.body.position,
            &WorldLayout::default(),
            0.5,
        );
        assert_eq!(target, Target::Escortee(1));
    }

    #[test]
    fn test_concealed_family_redirects_to_guardian() {
        let layout = bush_layout();
        let mut session = Session::begin();
        for escortee in session.escortees.iter_mut() {
            escortee.body.position = Position::new(1010.0, 400.0);
            escortee.hide_behind(Some(ObstacleId(0)));
        }
        let (target, dist) = select_target(
            Position::new(1100.0, 400.0),
            &session.escortees,
            session.guardian.body.position,
            &layout,
            0.5,
        );
        assert_eq!(target, Target::Guardian);
        assert!((dist - 1000.0).abs() < 1e-3);
    }

    #[test]
    fn test_hiding_but_outside_cover_is_visible() {
        let layout = bush_layout();
        let mut escortee = Escortee::new(Position::new(1031.0, 400.0));
        escortee.hide_behind(Some(ObstacleId(0)));
        assert!(is_visible(&escortee, &layout, 0.5));
        escortee.body.position.x = 1030.0;
        assert!(!is_visible(&escortee, &layout, 0.5));
    }

    #[test]
    fn test_contact_damage_and_loss() {
        let config = GameConfig::default();
        let mut session = Session::begin();
        let at = session.escortees[0].body.position;
        session.enemies.push(Enemy::new(EnemyKind::Dog, at, 50.0));
        session.escortees[0].body.health = 1.0;
        let mut events = Vec::new();

        update_enemies(&mut session, &WorldLayout::default(), &config, &mut events);
        assert!((session.escortees[0].body.health - 0.4).abs() < 1e-4);
        assert_eq!(session.status, GameStatus::Playing);

        session.enemies[0].body.position = session.escortees[0].body.position;
        update_enemies(&mut session, &WorldLayout::default(), &config, &mut events);
        assert_eq!(session.status, GameStatus::Lost);
        assert_eq!(session.escortees[0].body.health, 0.0);
        assert!(events.contains(&SimulationEvent::EscorteeDied { index: 0 }));
    }

    #[test]
    fn test_guardian_never_damaged() {
        let config = GameConfig::default();
        let layout = bush_layout();
        let mut session = Session::begin();
        for escortee in session.escortees.iter_mut() {
            escortee.body.position = Position::new(1000.0, 400.0);
            escortee.hide_behind(Some(ObstacleId(0)));
        }
        let at = session.guardian.body.position;
        session.enemies.push(Enemy::new(EnemyKind::Wolf, at, 50.0));
        let mut events = Vec::new();
        update_enemies(&mut session, &layout, &config, &mut events);
        assert_eq!(session.guardian.body.health, 100.0);
        assert!(events.is_empty());
    }
}
