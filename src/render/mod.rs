//! Terminal rendering for the escort game
//!
//! Provides visual representation of session state.
//! This module is READ-ONLY - it never modifies simulation state.

pub mod camera;
pub mod colors;
pub mod terminal;

use crate::core::config::GameConfig;
use crate::core::types::Position;
use crate::entity::EntityKind;
use crate::simulation::Session;
use crate::world::WorldLayout;

pub use camera::Viewport;
pub use terminal::draw_frame;

/// Concealed escortees are drawn faint within this fraction of the bush radius
pub const CONCEALED_DRAW_FRACTION: f32 = 0.6;

/// Everything one frame needs, borrowed from the game
pub struct FrameView<'a> {
    pub config: &'a GameConfig,
    pub session: &'a Session,
    pub layout: &'a WorldLayout,
    pub thought: &'a str,
}

/// Lightweight snapshot of an entity for rendering
#[derive(Debug, Clone)]
pub struct RenderEntity {
    pub position: Position,
    pub kind: EntityKind,
    pub radius: f32,
    pub angle: f32,
    pub health_fraction: f32,
    /// Tucked inside a bush; drawn faint
    pub concealed: bool,
    pub flashing: bool,
}

/// Collects on-screen entities into a reusable buffer, in draw order:
/// escortees, living enemies, then the guardian on top.
/// Call this once per frame, passing the same buffer to avoid allocations.
pub fn collect_render_entities(view: &FrameView, buffer: &mut Vec<RenderEntity>) {
    buffer.clear();
    let viewport = Viewport::new(view.session.camera_x);

    for escortee in &view.session.escortees {
        let concealed = escortee.is_hiding
            && escortee
                .target_obstacle
                .and_then(|id| view.layout.obstacle(id))
                .map_or(false, |bush| {
                    bush.conceals(escortee.body.position, CONCEALED_DRAW_FRACTION)
                });
        buffer.push(RenderEntity {
            position: escortee.body.position,
            kind: escortee.body.kind,
            radius: escortee.body.radius,
            angle: escortee.body.angle,
            health_fraction: escortee.body.health_fraction(),
            concealed,
            flashing: false,
        });
    }

    for enemy in view.session.enemies.iter().filter(|e| !e.is_dead) {
        if !viewport.contains_x(enemy.body.position.x, enemy.body.radius) {
            continue;
        }
        buffer.push(RenderEntity {
            position: enemy.body.position,
            kind: enemy.body.kind,
            radius: enemy.body.radius,
            angle: enemy.body.angle,
            health_fraction: enemy.body.health_fraction(),
            concealed: false,
            flashing: enemy.hit_flash > 0,
        });
    }

    let guardian = &view.session.guardian.body;
    buffer.push(RenderEntity {
        position: guardian.position,
        kind: guardian.kind,
        radius: guardian.radius,
        angle: guardian.angle,
        health_fraction: guardian.health_fraction(),
        concealed: false,
        flashing: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Enemy, EnemyKind};
    use crate::world::Obstacle;

    fn bush_at(x: f32, y: f32) -> Obstacle {
        Obstacle {
            position: Position::new(x, y),
            radius: 50.0,
            rotation: 0.0,
            leaves: Vec::new(),
        }
    }

    #[test]
    fn test_draw_order_puts_guardian_last() {
        let session = Session::begin();
        let layout = WorldLayout::default();
        let config = GameConfig::default();
        let view = FrameView {
            config: &config,
            session: &session,
            layout: &layout,
            thought: "",
        };
        let mut buffer = Vec::new();
        collect_render_entities(&view, &mut buffer);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer[0].kind, EntityKind::Escortee);
        assert_eq!(buffer[2].kind, EntityKind::Guardian);
    }

    #[test]
    fn test_skips_dead_and_offscreen_enemies() {
        let mut session = Session::begin();
        session
            .enemies
            .push(Enemy::new(EnemyKind::Wolf, Position::new(300.0, 400.0), 50.0));
        let mut dead = Enemy::new(EnemyKind::Dog, Position::new(320.0, 400.0), 50.0);
        dead.is_dead = true;
        session.enemies.push(dead);
        session
            .enemies
            .push(Enemy::new(EnemyKind::Criminal, Position::new(4000.0, 400.0), 50.0));

        let layout = WorldLayout::default();
        let config = GameConfig::default();
        let view = FrameView {
            config: &config,
            session: &session,
            layout: &layout,
            thought: "",
        };
        let mut buffer = Vec::new();
        collect_render_entities(&view, &mut buffer);
        let enemies: Vec<_> = buffer
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Enemy(_)))
            .collect();
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].kind, EntityKind::Enemy(EnemyKind::Wolf));
    }

    #[test]
    fn test_hidden_escortee_inside_bush_is_concealed() {
        let mut session = Session::begin();
        let layout = WorldLayout::from_obstacles(vec![bush_at(60.0, 375.0)]);
        let nearest = layout.nearest_obstacle(Position::new(60.0, 375.0));
        session.escortees[0].hide_behind(nearest);
        session.escortees[1].hide_behind(nearest);

        let config = GameConfig::default();
        let view = FrameView {
            config: &config,
            session: &session,
            layout: &layout,
            thought: "",
        };
        let mut buffer = Vec::new();
        collect_render_entities(&view, &mut buffer);
        // First escortee starts 0 units from the bush, second 50
        assert!(buffer[0].concealed);
        assert!(!buffer[1].concealed);
    }
}
