//! Guardian steering and escortee following

use rand::Rng;

use crate::core::config::GameConfig;
use crate::core::types::Position;
use crate::entity::particle::{burst, ParticleTint};
use crate::entity::{Escortee, Guardian, Particle};
use crate::simulation::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::simulation::input::InputState;
use crate::world::WorldLayout;

/// Dust is kicked up slightly below the guardian's center
const DUST_OFFSET_Y: f32 = 10.0;

/// Move the guardian along the normalized input direction, then clamp it
/// into the world whether it moved or not
pub fn move_guardian<R: Rng>(
    guardian: &mut Guardian,
    input: &InputState,
    config: &GameConfig,
    particles: &mut Vec<Particle>,
    rng: &mut R,
) {
    let intent = input.direction();
    if intent != Position::ZERO {
        let dir = intent.normalize();
        let body = &mut guardian.body;
        body.position += dir * body.speed;
        body.angle = dir.y.atan2(dir.x);

        if rng.gen::<f32>() < config.dust_chance {
            let origin = body.position + Position::new(0.0, DUST_OFFSET_Y);
            burst(particles, rng, origin, ParticleTint::Dust, 1, 1.0);
        }
    }

    guardian.clamp_to_world(WORLD_WIDTH, WORLD_HEIGHT);
}

/// Where an escortee is heading and how close it needs to get
///
/// Hiding escortees tuck into their bush; everyone else trails the guardian
/// at a distance.
pub fn escortee_goal(
    escortee: &Escortee,
    guardian_position: Position,
    layout: &WorldLayout,
    config: &GameConfig,
) -> (Position, f32) {
    let shelter = escortee
        .target_obstacle
        .filter(|_| escortee.is_hiding)
        .and_then(|id| layout.obstacle(id));

    match shelter {
        Some(bush) => (bush.position, config.hide_arrival_threshold),
        None => (guardian_position, config.follow_distance),
    }
}

pub fn move_escortees(
    escortees: &mut [Escortee],
    guardian_position: Position,
    layout: &WorldLayout,
    config: &GameConfig,
) {
    for escortee in escortees.iter_mut() {
        let (target, threshold) = escortee_goal(escortee, guardian_position, layout, config);
        if escortee.body.position.distance(target) > threshold {
            escortee.body.step_towards(target);
        }
    }
}
