//! Circle overlap resolution and radial knockback
//!
//! Pure functions over bodies and obstacles. All entity counts are small, so
//! callers resolve pairs by plain nested loops.

use std::f32::consts::TAU;

use rand::Rng;

use crate::core::types::Position;
use crate::entity::body::{Body, EntityKind};
use crate::world::objects::Obstacle;

/// Euclidean distance between two positions
#[inline]
pub fn distance(a: Position, b: Position) -> f32 {
    a.distance(b)
}

/// Fraction of an overlap correction moved by `a` when colliding with `b`
///
/// The guardian is heavy: it moves `guardian_share`, its partner the rest.
/// Any other pair splits the correction evenly.
pub fn collision_share(a: EntityKind, b: EntityKind, guardian_share: f32) -> f32 {
    match (a, b) {
        (EntityKind::Guardian, EntityKind::Guardian) => 0.5,
        (EntityKind::Guardian, _) => guardian_share,
        (_, EntityKind::Guardian) => 1.0 - guardian_share,
        _ => 0.5,
    }
}

/// Push two overlapping bodies apart along the line between their centers
///
/// The full overlap is removed and split by [`collision_share`]. Bodies with
/// coincident centers separate along a random direction. Returns true if the
/// bodies were overlapping.
pub fn resolve_entity_collision<R: Rng>(
    a: &mut Body,
    b: &mut Body,
    guardian_share: f32,
    rng: &mut R,
) -> bool {
    let delta = a.position - b.position;
    let dist = delta.length();
    let min_dist = a.radius + b.radius;
    if dist >= min_dist {
        return false;
    }

    let overlap = min_dist - dist;
    let direction = if dist == 0.0 {
        let angle = rng.gen::<f32>() * TAU;
        Position::new(angle.cos(), angle.sin())
    } else {
        delta / dist
    };

    let share_a = collision_share(a.kind, b.kind, guardian_share);
    a.position += direction * overlap * share_a;
    b.position -= direction * overlap * (1.0 - share_a);
    true
}

/// Push a body fully out of a bush's collision circle; the bush never moves
///
/// Callers skip this for an escortee sheltering behind this very bush.
/// Coincident centers push the body east.
pub fn resolve_obstacle_collision(body: &mut Body, obstacle: &Obstacle, collision_fraction: f32) -> bool {
    let delta = body.position - obstacle.position;
    let dist = delta.length();
    let min_dist = body.radius + obstacle.collision_radius(collision_fraction);
    if dist >= min_dist {
        return false;
    }

    let direction = if dist == 0.0 { Position::X } else { delta / dist };
    body.position += direction * (min_dist - dist);
    true
}

/// Knockback distance for a bark heard at `distance`
///
/// Linear from `max_force` at the guardian down to zero at `range`.
pub fn bark_force(distance: f32, range: f32, max_force: f32) -> f32 {
    if distance >= range {
        0.0
    } else {
        (1.0 - distance / range) * max_force
    }
}
