//! Geometry and collision utilities

pub mod collision;

pub use collision::{
    bark_force, collision_share, distance, resolve_entity_collision, resolve_obstacle_collision,
};
