//! Procedural world layout
//!
//! The layout is generated once per process and shared by every session;
//! restarting a session never regenerates it.

use std::f32::consts::TAU;

use ordered_float::OrderedFloat;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::types::{ObstacleId, Position};
use crate::simulation::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::world::objects::{GrassTuft, Leaf, Obstacle};

/// First bush column sits this far from the west edge
const FIRST_BUSH_X: f32 = 400.0;
/// Horizontal jitter around each bush column
const BUSH_X_JITTER: f32 = 150.0;
/// Bushes keep this margin from the north and south edges
const BUSH_Y_MARGIN: f32 = 100.0;
const BUSH_MIN_RADIUS: f32 = 45.0;
const BUSH_RADIUS_JITTER: f32 = 25.0;
const LEAVES_PER_BUSH: usize = 8;

/// Immutable obstacles and decoration for the whole process lifetime
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldLayout {
    pub obstacles: Vec<Obstacle>,
    pub grass: Vec<GrassTuft>,
}

impl WorldLayout {
    /// Build a layout from explicit obstacles, without decoration
    pub fn from_obstacles(obstacles: Vec<Obstacle>) -> Self {
        Self {
            obstacles,
            grass: Vec::new(),
        }
    }

    /// Scatter bushes in evenly spaced jittered columns and grass uniformly
    pub fn generate<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let count = config.obstacle_count.max(1);
        let spacing = WORLD_WIDTH / count as f32;

        let obstacles = (0..config.obstacle_count)
            .map(|i| {
                let radius = BUSH_MIN_RADIUS + rng.gen::<f32>() * BUSH_RADIUS_JITTER;
                let position = Position::new(
                    FIRST_BUSH_X + i as f32 * spacing + (rng.gen::<f32>() - 0.5) * BUSH_X_JITTER,
                    BUSH_Y_MARGIN + rng.gen::<f32>() * (WORLD_HEIGHT - 2.0 * BUSH_Y_MARGIN),
                );
                let rotation = rng.gen::<f32>() * TAU;
                let leaves = (0..LEAVES_PER_BUSH)
                    .map(|_| Leaf {
                        offset: Position::new(
                            (rng.gen::<f32>() - 0.5) * radius * 0.8,
                            (rng.gen::<f32>() - 0.5) * radius * 0.8,
                        ),
                        radius: radius * (0.4 + rng.gen::<f32>() * 0.3),
                    })
                    .collect();
                Obstacle {
                    position,
                    radius,
                    rotation,
                    leaves,
                }
            })
            .collect();

        let grass = (0..config.grass_count)
            .map(|_| GrassTuft {
                position: Position::new(
                    rng.gen::<f32>() * WORLD_WIDTH,
                    rng.gen::<f32>() * WORLD_HEIGHT,
                ),
                height: 5.0 + rng.gen::<f32>() * 15.0,
                width: 2.0 + rng.gen::<f32>() * 3.0,
            })
            .collect();

        tracing::debug!(
            "Generated world layout: {} bushes, {} grass tufts",
            config.obstacle_count,
            config.grass_count
        );

        Self { obstacles, grass }
    }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.0)
    }

    pub fn obstacles_with_ids(&self) -> impl Iterator<Item = (ObstacleId, &Obstacle)> + '_ {
        self.obstacles
            .iter()
            .enumerate()
            .map(|(i, obstacle)| (ObstacleId(i), obstacle))
    }

    /// Closest bush to `point` by linear scan; the first of equally close
    /// bushes wins
    pub fn nearest_obstacle(&self, point: Position) -> Option<ObstacleId> {
        self.obstacles_with_ids()
            .min_by_key(|(_, obstacle)| OrderedFloat(obstacle.position.distance(point)))
            .map(|(id, _)| id)
    }
}
