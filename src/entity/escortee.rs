//! Escorted family members
//!
//! Escortees follow the guardian, or a bush while hiding. Their death ends
//! the session, so they carry no dead flag of their own.

use serde::{Deserialize, Serialize};

use crate::core::types::{ObstacleId, Position};
use crate::entity::body::{Body, EntityKind};
use crate::simulation::constants::ESCORTEE_HEALTH;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Escortee {
    pub body: Body,
    pub is_hiding: bool,
    /// Bush picked when hiding started; fixed until hiding ends
    pub target_obstacle: Option<ObstacleId>,
}

impl Escortee {
    pub fn new(position: Position) -> Self {
        Self {
            body: Body::new(EntityKind::Escortee, position, ESCORTEE_HEALTH),
            is_hiding: false,
            target_obstacle: None,
        }
    }

    pub fn hide_behind(&mut self, obstacle: Option<ObstacleId>) {
        self.is_hiding = true;
        self.target_obstacle = obstacle;
    }

    pub fn reveal(&mut self) {
        self.is_hiding = false;
        self.target_obstacle = None;
    }

    /// True while hiding behind exactly this bush
    pub fn is_sheltered_by(&self, obstacle: ObstacleId) -> bool {
        self.is_hiding && self.target_obstacle == Some(obstacle)
    }
}
