//! Session state: everything that resets on restart
//!
//! The world layout outlives sessions; a [`Session`] is rebuilt from scratch
//! every time play (re)starts.

use serde::{Deserialize, Serialize};

use crate::core::types::{Millis, Position};
use crate::entity::{Enemy, Escortee, Guardian, Particle};
use crate::simulation::constants::{
    ESCORTEE_START_OFFSETS_Y, ESCORTEE_START_X, GUARDIAN_START_X, VIEWPORT_WIDTH, WORLD_HEIGHT,
    WORLD_WIDTH,
};

/// Session state machine: Start -> Playing -> {Won, Lost} -> Playing ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Start,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// Countdown for the family's hiding spell
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HideTimer {
    pub started_at: Option<Millis>,
    /// Seconds until the family comes out, 0 when not hiding
    pub time_left_secs: f32,
}

impl HideTimer {
    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn start(&mut self, now: Millis, duration_secs: f32) {
        self.started_at = Some(now);
        self.time_left_secs = duration_secs;
    }

    pub fn stop(&mut self) {
        self.started_at = None;
        self.time_left_secs = 0.0;
    }

    /// Seconds since hiding started, if active
    pub fn elapsed_secs(&self, now: Millis) -> Option<f32> {
        self.started_at
            .map(|start| now.saturating_sub(start) as f32 / 1000.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub status: GameStatus,
    pub guardian: Guardian,
    pub escortees: Vec<Escortee>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub hide: HideTimer,
    /// Left edge of the visible window in world x
    pub camera_x: f32,
    pub score: u32,
    /// Percentage of the world width reached by the guardian
    pub distance_covered: u32,
    pub tick: u64,
}

impl Session {
    /// Idle session waiting for the start command
    pub fn new() -> Self {
        let mid = WORLD_HEIGHT / 2.0;
        Self {
            status: GameStatus::Start,
            guardian: Guardian::new(Position::new(GUARDIAN_START_X, mid)),
            escortees: ESCORTEE_START_OFFSETS_Y
                .iter()
                .map(|dy| Escortee::new(Position::new(ESCORTEE_START_X, mid + dy)))
                .collect(),
            enemies: Vec::new(),
            particles: Vec::new(),
            hide: HideTimer::default(),
            camera_x: 0.0,
            score: 0,
            distance_covered: 0,
            tick: 0,
        }
    }

    /// Fresh session already in play
    pub fn begin() -> Self {
        Self {
            status: GameStatus::Playing,
            ..Self::new()
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Mean escortee health, rounded up for display
    pub fn family_health(&self) -> u32 {
        if self.escortees.is_empty() {
            return 0;
        }
        let total: f32 = self.escortees.iter().map(|e| e.body.health).sum();
        (total / self.escortees.len() as f32).ceil() as u32
    }

    /// Keep the guardian a third of the way into the viewport
    pub fn update_camera(&mut self) {
        self.camera_x = (self.guardian.body.position.x - VIEWPORT_WIDTH / 3.0)
            .clamp(0.0, WORLD_WIDTH - VIEWPORT_WIDTH);
    }

    pub fn update_distance(&mut self) {
        self.distance_covered =
            (self.guardian.body.position.x / WORLD_WIDTH * 100.0).floor().max(0.0) as u32;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
