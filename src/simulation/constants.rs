//! Fixed physical constants - world size and per-variant body stats
//!
//! Tunable gameplay values live in `core::config::GameConfig`.

// World
pub const WORLD_WIDTH: f32 = 5000.0;
pub const WORLD_HEIGHT: f32 = 800.0;
pub const VIEWPORT_WIDTH: f32 = 1200.0;

// Collision radii
pub const GUARDIAN_RADIUS: f32 = 18.0;
pub const ESCORTEE_RADIUS: f32 = 12.0;
pub const WOLF_RADIUS: f32 = 16.0;
pub const DOG_RADIUS: f32 = 14.0;
pub const CRIMINAL_RADIUS: f32 = 17.0;

// Movement per tick
pub const GUARDIAN_SPEED: f32 = 5.5;
pub const ESCORTEE_SPEED: f32 = 2.8;
pub const WOLF_SPEED: f32 = 3.8;
pub const DOG_SPEED: f32 = 4.2;
pub const CRIMINAL_SPEED: f32 = 3.0;

// Health
pub const GUARDIAN_HEALTH: f32 = 100.0;
pub const ESCORTEE_HEALTH: f32 = 100.0;

// Session start layout
pub const GUARDIAN_START_X: f32 = 100.0;
pub const ESCORTEE_START_X: f32 = 60.0;
pub const ESCORTEE_START_OFFSETS_Y: [f32; 2] = [-25.0, 25.0];

/// Distance ahead of the guardian at which the attack swing particles appear
pub const ATTACK_SWING_OFFSET: f32 = 30.0;

/// Goal house position (visual only)
pub const HOUSE_X: f32 = WORLD_WIDTH - 250.0;
