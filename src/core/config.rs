//! Game configuration with documented tunables
//!
//! All gameplay magic numbers are collected here. Fixed physical constants
//! (world size, per-variant radius and speed) live in
//! `simulation::constants` instead.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};

/// Tunable values for the simulation step
///
/// These values reproduce the feel of the original prototype. Changing them
/// will affect pacing and difficulty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === SPAWNING ===
    /// Probability that one enemy spawns on any given tick
    pub spawn_chance: f32,

    /// Minimum horizontal distance ahead of the guardian for a spawn
    ///
    /// Defaults to viewport width / 1.5 so enemies appear just off screen.
    pub spawn_ahead_min: f32,

    /// Random extra distance added on top of `spawn_ahead_min`
    pub spawn_ahead_jitter: f32,

    /// Starting (and maximum) health of every enemy variant
    pub enemy_health: f32,

    // === BARK ===
    /// Minimum time between two barks
    pub bark_cooldown_ms: u64,

    /// Length of the bark ring animation in ticks
    pub bark_visual_ticks: u32,

    /// Enemies closer than this are pushed away
    pub bark_range: f32,

    /// Push distance applied to an enemy standing on the guardian
    ///
    /// Falls off linearly to zero at `bark_range`.
    pub bark_max_force: f32,

    /// Hit-flash ticks applied to enemies caught by a bark
    pub bark_hit_flash_ticks: u32,

    // === ATTACK ===
    /// Minimum time between two attacks
    pub attack_cooldown_ms: u64,

    /// Length of the bite animation in ticks
    pub attack_visual_ticks: u32,

    /// Flat damage dealt to every enemy in reach
    pub attack_damage: f32,

    /// Reach added to the sum of guardian and enemy radii
    pub attack_reach: f32,

    /// Hit-flash ticks applied to bitten enemies
    pub attack_hit_flash_ticks: u32,

    /// Score awarded for each kill
    pub kill_score: u32,

    // === HIDING ===
    /// How long the family stays hidden before coming out on its own
    pub hide_duration_secs: f32,

    /// Distance to the bush center at which a hiding escortee stops
    pub hide_arrival_threshold: f32,

    /// Distance to the guardian at which a following escortee stops
    ///
    /// Must be larger than `hide_arrival_threshold`.
    pub follow_distance: f32,

    /// Fraction of a bush radius inside which a hiding escortee is unseen
    pub concealment_fraction: f32,

    /// Fraction of a bush radius used for collision
    ///
    /// Lets sprites overlap the foliage edge without being pushed.
    pub obstacle_collision_fraction: f32,

    // === COMBAT / PHYSICS ===
    /// Health lost per tick by an escortee in contact with an enemy
    pub contact_damage: f32,

    /// Share of an overlap correction absorbed by the guardian
    ///
    /// The other entity absorbs the remainder.
    pub guardian_collision_share: f32,

    /// The session is won once the guardian is this close to the east edge
    pub goal_margin: f32,

    // === NARRATION ===
    /// Minimum time between two narration attempts
    pub narration_interval_ms: u64,

    // === WORLD LAYOUT ===
    /// Number of bushes generated at startup
    pub obstacle_count: usize,

    /// Number of grass tufts generated at startup
    pub grass_count: usize,

    // === PARTICLES ===
    /// Life lost by each particle per tick (life starts at 1.0)
    pub particle_decay: f32,

    /// Chance per moving tick that the guardian kicks up dust
    pub dust_chance: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_chance: 0.025,
            spawn_ahead_min: 1200.0 / 1.5,
            spawn_ahead_jitter: 500.0,
            enemy_health: 50.0,

            bark_cooldown_ms: 1000,
            bark_visual_ticks: 20,
            bark_range: 180.0,
            bark_max_force: 60.0,
            bark_hit_flash_ticks: 5,

            attack_cooldown_ms: 350,
            attack_visual_ticks: 12,
            attack_damage: 25.0,
            attack_reach: 40.0,
            attack_hit_flash_ticks: 8,
            kill_score: 250,

            hide_duration_secs: 10.0,
            hide_arrival_threshold: 5.0,
            follow_distance: 85.0,
            concealment_fraction: 0.5,
            obstacle_collision_fraction: 0.7,

            contact_damage: 0.6,
            guardian_collision_share: 0.1,
            goal_margin: 300.0,

            narration_interval_ms: 6000,

            obstacle_count: 45,
            grass_count: 300,

            particle_decay: 0.025,
            dust_chance: 0.1,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; absent keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: GameConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        for (name, chance) in [
            ("spawn_chance", self.spawn_chance),
            ("dust_chance", self.dust_chance),
            ("guardian_collision_share", self.guardian_collision_share),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(GameError::Config(format!(
                    "{} ({}) must be within [0, 1]",
                    name, chance
                )));
            }
        }

        for (name, fraction) in [
            ("concealment_fraction", self.concealment_fraction),
            ("obstacle_collision_fraction", self.obstacle_collision_fraction),
        ] {
            if fraction <= 0.0 || fraction > 1.0 {
                return Err(GameError::Config(format!(
                    "{} ({}) must be within (0, 1]",
                    name, fraction
                )));
            }
        }

        if self.hide_arrival_threshold >= self.follow_distance {
            return Err(GameError::Config(format!(
                "hide_arrival_threshold ({}) should be < follow_distance ({})",
                self.hide_arrival_threshold, self.follow_distance
            )));
        }

        if self.bark_range <= 0.0 || self.enemy_health <= 0.0 || self.particle_decay <= 0.0 {
            return Err(GameError::Config(
                "bark_range, enemy_health and particle_decay must be positive".into(),
            ));
        }

        if self.obstacle_count == 0 {
            return Err(GameError::Config(
                "obstacle_count must be at least 1 so the family has somewhere to hide".into(),
            ));
        }

        if self.hide_duration_secs <= 0.0 {
            return Err(GameError::Config("hide_duration_secs must be positive".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: GameConfig = toml::from_str("spawn_chance = 0.0\nkill_score = 100").unwrap();
        assert_eq!(config.spawn_chance, 0.0);
        assert_eq!(config.kill_score, 100);
        assert_eq!(config.attack_cooldown_ms, 350);
        assert_eq!(config.follow_distance, 85.0);
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let config = GameConfig {
            hide_arrival_threshold: 90.0,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(GameError::Config(_))));
    }

    #[test]
    fn test_rejects_out_of_range_chance() {
        let config = GameConfig {
            spawn_chance: 1.5,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_forest() {
        let config = GameConfig {
            obstacle_count: 0,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(GameError::Config(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = GameConfig::load(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(GameError::Io(_))));
    }
}
