//! Simulation configuration
//!
//! Every tunable the core consumes is supplied here at construction time.
//! Defaults reproduce the classic arcade balance.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::consts::*;

/// Construction-time configuration for a [`crate::GameState`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Run seed for reproducibility
    pub seed: u64,

    // === Geometry ===
    /// Visible playfield
    pub playfield: Rect,
    /// Safe rectangle interior waypoints are drawn from
    pub interior: Rect,
    /// Width of the off-screen band enemies spawn in
    pub spawn_margin: f32,
    /// Distance past the playfield edge an exiting enemy flies to
    pub exit_overshoot: f32,

    // === Motion ===
    /// Player ship speed (pixels/s)
    pub player_speed: f32,
    /// Projectile speed (pixels/s, straight up)
    pub projectile_speed: f32,
    /// Vertical offset from the player centre projectiles spawn at
    pub muzzle_offset: f32,
    /// Duration of every enemy path segment
    pub segment_duration_ms: u64,
    /// Inclusive range of wander segments drawn per enemy
    pub min_wanders: u32,
    pub max_wanders: u32,

    // === Timers ===
    /// Minimum spacing between shots
    pub fire_cooldown_ms: u64,
    /// Enemy spawn timer period
    pub spawn_interval_ms: u64,
    /// How long an explosion stays alive
    pub explosion_lifetime_ms: u64,

    // === Pools ===
    pub enemy_capacity: usize,
    pub projectile_capacity: usize,
    pub explosion_capacity: usize,

    // === Hitboxes (half extents, centre-anchored) ===
    pub player_half_extent: Vec2,
    pub enemy_half_extent: Vec2,
    pub projectile_half_extent: Vec2,

    // === Scoring ===
    pub score_per_kill: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,

            playfield: Rect::new(Vec2::ZERO, Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)),
            interior: Rect::new(Vec2::new(10.0, 10.0), Vec2::new(920.0, 380.0)),
            spawn_margin: SPAWN_MARGIN,
            exit_overshoot: EXIT_OVERSHOOT,

            player_speed: PLAYER_SPEED,
            projectile_speed: LAZER_SPEED,
            muzzle_offset: LAZER_MUZZLE_OFFSET,
            segment_duration_ms: SEGMENT_DURATION_MS,
            min_wanders: MIN_WANDERS,
            max_wanders: MAX_WANDERS,

            fire_cooldown_ms: LAZER_DELAY_MS,
            spawn_interval_ms: ENEMY_DELAY_MS,
            explosion_lifetime_ms: EXPLOSION_LIFETIME_MS,

            enemy_capacity: MAX_ENEMIES,
            projectile_capacity: MAX_LAZERS,
            explosion_capacity: MAX_EXPLOSIONS,

            player_half_extent: Vec2::splat(PLAYER_HALF_EXTENT),
            enemy_half_extent: Vec2::splat(ENEMY_HALF_EXTENT),
            projectile_half_extent: Vec2::new(LAZER_HALF_EXTENT.0, LAZER_HALF_EXTENT.1),

            score_per_kill: SCORE_PER_KILL,
        }
    }
}

impl SimConfig {
    /// Default configuration with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segment_duration_ms == 0 {
            return Err(ConfigError::ZeroDuration("segment_duration_ms"));
        }
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration("spawn_interval_ms"));
        }
        if self.min_wanders > self.max_wanders {
            return Err(ConfigError::InvalidWanderRange {
                min: self.min_wanders,
                max: self.max_wanders,
            });
        }
        if !self.playfield.is_well_formed() {
            return Err(ConfigError::MalformedRect("playfield"));
        }
        if !self.interior.is_well_formed() {
            return Err(ConfigError::MalformedRect("interior"));
        }
        if !self.playfield.contains(self.interior.min) || !self.playfield.contains(self.interior.max)
        {
            return Err(ConfigError::InteriorOutsidePlayfield);
        }
        if self.spawn_margin < 0.0 {
            return Err(ConfigError::Negative("spawn_margin"));
        }
        if self.exit_overshoot <= 0.0 {
            return Err(ConfigError::Negative("exit_overshoot"));
        }
        Ok(())
    }

    pub fn segment_duration(&self) -> Duration {
        Duration::from_millis(self.segment_duration_ms)
    }

    pub fn fire_cooldown(&self) -> Duration {
        Duration::from_millis(self.fire_cooldown_ms)
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    pub fn explosion_lifetime(&self) -> Duration {
        Duration::from_millis(self.explosion_lifetime_ms)
    }
}

/// Errors raised while loading or validating a [`SimConfig`]
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    /// A duration that is divided by or used as a timer period was zero
    ZeroDuration(&'static str),
    InvalidWanderRange { min: u32, max: u32 },
    MalformedRect(&'static str),
    InteriorOutsidePlayfield,
    Negative(&'static str),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "Config parse error: {}", e),
            ConfigError::ZeroDuration(field) => write!(f, "{} must be greater than zero", field),
            ConfigError::InvalidWanderRange { min, max } => {
                write!(f, "Wander range is empty: min {} > max {}", min, max)
            }
            ConfigError::MalformedRect(field) => write!(f, "{} has min greater than max", field),
            ConfigError::InteriorOutsidePlayfield => {
                write!(f, "Interior waypoint rectangle must lie inside the playfield")
            }
            ConfigError::Negative(field) => write!(f, "{} must be positive", field),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}
