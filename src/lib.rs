//! Lazer Swarm - an arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, enemy paths, combat, firing)
//! - `settings`: Construction-time configuration

pub mod settings;
pub mod sim;

pub use settings::{ConfigError, SimConfig};
pub use sim::{EventSink, GameEvent, GameState, TickInput};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz, the source frame rate)
    pub const SIM_DT_MS: u64 = 16;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 960.0;
    pub const PLAYFIELD_HEIGHT: f32 = 540.0;

    /// Player ship
    pub const PLAYER_SPEED: f32 = 300.0;
    /// Player sprite is 32x32 drawn at 2x scale, centre-anchored
    pub const PLAYER_HALF_EXTENT: f32 = 32.0;

    /// Projectiles
    pub const LAZER_SPEED: f32 = 400.0;
    pub const LAZER_DELAY_MS: u64 = 200;
    pub const LAZER_MUZZLE_OFFSET: f32 = 10.0;
    pub const LAZER_HALF_EXTENT: (f32, f32) = (4.0, 12.0);

    /// Enemies
    pub const ENEMY_DELAY_MS: u64 = 1000;
    pub const ENEMY_HALF_EXTENT: f32 = 16.0;
    pub const SEGMENT_DURATION_MS: u64 = 2000;
    pub const MIN_WANDERS: u32 = 1;
    pub const MAX_WANDERS: u32 = 6;
    /// Off-screen band enemies spawn in
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// How far past the edge an exiting enemy flies
    pub const EXIT_OVERSHOOT: f32 = 150.0;

    /// Pool capacities
    pub const MAX_LAZERS: usize = 30;
    pub const MAX_ENEMIES: usize = 20;
    pub const MAX_EXPLOSIONS: usize = 20;

    /// Explosion spritesheet: 16 frames at 30 fps
    pub const EXPLOSION_LIFETIME_MS: u64 = 533;

    pub const SCORE_PER_KILL: u64 = 10;
}

/// Axis-aligned rectangle given by its min and max corners
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of half-size `half` centred on `center`
    #[inline]
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Inclusive containment
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Strict overlap; boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Whether `min <= max` on both axes
    pub fn is_well_formed(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}

/// Wrap a coordinate into `[lo, hi)`
#[inline]
pub fn wrap_coord(v: f32, lo: f32, hi: f32) -> f32 {
    let span = hi - lo;
    if span <= 0.0 {
        return lo;
    }
    lo + (v - lo).rem_euclid(span)
}
