//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]: the three
//! entity pools, the player, the score and the seeded RNG. Configuration is
//! fixed at construction.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::combat::Hitboxes;
use super::events::EventSink;
use super::fire::FireController;
use super::path::{PathBounds, PathSchedule};
use super::pool::{EntityHandle, EntityPool};
use super::spawn::SpawnController;
use super::tick::{TickInput, tick};
use crate::{ConfigError, SimConfig};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Player alive
    Playing,
    /// Player destroyed; enemies keep flying until the driver restarts
    GameOver,
}

/// Enemy payload: its flight plan, cleared when the enemy dies
#[derive(Debug, Clone, Default)]
pub struct Enemy {
    pub schedule: Option<PathSchedule>,
}

/// Projectile payload
#[derive(Debug, Clone, Default)]
pub struct Projectile {
    /// Constant velocity (pixels/s)
    pub vel: Vec2,
}

/// Explosion payload
#[derive(Debug, Clone, Default)]
pub struct Explosion {
    /// Time left before the effect frees its slot
    pub remaining: Duration,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub alive: bool,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) config: SimConfig,
    pub(crate) rng: Pcg32,
    /// Total simulated time
    pub(crate) clock: Duration,
    pub(crate) phase: GamePhase,
    pub(crate) score: u64,
    pub(crate) player: Player,
    pub(crate) enemies: EntityPool<Enemy>,
    pub(crate) projectiles: EntityPool<Projectile>,
    pub(crate) explosions: EntityPool<Explosion>,
    pub(crate) paths: PathBounds,
    pub(crate) spawner: SpawnController,
    pub(crate) fire: FireController,
    pub(crate) hitboxes: Hitboxes,
}

impl GameState {
    /// Create a simulation from a validated configuration
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let state = Self {
            rng: Pcg32::seed_from_u64(config.seed),
            clock: Duration::ZERO,
            phase: GamePhase::Playing,
            score: 0,
            player: Player {
                pos: (config.playfield.min + config.playfield.max) / 2.0,
                alive: true,
            },
            enemies: EntityPool::new(config.enemy_capacity),
            projectiles: EntityPool::new(config.projectile_capacity),
            explosions: EntityPool::new(config.explosion_capacity),
            paths: PathBounds::from_config(&config),
            spawner: SpawnController::from_config(&config),
            fire: FireController::new(config.fire_cooldown()),
            hitboxes: Hitboxes::from_config(&config),
            config,
        };

        log::info!(
            "Simulation initialized with seed {} ({} enemies, {} projectiles, {} explosions)",
            state.config.seed,
            state.enemies.capacity(),
            state.projectiles.capacity(),
            state.explosions.capacity()
        );

        Ok(state)
    }

    /// Advance one frame: player, projectiles, firing, combat, enemy paths
    pub fn on_tick(&mut self, input: &TickInput, elapsed: Duration, sink: &mut impl EventSink) {
        tick(self, input, elapsed, sink);
    }

    /// Spawn-timer callback: try to bring one enemy in
    pub fn on_spawn_timer(&mut self) -> Option<EntityHandle> {
        self.spawner.spawn(&mut self.enemies, &self.paths, &mut self.rng)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &EntityPool<Enemy> {
        &self.enemies
    }

    pub fn projectiles(&self) -> &EntityPool<Projectile> {
        &self.projectiles
    }

    pub fn explosions(&self) -> &EntityPool<Explosion> {
        &self.explosions
    }

    /// Spawn an enemy with a fixed side and wander count (for tests)
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        side: super::path::EntrySide,
        wanders: u32,
    ) -> Option<EntityHandle> {
        self.spawner
            .spawn_from(side, wanders, &mut self.enemies, &self.paths, &mut self.rng)
    }

    /// Place an enemy at a fixed point with a long, stationary path (for tests)
    #[cfg(test)]
    pub fn place_test_enemy(&mut self, pos: Vec2) -> Option<EntityHandle> {
        let schedule = PathSchedule {
            phase: super::path::PathPhase::Entering { wanders: 0 },
            side: super::path::EntrySide::Left,
            segment: super::path::Segment::new(pos, pos, Duration::from_secs(3600)),
            segments_completed: 0,
        };
        self.enemies.try_spawn(
            pos,
            Enemy {
                schedule: Some(schedule),
            },
        )
    }

    /// Place a projectile at a fixed point with a given velocity (for tests)
    #[cfg(test)]
    pub fn place_test_projectile(&mut self, pos: Vec2, vel: Vec2) -> Option<EntityHandle> {
        self.projectiles.try_spawn(pos, Projectile { vel })
    }
}
