//! Enemy spawning
//!
//! Each spawn-timer fire flips a coin for the entry side, takes the first
//! dormant enemy slot and sends it off along a fresh path. A full pool simply
//! skips that fire.

use std::time::Duration;

use glam::Vec2;
use rand::Rng;

use super::path::{EntrySide, PathBounds, PathSchedule, random_point_in};
use super::pool::{EntityHandle, EntityPool};
use super::state::Enemy;
use crate::{Rect, SimConfig};

/// Fixed-period timer a driver feeds with elapsed time
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    interval: Duration,
    accumulated: Duration,
}

impl SpawnTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    /// Add elapsed time and return how many fires fell due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.accumulated += elapsed;
        let mut fires = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            fires += 1;
        }
        fires
    }
}

/// Entry geometry and wander range for new enemies
#[derive(Debug, Clone)]
pub struct SpawnController {
    left: Rect,
    right: Rect,
    min_wanders: u32,
    max_wanders: u32,
}

impl SpawnController {
    pub fn from_config(config: &SimConfig) -> Self {
        let field = config.playfield;
        let margin = config.spawn_margin;
        let top = field.min.y - margin;
        Self {
            left: Rect::new(
                Vec2::new(field.min.x - margin, top),
                Vec2::new(field.min.x, field.min.y),
            ),
            right: Rect::new(
                Vec2::new(field.max.x, top),
                Vec2::new(field.max.x + margin, field.min.y),
            ),
            min_wanders: config.min_wanders,
            max_wanders: config.max_wanders,
        }
    }

    /// Off-screen band enemies from `side` appear in
    pub fn entry_rect(&self, side: EntrySide) -> &Rect {
        match side {
            EntrySide::Left => &self.left,
            EntrySide::Right => &self.right,
        }
    }

    /// Spawn one enemy from a random side with a random wander count
    pub fn spawn<R: Rng + ?Sized>(
        &self,
        enemies: &mut EntityPool<Enemy>,
        paths: &PathBounds,
        rng: &mut R,
    ) -> Option<EntityHandle> {
        let side = EntrySide::random(rng);
        if enemies.is_exhausted() {
            log::debug!("Enemy pool exhausted, spawn skipped");
            return None;
        }
        let wanders = rng.random_range(self.min_wanders..=self.max_wanders);
        self.spawn_from(side, wanders, enemies, paths, rng)
    }

    /// Spawn one enemy from a given side with a given wander count
    pub fn spawn_from<R: Rng + ?Sized>(
        &self,
        side: EntrySide,
        wanders: u32,
        enemies: &mut EntityPool<Enemy>,
        paths: &PathBounds,
        rng: &mut R,
    ) -> Option<EntityHandle> {
        let slot = enemies.acquire_dormant()?;
        let start = random_point_in(self.entry_rect(side), rng);
        let schedule = PathSchedule::new(side, start, wanders, paths, rng);
        let handle = enemies.spawn(
            slot,
            start,
            Enemy {
                schedule: Some(schedule),
            },
        )?;

        log::debug!(
            "Enemy {} spawned {:?} at ({:.0}, {:.0}) with {} wanders",
            handle.index(),
            side,
            start.x,
            start.y,
            wanders
        );
        Some(handle)
    }
}
