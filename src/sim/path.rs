//! Enemy flight paths
//!
//! An enemy flies a chain of straight, fixed-duration segments: one in from
//! its off-screen spawn point, a random number of wanders between interior
//! waypoints, and one out past the edge it came from. The chain is an
//! explicit phase machine advanced once per tick, so cancelling a path is
//! just dropping the schedule.

use std::time::Duration;

use glam::Vec2;
use rand::Rng;

use super::pool::EntityPool;
use super::state::Enemy;
use crate::{Rect, SimConfig};

/// Edge an enemy entered from (and will leave through)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySide {
    Left,
    Right,
}

impl EntrySide {
    /// Fair coin flip
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            EntrySide::Left
        } else {
            EntrySide::Right
        }
    }
}

/// Where an enemy is along its path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPhase {
    /// Flying from the spawn point to the first waypoint
    Entering { wanders: u32 },
    /// Flying between interior waypoints; `remaining` more follow this one
    Wandering { remaining: u32 },
    /// Flying off-screen
    Exiting,
    /// Path finished; the enemy must be released
    Retired,
}

/// Result of advancing a schedule by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// Still inside the current segment
    Moving,
    /// A segment finished and the next one has started
    Turned,
    /// The exit segment finished
    Retired,
}

/// One timed linear interpolation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
    pub duration: Duration,
    pub elapsed: Duration,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2, duration: Duration) -> Self {
        Self {
            start,
            end,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Progress in [0, 1]
    pub fn fraction(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn position(&self) -> Vec2 {
        if self.is_complete() {
            return self.end;
        }
        self.start.lerp(self.end, self.fraction())
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Geometry and timing shared by every path
#[derive(Debug, Clone, PartialEq)]
pub struct PathBounds {
    /// Waypoints are drawn uniformly from here
    pub interior: Rect,
    pub playfield: Rect,
    pub exit_overshoot: f32,
    pub segment_duration: Duration,
}

impl PathBounds {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            interior: config.interior,
            playfield: config.playfield,
            exit_overshoot: config.exit_overshoot,
            segment_duration: config.segment_duration(),
        }
    }

    pub fn random_waypoint<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        random_point_in(&self.interior, rng)
    }

    /// Off-screen target on the entry side, at a random interior height
    pub fn exit_point<R: Rng + ?Sized>(&self, side: EntrySide, rng: &mut R) -> Vec2 {
        let x = match side {
            EntrySide::Left => self.playfield.min.x - self.exit_overshoot,
            EntrySide::Right => self.playfield.max.x + self.exit_overshoot,
        };
        let y = rng.random_range(self.interior.min.y..=self.interior.max.y);
        Vec2::new(x, y)
    }
}

/// Uniform point in a rectangle (degenerate rectangles yield their corner)
pub fn random_point_in<R: Rng + ?Sized>(rect: &Rect, rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(rect.min.x..=rect.max.x),
        rng.random_range(rect.min.y..=rect.max.y),
    )
}

/// In-progress motion plan for one enemy
#[derive(Debug, Clone, PartialEq)]
pub struct PathSchedule {
    pub phase: PathPhase,
    pub side: EntrySide,
    pub segment: Segment,
    /// Segments finished so far
    pub segments_completed: u32,
}

impl PathSchedule {
    /// Start a path at `spawn` heading for a random interior waypoint
    pub fn new<R: Rng + ?Sized>(
        side: EntrySide,
        spawn: Vec2,
        wanders: u32,
        bounds: &PathBounds,
        rng: &mut R,
    ) -> Self {
        let target = bounds.random_waypoint(rng);
        Self {
            phase: PathPhase::Entering { wanders },
            side,
            segment: Segment::new(spawn, target, bounds.segment_duration),
            segments_completed: 0,
        }
    }

    /// Segments left after the current one (including the exit)
    pub fn segments_remaining(&self) -> u32 {
        match self.phase {
            PathPhase::Entering { wanders } => wanders + 1,
            PathPhase::Wandering { remaining } => remaining + 1,
            PathPhase::Exiting | PathPhase::Retired => 0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.segment.position()
    }

    pub fn is_retired(&self) -> bool {
        self.phase == PathPhase::Retired
    }

    /// Move along the current segment, turning onto the next one when it ends
    ///
    /// At most one transition happens per call; time left over past the end
    /// of a segment is dropped.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        elapsed: Duration,
        bounds: &PathBounds,
        rng: &mut R,
    ) -> PathStep {
        if self.is_retired() {
            return PathStep::Retired;
        }

        self.segment.elapsed = (self.segment.elapsed + elapsed).min(self.segment.duration);
        if !self.segment.is_complete() {
            return PathStep::Moving;
        }

        self.segments_completed += 1;
        let from = self.segment.end;

        let (phase, target) = match self.phase {
            PathPhase::Entering { wanders: left } | PathPhase::Wandering { remaining: left } => {
                if left > 0 {
                    (
                        PathPhase::Wandering { remaining: left - 1 },
                        bounds.random_waypoint(rng),
                    )
                } else {
                    (PathPhase::Exiting, bounds.exit_point(self.side, rng))
                }
            }
            PathPhase::Exiting | PathPhase::Retired => {
                self.phase = PathPhase::Retired;
                return PathStep::Retired;
            }
        };

        self.phase = phase;
        self.segment = Segment::new(from, target, bounds.segment_duration);
        PathStep::Turned
    }
}

/// Advance every scheduled enemy, releasing those whose path has ended
pub fn advance_all<R: Rng + ?Sized>(
    enemies: &mut EntityPool<Enemy>,
    elapsed: Duration,
    bounds: &PathBounds,
    rng: &mut R,
) {
    enemies.for_each_alive(|handle, enemy| {
        let Some(schedule) = enemy.data.schedule.as_mut() else {
            return;
        };

        let step = schedule.advance(elapsed, bounds, rng);
        enemy.pos = schedule.position();

        if step == PathStep::Retired {
            log::debug!(
                "Enemy {} retired after {} segments at ({:.0}, {:.0})",
                handle.index(),
                schedule.segments_completed,
                enemy.pos.x,
                enemy.pos.y
            );
            enemy.data.schedule = None;
            enemy.kill();
        }
    });
}
