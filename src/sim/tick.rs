//! Per-frame simulation tick
//!
//! Order within a tick: player motion, projectile motion and culling,
//! explosion aging, firing, combat, enemy paths. Combat runs before paths so
//! an enemy killed this tick never moves again.

use std::time::Duration;

use glam::Vec2;

use super::combat;
use super::events::EventSink;
use super::fire;
use super::path;
use super::state::GameState;
use crate::{Rect, wrap_coord};

/// Input held during a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire button held
    pub fire: bool,
}

impl TickInput {
    /// Unit-speed direction; left beats right and up beats down
    pub fn direction(&self) -> Vec2 {
        let x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        let y = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }
}

/// Advance the game state by `elapsed`
pub fn tick(state: &mut GameState, input: &TickInput, elapsed: Duration, sink: &mut impl EventSink) {
    state.clock += elapsed;
    let dt = elapsed.as_secs_f32();

    move_player(state, input, dt);
    move_projectiles(state, dt);
    age_explosions(state, elapsed);

    fire::try_fire(state, input.fire, sink);
    combat::resolve(state, sink);
    path::advance_all(&mut state.enemies, elapsed, &state.paths, &mut state.rng);
}

/// Constant-speed movement with wraparound at the playfield edges
fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    if !state.player.alive {
        return;
    }
    let field = state.config.playfield;
    let pos = state.player.pos + input.direction() * state.config.player_speed * dt;
    state.player.pos = Vec2::new(
        wrap_coord(pos.x, field.min.x, field.max.x),
        wrap_coord(pos.y, field.min.y, field.max.y),
    );
}

/// Straight-line flight; a shot is released once its hitbox is fully off-screen
fn move_projectiles(state: &mut GameState, dt: f32) {
    let field = state.config.playfield;
    let half = state.hitboxes.projectile;
    state.projectiles.for_each_alive(|_, shot| {
        shot.pos += shot.data.vel * dt;
        if !Rect::from_center(shot.pos, half).overlaps(&field) {
            shot.kill();
        }
    });
}

/// Count down one-shot effects and free finished ones
fn age_explosions(state: &mut GameState, elapsed: Duration) {
    state.explosions.for_each_alive(|_, explosion| {
        explosion.data.remaining = explosion.data.remaining.saturating_sub(elapsed);
        if explosion.data.remaining.is_zero() {
            explosion.kill();
        }
    });
}
