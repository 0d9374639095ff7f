//! Rate-limited player fire

use std::time::Duration;

use glam::Vec2;

use super::events::{EventSink, GameEvent};
use super::state::{GameState, Projectile};

/// Shot cooldown tracked as the earliest time the next shot may leave
#[derive(Debug, Clone)]
pub struct FireController {
    cooldown: Duration,
    next_shot_at: Duration,
}

impl FireController {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            next_shot_at: Duration::ZERO,
        }
    }

    pub fn ready(&self, now: Duration) -> bool {
        now >= self.next_shot_at
    }
}

/// Fire one projectile if the trigger is held and the cooldown has elapsed
///
/// The cooldown restarts only when a projectile actually spawns; with the
/// pool exhausted the next tick tries again.
pub fn try_fire(state: &mut GameState, held: bool, sink: &mut impl EventSink) -> bool {
    if !held || !state.player.alive || !state.fire.ready(state.clock) {
        return false;
    }

    let muzzle = state.player.pos + Vec2::new(0.0, state.config.muzzle_offset);
    let vel = Vec2::new(0.0, -state.config.projectile_speed);
    if state.projectiles.try_spawn(muzzle, Projectile { vel }).is_none() {
        log::debug!("Projectile pool exhausted, shot skipped");
        return false;
    }

    state.fire.next_shot_at = state.clock + state.fire.cooldown;
    sink.emit(GameEvent::ShotFired);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimConfig;

    fn state() -> GameState {
        GameState::new(SimConfig::with_seed(3)).unwrap()
    }

    #[test]
    fn test_first_shot_is_immediate() {
        let mut state = state();
        let mut events = Vec::new();
        assert!(try_fire(&mut state, true, &mut events));
        assert_eq!(events, vec![GameEvent::ShotFired]);

        let (_, shot) = state.projectiles.iter_alive().next().unwrap();
        assert_eq!(shot.pos, state.player.pos + Vec2::new(0.0, 10.0));
        assert_eq!(shot.data.vel, Vec2::new(0.0, -400.0));
    }

    #[test]
    fn test_not_held_does_nothing() {
        let mut state = state();
        assert!(!try_fire(&mut state, false, &mut ()));
        assert_eq!(state.projectiles.alive_count(), 0);
    }

    #[test]
    fn test_cooldown_blocks_until_elapsed() {
        let mut state = state();
        assert!(try_fire(&mut state, true, &mut ()));

        state.clock += Duration::from_millis(199);
        assert!(!try_fire(&mut state, true, &mut ()));

        state.clock += Duration::from_millis(1);
        assert!(try_fire(&mut state, true, &mut ()));
        assert_eq!(state.projectiles.alive_count(), 2);
    }

    #[test]
    fn test_exhausted_pool_keeps_cooldown_ready() {
        let config = SimConfig {
            projectile_capacity: 1,
            ..SimConfig::with_seed(3)
        };
        let mut state = GameState::new(config).unwrap();
        assert!(try_fire(&mut state, true, &mut ()));

        state.clock += Duration::from_millis(300);
        let mut events = Vec::new();
        assert!(!try_fire(&mut state, true, &mut events));
        assert!(events.is_empty());
        assert!(state.fire.ready(state.clock));

        // Slot frees up: fires on the very next attempt
        let (handle, _) = state.projectiles.iter_alive().next().unwrap();
        state.projectiles.release(handle);
        state.clock += Duration::from_millis(16);
        assert!(try_fire(&mut state, true, &mut ()));
    }

    #[test]
    fn test_dead_player_cannot_fire() {
        let mut state = state();
        state.player.alive = false;
        assert!(!try_fire(&mut state, true, &mut ()));
    }
}
