//! Collision detection and kill resolution
//!
//! Centre-anchored axis-aligned boxes, kill on touch. Projectiles are checked
//! first, in slot order, then the player. Liveness is re-read at every pair so
//! an enemy killed earlier in the pass is skipped by everything after it.

use glam::Vec2;

use super::events::{EventSink, GameEvent};
use super::state::{Explosion, GamePhase, GameState};
use crate::{Rect, SimConfig};

/// Half extents of each kind's hitbox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitboxes {
    pub player: Vec2,
    pub enemy: Vec2,
    pub projectile: Vec2,
}

impl Hitboxes {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            player: config.player_half_extent,
            enemy: config.enemy_half_extent,
            projectile: config.projectile_half_extent,
        }
    }
}

/// What one combat pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatReport {
    pub enemies_shot: u32,
    pub explosions_dropped: u32,
    pub player_destroyed: bool,
}

/// Resolve all projectile-enemy and player-enemy overlaps for this tick
pub fn resolve(state: &mut GameState, sink: &mut impl EventSink) -> CombatReport {
    let mut report = CombatReport::default();
    resolve_projectiles(state, sink, &mut report);
    resolve_player(state, sink, &mut report);
    report
}

fn resolve_projectiles(state: &mut GameState, sink: &mut impl EventSink, report: &mut CombatReport) {
    let hitboxes = state.hitboxes;

    for p in 0..state.projectiles.capacity() {
        let Some(shot) = state.projectiles.handle_at(p) else {
            continue;
        };

        for e in 0..state.enemies.capacity() {
            let (Some(shot_entity), Some(target)) =
                (state.projectiles.get(shot), state.enemies.handle_at(e))
            else {
                continue;
            };
            let Some(enemy) = state.enemies.get_mut(target) else {
                continue;
            };

            let shot_box = Rect::from_center(shot_entity.pos, hitboxes.projectile);
            let enemy_box = Rect::from_center(enemy.pos, hitboxes.enemy);
            if !shot_box.overlaps(&enemy_box) {
                continue;
            }

            // Drop the path before the slot can be recycled
            enemy.data.schedule = None;
            let at = enemy.pos;
            state.enemies.release(target);
            state.projectiles.release(shot);

            let lifetime = state.config.explosion_lifetime();
            if state
                .explosions
                .try_spawn(at, Explosion { remaining: lifetime })
                .is_none()
            {
                log::debug!("Explosion pool exhausted, effect dropped");
                report.explosions_dropped += 1;
            }

            state.score = state.score.saturating_add(state.config.score_per_kill);
            report.enemies_shot += 1;
            log::debug!(
                "Enemy {} shot at ({:.0}, {:.0}), score {}",
                target.index(),
                at.x,
                at.y,
                state.score
            );

            sink.emit(GameEvent::EnemyExploded { x: at.x, y: at.y });
            sink.emit(GameEvent::ScoreChanged { score: state.score });

            // This projectile is spent
            break;
        }
    }
}

fn resolve_player(state: &mut GameState, sink: &mut impl EventSink, report: &mut CombatReport) {
    if !state.player.alive {
        return;
    }
    let player_box = Rect::from_center(state.player.pos, state.hitboxes.player);
    let enemy_half = state.hitboxes.enemy;

    let mut rammed = None;
    state.enemies.for_each_alive(|handle, enemy| {
        if rammed.is_some() {
            return;
        }
        if player_box.overlaps(&Rect::from_center(enemy.pos, enemy_half)) {
            enemy.data.schedule = None;
            enemy.kill();
            rammed = Some((handle, enemy.pos));
        }
    });

    if let Some((handle, at)) = rammed {
        state.player.alive = false;
        state.phase = GamePhase::GameOver;
        report.player_destroyed = true;
        log::info!(
            "Player destroyed by enemy {} at ({:.0}, {:.0}), final score {}",
            handle.index(),
            at.x,
            at.y,
            state.score
        );
        sink.emit(GameEvent::PlayerDestroyed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(SimConfig::with_seed(1)).unwrap()
    }

    fn far_from_player() -> Vec2 {
        Vec2::new(100.0, 100.0)
    }

    #[test]
    fn test_projectile_kills_enemy() {
        let mut state = state();
        let enemy = state.place_test_enemy(far_from_player()).unwrap();
        let shot = state
            .place_test_projectile(far_from_player() + Vec2::new(5.0, 5.0), Vec2::ZERO)
            .unwrap();

        let mut events = Vec::new();
        let report = resolve(&mut state, &mut events);

        assert_eq!(report.enemies_shot, 1);
        assert!(!state.enemies.is_alive(enemy));
        assert!(!state.projectiles.is_alive(shot));
        assert_eq!(state.explosions.alive_count(), 1);
        assert_eq!(state.score, 10);
        assert_eq!(
            events,
            vec![
                GameEvent::EnemyExploded { x: 100.0, y: 100.0 },
                GameEvent::ScoreChanged { score: 10 },
            ]
        );

        let (_, explosion) = state.explosions.iter_alive().next().unwrap();
        assert_eq!(explosion.pos, far_from_player());
        assert_eq!(explosion.data.remaining, state.config.explosion_lifetime());
    }

    #[test]
    fn test_two_projectiles_one_enemy_scores_once() {
        let mut state = state();
        state.place_test_enemy(far_from_player()).unwrap();
        let first = state.place_test_projectile(far_from_player(), Vec2::ZERO).unwrap();
        let second = state
            .place_test_projectile(far_from_player() + Vec2::new(2.0, 0.0), Vec2::ZERO)
            .unwrap();

        let mut events = Vec::new();
        let report = resolve(&mut state, &mut events);

        assert_eq!(report.enemies_shot, 1);
        assert_eq!(state.score, 10);
        assert_eq!(state.explosions.alive_count(), 1);
        // Lowest slot wins; the other shot flies on
        assert!(!state.projectiles.is_alive(first));
        assert!(state.projectiles.is_alive(second));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyExploded { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_one_projectile_kills_only_one_enemy() {
        let mut state = state();
        let a = state.place_test_enemy(far_from_player()).unwrap();
        let b = state.place_test_enemy(far_from_player()).unwrap();
        state.place_test_projectile(far_from_player(), Vec2::ZERO).unwrap();

        resolve(&mut state, &mut ());

        assert!(!state.enemies.is_alive(a));
        assert!(state.enemies.is_alive(b));
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_miss_leaves_everything_alive() {
        let mut state = state();
        let enemy = state.place_test_enemy(far_from_player()).unwrap();
        let shot = state
            .place_test_projectile(far_from_player() + Vec2::new(40.0, 0.0), Vec2::ZERO)
            .unwrap();

        let report = resolve(&mut state, &mut ());

        assert_eq!(report, CombatReport::default());
        assert!(state.enemies.is_alive(enemy));
        assert!(state.projectiles.is_alive(shot));
    }

    #[test]
    fn test_player_rammed() {
        let mut state = state();
        let player = state.player.pos;
        let enemy = state.place_test_enemy(player + Vec2::new(10.0, 0.0)).unwrap();

        let mut events = Vec::new();
        let report = resolve(&mut state, &mut events);

        assert!(report.player_destroyed);
        assert!(!state.player.alive);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.enemies.is_alive(enemy));
        assert_eq!(state.score, 0);
        assert_eq!(state.explosions.alive_count(), 0);
        assert_eq!(events, vec![GameEvent::PlayerDestroyed]);
    }

    #[test]
    fn test_shot_enemy_cannot_also_ram_player() {
        let mut state = state();
        let player = state.player.pos;
        let enemy = state.place_test_enemy(player).unwrap();
        state.place_test_projectile(player, Vec2::ZERO).unwrap();

        let mut events = Vec::new();
        let report = resolve(&mut state, &mut events);

        assert_eq!(report.enemies_shot, 1);
        assert!(!report.player_destroyed);
        assert!(state.player.alive);
        assert!(!state.enemies.is_alive(enemy));
        assert!(!state.enemies.release(enemy));
        assert_eq!(state.enemies.alive_count(), 0);
        assert!(!events.contains(&GameEvent::PlayerDestroyed));
    }

    #[test]
    fn test_player_destroyed_reported_once() {
        let mut state = state();
        let player = state.player.pos;
        state.place_test_enemy(player).unwrap();
        state.place_test_enemy(player).unwrap();

        let mut events = Vec::new();
        resolve(&mut state, &mut events);
        resolve(&mut state, &mut events);

        assert_eq!(events, vec![GameEvent::PlayerDestroyed]);
        // The second enemy was not consumed by the collision
        assert_eq!(state.enemies.alive_count(), 1);
    }

    #[test]
    fn test_explosion_pool_exhaustion_still_scores() {
        let config = SimConfig {
            explosion_capacity: 0,
            ..SimConfig::with_seed(1)
        };
        let mut state = GameState::new(config).unwrap();
        state.place_test_enemy(far_from_player()).unwrap();
        state.place_test_projectile(far_from_player(), Vec2::ZERO).unwrap();

        let report = resolve(&mut state, &mut ());

        assert_eq!(report.enemies_shot, 1);
        assert_eq!(report.explosions_dropped, 1);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_huge_kill_score_saturates() {
        let config = SimConfig {
            score_per_kill: u64::MAX,
            ..SimConfig::with_seed(1)
        };
        let mut state = GameState::new(config).unwrap();
        let far = far_from_player() + Vec2::new(200.0, 0.0);
        for at in [far_from_player(), far] {
            state.place_test_enemy(at).unwrap();
            state.place_test_projectile(at, Vec2::ZERO).unwrap();
        }

        let mut events = Vec::new();
        let report = resolve(&mut state, &mut events);

        assert_eq!(report.enemies_shot, 2);
        assert_eq!(state.score, u64::MAX);
        assert_eq!(events.last(), Some(&GameEvent::ScoreChanged { score: u64::MAX }));
    }
}
