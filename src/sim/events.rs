//! Events the simulation reports to the presentation layer
//!
//! Delivered synchronously at the point of occurrence; the simulation never
//! waits on or inspects what the sink does with them.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Enemy destroyed by a projectile at this position
    EnemyExploded { x: f32, y: f32 },
    /// A projectile left the player's ship
    ShotFired,
    /// Player collided with an enemy (terminal for this run)
    PlayerDestroyed,
    /// Score after an increment
    ScoreChanged { score: u64 },
}

/// Receiver for [`GameEvent`]s
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Discard everything
impl EventSink for () {
    fn emit(&mut self, _event: GameEvent) {}
}
