//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied elapsed time only
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering, audio or input dependencies

pub mod combat;
pub mod events;
pub mod fire;
pub mod path;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;

pub use combat::{CombatReport, Hitboxes};
pub use events::{EventSink, GameEvent};
pub use fire::FireController;
pub use path::{EntrySide, PathBounds, PathPhase, PathSchedule, PathStep, Segment};
pub use pool::{Entity, EntityHandle, EntityPool};
pub use spawn::{SpawnController, SpawnTimer};
pub use state::{Enemy, Explosion, GamePhase, GameState, Player, Projectile};
pub use tick::{TickInput, tick};
