//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (timers count ticks; only the shot cooldown reads the
//!   host clock, passed in through `TickInput`)
//! - Seeded RNG only, drawn in a fixed order
//! - Stable iteration order (insertion order per entity type)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod collision;
pub mod effects;
pub mod physics;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use rect::{Rect, rect_intersect};
pub use state::{
    Enemy, EnemyKind, EnemyState, EntityId, GameEvent, GamePhase, GameState, Hud, Laser,
    LaserState, Particle, Player, PowerUp, PowerUpKind, Projectile, ProjectileOwner,
};
pub use tick::{TickInput, tick};
