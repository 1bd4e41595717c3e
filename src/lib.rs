//! Neon Barrage - side-scrolling arcade shooter core
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (entities, enemy AI, collisions, power-ups)
//! - `tuning`: Data-driven game balance
//! - `autopilot`: Scripted pilot for headless runs
//!
//! Rendering, audio and menus live with the host. They read the
//! [`sim::GameState`] snapshot, the [`sim::Hud`] and the drained
//! [`sim::GameEvent`] queue after every tick.

pub mod autopilot;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// These are the stock balance values. [`Tuning::default`] mirrors them.
pub mod consts {
    /// Simulation rate the tick-counted timers are expressed in
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Logical canvas dimensions
    pub const CANVAS_WIDTH: f32 = 1200.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    /// Margin beyond the canvas where projectiles are still kept alive
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 8.0;
    pub const PLAYER_HP: i32 = 100;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const PLAYER_START_X: f32 = 100.0;
    /// Player hitbox inset against enemy bullets (each side)
    pub const PLAYER_HITBOX_INSET: f32 = 5.0;

    /// Player bullets
    pub const BULLET_SPEED: f32 = 15.0;
    pub const BULLET_DAMAGE: i32 = 10;
    /// Wall-clock gap between shots (ms)
    pub const SHOOT_COOLDOWN_MS: f64 = 120.0;
    /// Vertical speed of the angled multishot siblings
    pub const MULTISHOT_SPREAD_VY: f32 = 2.0;

    /// Enemy bullets
    pub const ENEMY_BULLET_SPEED: f32 = 6.0;

    /// Power-ups
    pub const HEART_VALUE: i32 = 20;
    pub const POWERUP_SPEED: f32 = 3.0;
    pub const POWERUP_SIZE: f32 = 20.0;
    /// Durations in ticks
    pub const SHIELD_DURATION: u32 = 300;
    pub const MULTISHOT_DURATION: u32 = 600;
    /// Chance for each living enemy to be wiped by a Bomb pickup
    pub const BOMB_KILL_CHANCE: f32 = 0.75;

    /// Drop chances (cumulative bands, checked Bomb first)
    pub const DROP_CHANCE_HEART: f32 = 0.15;
    pub const DROP_CHANCE_SHIELD: f32 = 0.03;
    pub const DROP_CHANCE_MULTISHOT: f32 = 0.03;
    pub const DROP_CHANCE_BOMB: f32 = 0.02;

    /// Spawn cadence: max(SPAWN_RATE_MIN, SPAWN_RATE_BASE - score / SPAWN_SCORE_DIVISOR)
    pub const SPAWN_RATE_BASE: u64 = 100;
    pub const SPAWN_RATE_MIN: u64 = 30;
    pub const SPAWN_SCORE_DIVISOR: u64 = 50;

    /// Damage model
    pub const BULLET_INVULNERABILITY: u32 = 30;
    pub const RAM_INVULNERABILITY: u32 = 60;
    pub const LASER_DAMAGE_PER_TICK: i32 = 2;
    pub const RAM_DAMAGE_TO_PLAYER: i32 = 20;
    pub const RAM_DAMAGE_TO_ENEMY: i32 = 50;

    /// Laser cycle
    pub const LASER_WARNING_TICKS: u32 = 60;
    pub const LASER_FIRING_TICKS: u32 = 40;
    pub const LASER_THICKNESS: f32 = 20.0;

    /// Particles (cosmetic only)
    pub const MAX_PARTICLES: usize = 512;
    pub const PARTICLE_DECAY: f32 = 0.05;
}

/// Neon palette used for particle and projectile colours (0xRRGGBB)
pub mod palette {
    pub const NEON_PINK: u32 = 0xff00ff;
    pub const NEON_CYAN: u32 = 0x00ffff;
    pub const NEON_YELLOW: u32 = 0xfcee0a;
    pub const NEON_GREEN: u32 = 0x0aff0a;
    pub const NEON_RED: u32 = 0xff0033;
    pub const NEON_ORANGE: u32 = 0xffaa00;
    pub const WHITE: u32 = 0xffffff;
    pub const DESTROYER_RED: u32 = 0xff0000;
}

/// Whole seconds remaining for a tick-counted timer (rounded up, for display)
#[inline]
pub fn ticks_to_display_seconds(ticks: u32) -> u32 {
    ticks.div_ceil(consts::TICKS_PER_SECOND)
}
