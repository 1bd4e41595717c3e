//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically.

use glam::Vec2;

use super::ai::update_enemies;
use super::collision::resolve_collisions;
use super::physics::{step_lasers, step_particles, step_powerups, step_projectiles};
use super::spawn::maybe_spawn;
use super::state::{GameEvent, GamePhase, GameState, ProjectileOwner};
use crate::consts::*;
use crate::palette;

/// Player bullet dimensions
const PLAYER_BULLET_SIZE: Vec2 = Vec2::new(20.0, 4.0);
/// Vertical bullet speeds for a single shot and a multishot volley
const SINGLE_SHOT: [f32; 1] = [0.0];
const MULTISHOT_VOLLEY: [f32; 3] = [-MULTISHOT_SPREAD_VY, 0.0, MULTISHOT_SPREAD_VY];

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Keyboard direction, each axis -1, 0 or 1
    pub direction: Vec2,
    /// Analog stick vector; overrides the keyboard when present
    pub stick: Option<Vec2>,
    /// Fire held (key, button or touch)
    pub fire: bool,
    /// Host wall-clock time (ms), used only for the shot cooldown
    pub now_ms: f64,
}

impl TickInput {
    /// Movement direction for this tick, at most unit length
    pub fn resolve_direction(&self) -> Vec2 {
        match self.stick {
            Some(stick) => stick.clamp_length_max(1.0),
            None => self.direction.normalize_or_zero(),
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    move_player(state, input.resolve_direction());
    if input.fire {
        try_fire(state, input.now_ms);
    }
    state.player.tick_timers();

    if let Some(kind) = maybe_spawn(state) {
        log::trace!("Spawned {:?} at tick {}", kind, state.time_ticks);
    }
    update_enemies(state);
    state.remove_enemies_where(|e| !e.is_alive());

    step_projectiles(state);
    step_lasers(state);
    step_powerups(state);

    resolve_collisions(state);
    state.prune();

    step_particles(state);

    if state.player.is_dead() {
        end_run(state);
    }
}

fn move_player(state: &mut GameState, direction: Vec2) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    player.vel = direction * tuning.player_speed;
    player.pos += player.vel;

    let max = Vec2::new(tuning.canvas_width, tuning.canvas_height) - player.size;
    player.pos = player.pos.clamp(Vec2::ZERO, max.max(Vec2::ZERO));
}

/// Fire if the wall-clock cooldown has elapsed. Returns true if a volley left.
///
/// The very first shot of a run is never gated.
pub fn try_fire(state: &mut GameState, now_ms: f64) -> bool {
    let cooldown = state.tuning.shoot_cooldown_ms;
    let ready = state
        .player
        .last_shot_ms
        .is_none_or(|last| now_ms - last > cooldown);
    if !ready {
        return false;
    }
    state.player.last_shot_ms = Some(now_ms);

    let player = &state.player;
    let muzzle = Vec2::new(
        player.pos.x + player.size.x,
        player.pos.y + player.size.y / 2.0 - PLAYER_BULLET_SIZE.y / 2.0,
    );
    let spreads: &[f32] = if player.multishot_active() {
        &MULTISHOT_VOLLEY
    } else {
        &SINGLE_SHOT
    };

    let speed = state.tuning.bullet_speed;
    let damage = state.tuning.bullet_damage;
    for &vy in spreads {
        state.spawn_projectile(
            ProjectileOwner::Player,
            muzzle,
            Vec2::new(speed, vy),
            PLAYER_BULLET_SIZE,
            damage,
            palette::NEON_CYAN,
            false,
        );
    }
    state.emit(GameEvent::PlayerShot);
    true
}

fn end_run(state: &mut GameState) {
    state.player.hp = 0;
    state.phase = GamePhase::GameOver;
    state.emit(GameEvent::GameOver);
    log::info!(
        "Game over at tick {} with score {}",
        state.time_ticks,
        state.score
    );
}
