//! Projectile ballistics, the laser charge/fire cycle, power-up drift and
//! cosmetic particles.

use glam::Vec2;

use super::rect::Rect;
use super::state::{GameState, LaserState};
use crate::consts::{LASER_FIRING_TICKS, OFFSCREEN_MARGIN, PARTICLE_DECAY, POWERUP_SPEED};

/// Horizontal drag applied to bombs each tick
const BOMB_DRAG: f32 = 0.99;
/// Downward acceleration applied to bombs each tick
const BOMB_GRAVITY: f32 = 0.05;
/// Power-ups bob while drifting left
const POWERUP_BOB_FREQ: f32 = 0.1;
const POWERUP_BOB_AMPLITUDE: f32 = 0.5;

/// Canvas grown by the off-screen margin; projectiles outside it are dropped
pub fn projectile_bounds(canvas_width: f32, canvas_height: f32) -> Rect {
    Rect::new(0.0, 0.0, canvas_width, canvas_height).expand(OFFSCREEN_MARGIN)
}

/// Move every projectile and drop the ones that left the expanded canvas
pub fn step_projectiles(state: &mut GameState) {
    for p in &mut state.projectiles {
        p.pos += p.vel;
        if p.is_bomb {
            p.vel.x *= BOMB_DRAG;
            p.vel.y += BOMB_GRAVITY;
        }
    }

    let bounds = projectile_bounds(state.tuning.canvas_width, state.tuning.canvas_height);
    state.remove_projectiles_where(|p| !p.rect().intersects(&bounds));
}

/// Re-centre lasers on their owners and advance the warning/firing timers
///
/// A laser whose owner is gone is dropped on the same tick.
pub fn step_lasers(state: &mut GameState) {
    let mut lasers = std::mem::take(&mut state.lasers);

    lasers.retain_mut(|laser| {
        let Some(owner) = state.enemy(laser.owner_id) else {
            return false;
        };
        laser.y = owner.pos.y + owner.size.y / 2.0;

        laser.timer = laser.timer.saturating_sub(1);
        match laser.state {
            LaserState::Warning if laser.timer == 0 => {
                laser.state = LaserState::Firing;
                laser.timer = LASER_FIRING_TICKS;
                true
            }
            LaserState::Warning => true,
            LaserState::Firing => laser.timer > 0,
        }
    });

    state.lasers = lasers;
}

/// Drift power-ups left and drop the ones past the left edge
pub fn step_powerups(state: &mut GameState) {
    let bob = (state.time_ticks as f32 * POWERUP_BOB_FREQ).sin() * POWERUP_BOB_AMPLITUDE;
    for p in &mut state.powerups {
        p.pos += Vec2::new(-POWERUP_SPEED, bob);
    }
    state.remove_powerups_where(|p| p.pos.x <= -OFFSCREEN_MARGIN);
}

/// Age particles; they carry no gameplay weight
pub fn step_particles(state: &mut GameState) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= PARTICLE_DECAY;
    }
    state.particles.retain(|p| p.life > 0.0);
}
