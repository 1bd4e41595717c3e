//! Enemy spawn cadence and power-up drops
//!
//! Both rolls are order-sensitive: the spawn y is drawn before the type roll,
//! and drop bands are laid out Bomb, Shield, Multishot, Heart. Reordering them
//! changes outcomes under a fixed seed even when the probabilities match.

use glam::Vec2;

use super::state::{EnemyKind, GameState, PowerUpKind};
use crate::tuning::Tuning;

/// Horizontal offset past the right edge where new enemies appear
const SPAWN_OFFSCREEN_X: f32 = 50.0;
/// Vertical margin kept clear at the top and bottom when spawning
const SPAWN_MARGIN_Y: f32 = 50.0;

/// Ticks between spawns at the given score
pub fn spawn_interval(score: u64, tuning: &Tuning) -> u64 {
    tuning
        .spawn_rate_base
        .saturating_sub(score / tuning.spawn_score_divisor)
        .max(tuning.spawn_rate_min)
}

/// Pick an enemy kind from one roll in [0, 1)
///
/// Checks run Scout, Fighter, Kamikaze, Destroyer; every later match
/// overwrites the earlier one.
pub fn pick_enemy_kind(score: u64, roll: f32) -> EnemyKind {
    let mut kind = EnemyKind::Scout;
    if score >= 500 && roll > 0.6 {
        kind = EnemyKind::Fighter;
    }
    if score >= 1000 && roll > 0.8 {
        kind = EnemyKind::Kamikaze;
    }
    if score >= 1500 && roll > 0.9 {
        kind = EnemyKind::Destroyer;
    }
    kind
}

/// Map a drop roll in [0, 1) onto the cumulative drop bands
pub fn pick_drop(roll: f32, tuning: &Tuning) -> Option<PowerUpKind> {
    let bands = [
        (PowerUpKind::Bomb, tuning.drop_chance_bomb),
        (PowerUpKind::Shield, tuning.drop_chance_shield),
        (PowerUpKind::Multishot, tuning.drop_chance_multishot),
        (PowerUpKind::Heart, tuning.drop_chance_heart),
    ];

    let mut upper = 0.0;
    for (kind, chance) in bands {
        upper += chance;
        if roll < upper {
            return Some(kind);
        }
    }
    None
}

/// Spawn a new enemy off the right edge if this tick is on the cadence
pub fn maybe_spawn(state: &mut GameState) -> Option<EnemyKind> {
    let interval = spawn_interval(state.score, &state.tuning);
    if !state.time_ticks.is_multiple_of(interval) {
        return None;
    }

    let height = state.tuning.canvas_height;
    let y = state.roll() * (height - SPAWN_MARGIN_Y * 2.0) + SPAWN_MARGIN_Y;
    let kind = pick_enemy_kind(state.score, state.roll());
    let x = state.tuning.canvas_width + SPAWN_OFFSCREEN_X;

    state.spawn_enemy(kind, Vec2::new(x, y));
    Some(kind)
}

/// Roll for a power-up drop at a destroyed enemy's centre
pub fn roll_drop(state: &mut GameState, center: Vec2) -> Option<PowerUpKind> {
    let roll = state.roll();
    let kind = pick_drop(roll, &state.tuning)?;
    state.spawn_powerup(kind, center);
    Some(kind)
}
