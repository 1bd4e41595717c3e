//! Power-up effects on the player and the field

use super::state::{GameEvent, GameState, PowerUpKind};
use crate::palette;

/// Haptic pulse length for a Bomb detonation (ms)
const BOMB_HAPTIC_MS: u32 = 500;

/// Apply a collected power-up
///
/// Returns false when the pickup had nothing to do (a Heart at full health),
/// so the caller can skip pickup feedback. The pickup is consumed either way.
pub fn apply_powerup(state: &mut GameState, kind: PowerUpKind) -> bool {
    match kind {
        PowerUpKind::Heart => {
            let amount = state.tuning.heart_value;
            state.player.heal(amount)
        }
        PowerUpKind::Shield => {
            state.player.shield_ticks = state.tuning.shield_duration;
            true
        }
        PowerUpKind::Multishot => {
            state.player.multishot_ticks = state.tuning.multishot_duration;
            true
        }
        PowerUpKind::Bomb => {
            detonate_bomb(state);
            true
        }
    }
}

/// Screen-clearing bomb: each living enemy independently rolls to be destroyed
///
/// Returns the number of enemies destroyed.
pub fn detonate_bomb(state: &mut GameState) -> usize {
    state.emit(GameEvent::ScreenFlash);
    state.emit(GameEvent::Haptic {
        millis: BOMB_HAPTIC_MS,
    });

    let chance = state.tuning.bomb_kill_chance;
    let mut destroyed = 0;
    for i in 0..state.enemies.len() {
        if !state.enemies[i].is_alive() {
            continue;
        }
        if state.roll() >= chance {
            continue;
        }

        let enemy = &mut state.enemies[i];
        enemy.hp = 0;
        let center = enemy.center();
        let score = enemy.kind.stats().score;

        state.score += score;
        state.burst(center, palette::NEON_YELLOW, 20, 8.0);
        destroyed += 1;
    }

    if destroyed > 0 {
        state.emit(GameEvent::Explosion);
    }
    log::debug!("Bomb destroyed {} enemies", destroyed);
    destroyed
}
