//! Collision passes and damage resolution
//!
//! Every check is an open-interval AABB test. The passes run in a fixed
//! order: pickups, player bullets, enemy bullets, laser beams, ramming.
//! The player's immunity gate (invulnerability or shield) is re-checked
//! before every individual hit.
//!
//! A beam hit leaves invulnerability at zero, so a ram that is evaluated
//! after it in the same tick still lands.

use glam::Vec2;

use super::effects::apply_powerup;
use super::rect::Rect;
use super::spawn::roll_drop;
use super::state::{EnemyKind, GameEvent, GameState, ProjectileOwner};
use crate::consts::*;
use crate::palette;

/// Vibration per point of bullet damage (ms)
const BULLET_HAPTIC_MS_PER_DAMAGE: u32 = 20;
const BEAM_HAPTIC_MS: u32 = 50;
/// Beam buzz only fires on every Nth tick of contact
const BEAM_HAPTIC_EVERY: u64 = 10;
const RAM_HAPTIC_MS: u32 = 400;

/// Run all collision passes for this tick
pub fn resolve_collisions(state: &mut GameState) {
    player_vs_powerups(state);
    player_bullets_vs_enemies(state);
    enemy_bullets_vs_player(state);
    beams_vs_player(state);
    enemies_vs_player(state);
}

/// Pass 1: collect overlapping power-ups
pub fn player_vs_powerups(state: &mut GameState) {
    let player_rect = state.player.rect();
    let powerups = std::mem::take(&mut state.powerups);
    let mut kept = Vec::with_capacity(powerups.len());

    for powerup in powerups {
        if !player_rect.intersects(&powerup.rect()) {
            kept.push(powerup);
            continue;
        }
        if apply_powerup(state, powerup.kind) {
            state.emit(GameEvent::PowerUp);
            state.burst(powerup.rect().center(), palette::WHITE, 10, 2.0);
        }
    }

    kept.append(&mut state.powerups);
    state.powerups = kept;
}

/// Pass 2: player bullets damage enemies; kills score, eject pilots, roll drops
///
/// Each bullet hits at most one enemy. Enemies already destroyed this tick
/// are skipped so a kill is never credited twice.
pub fn player_bullets_vs_enemies(state: &mut GameState) {
    let mut ejected_pilots: Vec<Vec2> = Vec::new();

    for bi in 0..state.projectiles.len() {
        let bullet = &state.projectiles[bi];
        if bullet.owner != ProjectileOwner::Player || !bullet.is_live() {
            continue;
        }
        let bullet_rect = bullet.rect();
        let (damage, color) = (bullet.damage, bullet.color);

        let Some(ei) = state
            .enemies
            .iter()
            .position(|e| e.is_alive() && bullet_rect.intersects(&e.rect()))
        else {
            continue;
        };

        state.projectiles[bi].consumed = true;
        state.burst(bullet_rect.pos, color, 3, 3.0);

        let enemy = &mut state.enemies[ei];
        enemy.hp -= damage;
        if enemy.is_alive() {
            continue;
        }

        let (kind, pos, center) = (enemy.kind, enemy.pos, enemy.center());
        state.score += kind.stats().score;
        state.burst(center, palette::NEON_YELLOW, 20, 8.0);
        state.emit(GameEvent::Explosion);

        if kind == EnemyKind::Fighter {
            ejected_pilots.push(pos);
        }
        roll_drop(state, center);
    }

    for pos in ejected_pilots {
        state.spawn_enemy(EnemyKind::Pilot, pos);
    }
}

/// Pass 3: enemy bullets against the player's inset hitbox
///
/// A shield deflects the bullet instead of taking the hit.
pub fn enemy_bullets_vs_player(state: &mut GameState) {
    for i in 0..state.projectiles.len() {
        if state.player.invulnerable_ticks > 0 {
            return;
        }

        let bullet = &state.projectiles[i];
        if bullet.owner != ProjectileOwner::Enemy || !bullet.is_live() {
            continue;
        }
        if !bullet.rect().intersects(&state.player.hitbox()) {
            continue;
        }
        let (damage, pos) = (bullet.damage, bullet.pos);
        state.projectiles[i].consumed = true;

        if state.player.shield_active() {
            state.burst(pos, palette::NEON_CYAN, 8, 4.0);
            continue;
        }

        state.player.take_damage(damage);
        state.player.invulnerable_ticks = BULLET_INVULNERABILITY;
        state.burst(state.player.center(), palette::NEON_RED, 10, 5.0);
        state.emit(GameEvent::Explosion);
        state.emit(GameEvent::Haptic {
            millis: damage.max(0) as u32 * BULLET_HAPTIC_MS_PER_DAMAGE,
        });
    }
}

/// Pass 4: firing beams tick damage without granting invulnerability
pub fn beams_vs_player(state: &mut GameState) {
    let width = state.tuning.canvas_width;
    let beams: Vec<Rect> = state
        .lasers
        .iter()
        .filter(|l| l.is_firing())
        .map(|l| l.beam_rect(width))
        .collect();

    for beam in beams {
        if state.player.is_immune() {
            return;
        }
        if !beam.intersects(&state.player.rect()) {
            continue;
        }

        state.player.take_damage(LASER_DAMAGE_PER_TICK);
        state.player.invulnerable_ticks = 0;
        state.burst(state.player.center(), palette::NEON_RED, 2, 5.0);
        if state.time_ticks.is_multiple_of(BEAM_HAPTIC_EVERY) {
            state.emit(GameEvent::Haptic {
                millis: BEAM_HAPTIC_MS,
            });
        }
    }
}

/// Pass 5: enemy bodies ram the player; both sides take damage
///
/// Ram kills are not credited to the score.
pub fn enemies_vs_player(state: &mut GameState) {
    for i in 0..state.enemies.len() {
        if state.player.is_immune() {
            return;
        }

        let enemy = &state.enemies[i];
        if !enemy.is_alive() || !enemy.rect().intersects(&state.player.rect()) {
            continue;
        }
        let contact = (state.player.pos + enemy.pos) / 2.0;

        state.player.take_damage(RAM_DAMAGE_TO_PLAYER);
        state.player.invulnerable_ticks = RAM_INVULNERABILITY;
        state.enemies[i].hp -= RAM_DAMAGE_TO_ENEMY;

        state.burst(contact, palette::WHITE, 20, 10.0);
        state.emit(GameEvent::Crash);
        state.emit(GameEvent::Haptic {
            millis: RAM_HAPTIC_MS,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EnemyState, LaserState, PowerUpKind};
    use crate::tuning::Tuning;

    fn playing_state() -> GameState {
        let mut state = GameState::new(31337);
        state.start_run();
        state.player.pos = Vec2::new(100.0, 300.0);
        state
    }

    fn player_bullet(state: &mut GameState, pos: Vec2) {
        state.spawn_projectile(
            ProjectileOwner::Player,
            pos,
            Vec2::new(BULLET_SPEED, 0.0),
            Vec2::new(20.0, 4.0),
            BULLET_DAMAGE,
            palette::NEON_CYAN,
            false,
        );
    }

    fn enemy_bullet(state: &mut GameState, pos: Vec2, damage: i32) {
        state.spawn_projectile(
            ProjectileOwner::Enemy,
            pos,
            Vec2::new(-6.0, 0.0),
            Vec2::new(10.0, 10.0),
            damage,
            palette::NEON_YELLOW,
            false,
        );
    }

    /// A firing beam across the player's row, owned by a far-off destroyer
    fn firing_beam(state: &mut GameState, y: f32) {
        let owner = state.spawn_enemy(EnemyKind::Destroyer, Vec2::new(1000.0, 20.0));
        state.spawn_laser(owner, y);
        let laser = state.lasers.last_mut().unwrap();
        laser.state = LaserState::Firing;
        laser.timer = 40;
    }

    #[test]
    fn test_fighter_dies_on_fourth_hit_and_ejects_pilot() {
        let mut state = playing_state();
        let id = state.spawn_enemy(EnemyKind::Fighter, Vec2::new(600.0, 200.0));

        for hit in 1..=4 {
            player_bullet(&mut state, Vec2::new(610.0, 210.0));
            player_bullets_vs_enemies(&mut state);
            state.prune();
            if hit < 4 {
                assert_eq!(state.enemy(id).unwrap().hp, 40 - 10 * hit);
                assert_eq!(state.score, 0);
            }
        }

        assert!(state.enemy(id).is_none());
        assert_eq!(state.score, 300);
        let pilots: Vec<_> = state
            .enemies
            .iter()
            .filter(|e| e.kind == EnemyKind::Pilot)
            .collect();
        assert_eq!(pilots.len(), 1);
        assert_eq!(pilots[0].pos, Vec2::new(600.0, 200.0));
        assert_eq!(pilots[0].state, EnemyState::Entering);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_bullet_hits_only_one_enemy() {
        let mut state = playing_state();
        state.spawn_enemy(EnemyKind::Scout, Vec2::new(600.0, 200.0));
        state.spawn_enemy(EnemyKind::Scout, Vec2::new(600.0, 200.0));
        player_bullet(&mut state, Vec2::new(610.0, 210.0));
        player_bullets_vs_enemies(&mut state);
        assert_eq!(state.enemies[0].hp, 10);
        assert_eq!(state.enemies[1].hp, 20);
    }

    #[test]
    fn test_dead_enemy_not_scored_twice() {
        let mut state = playing_state();
        state.spawn_enemy(EnemyKind::Pilot, Vec2::new(600.0, 200.0));
        player_bullet(&mut state, Vec2::new(600.0, 205.0));
        player_bullet(&mut state, Vec2::new(600.0, 205.0));
        player_bullets_vs_enemies(&mut state);
        assert_eq!(state.score, 500);
        // Second bullet found nothing alive to hit
        assert!(!state.projectiles[1].consumed);
    }

    #[test]
    fn test_enemy_bullet_damages_and_grants_invulnerability() {
        let mut state = playing_state();
        enemy_bullet(&mut state, Vec2::new(110.0, 310.0), 10);
        enemy_bullet(&mut state, Vec2::new(112.0, 312.0), 10);
        enemy_bullets_vs_player(&mut state);

        assert_eq!(state.player.hp, 90);
        assert_eq!(state.player.invulnerable_ticks, 30);
        assert!(state.projectiles[0].consumed);
        // Second bullet blocked by the fresh invulnerability window
        assert!(!state.projectiles[1].consumed);
        assert!(state.events.contains(&GameEvent::Haptic { millis: 200 }));
    }

    #[test]
    fn test_enemy_bullet_misses_inset_hitbox() {
        let mut state = playing_state();
        // Overlaps the ship's outer rect but not the 5px-inset hitbox
        enemy_bullet(&mut state, Vec2::new(91.0, 300.0), 10);
        enemy_bullets_vs_player(&mut state);
        assert_eq!(state.player.hp, 100);
        assert!(!state.projectiles[0].consumed);
    }

    #[test]
    fn test_shield_deflects_bullets() {
        let mut state = playing_state();
        state.player.shield_ticks = 300;
        for _ in 0..5 {
            enemy_bullet(&mut state, Vec2::new(110.0, 310.0), 15);
        }
        enemy_bullets_vs_player(&mut state);
        assert_eq!(state.player.hp, 100);
        assert_eq!(state.player.invulnerable_ticks, 0);
        assert!(state.projectiles.iter().all(|p| p.consumed));
    }

    #[test]
    fn test_invulnerable_player_ignores_bullets() {
        let mut state = playing_state();
        state.player.invulnerable_ticks = 5;
        state.player.shield_ticks = 100;
        enemy_bullet(&mut state, Vec2::new(110.0, 310.0), 10);
        enemy_bullets_vs_player(&mut state);
        assert_eq!(state.player.hp, 100);
        // Neither hit nor deflected
        assert!(!state.projectiles[0].consumed);
    }

    #[test]
    fn test_beam_damage_each_tick_without_invulnerability() {
        let mut state = playing_state();
        firing_beam(&mut state, 315.0);
        beams_vs_player(&mut state);
        beams_vs_player(&mut state);
        assert_eq!(state.player.hp, 96);
        assert_eq!(state.player.invulnerable_ticks, 0);
    }

    #[test]
    fn test_warning_laser_is_harmless() {
        let mut state = playing_state();
        let owner = state.spawn_enemy(EnemyKind::Destroyer, Vec2::new(1000.0, 20.0));
        state.spawn_laser(owner, 315.0);
        beams_vs_player(&mut state);
        assert_eq!(state.player.hp, 100);
    }

    #[test]
    fn test_beam_blocked_by_shield() {
        let mut state = playing_state();
        state.player.shield_ticks = 10;
        firing_beam(&mut state, 315.0);
        beams_vs_player(&mut state);
        assert_eq!(state.player.hp, 100);
    }

    #[test]
    fn test_beam_misses_other_rows() {
        let mut state = playing_state();
        // Beam spans 340..360, player spans 300..330
        firing_beam(&mut state, 350.0);
        beams_vs_player(&mut state);
        assert_eq!(state.player.hp, 100);
    }

    #[test]
    fn test_ram_damages_both_sides() {
        let mut state = playing_state();
        let id = state.spawn_enemy(EnemyKind::Destroyer, Vec2::new(120.0, 290.0));
        enemies_vs_player(&mut state);
        assert_eq!(state.player.hp, 80);
        assert_eq!(state.player.invulnerable_ticks, 60);
        assert_eq!(state.enemy(id).unwrap().hp, 100);
        assert!(state.events.contains(&GameEvent::Crash));
    }

    #[test]
    fn test_ram_kill_not_scored() {
        let mut state = playing_state();
        state.spawn_enemy(EnemyKind::Scout, Vec2::new(120.0, 290.0));
        enemies_vs_player(&mut state);
        assert!(!state.enemies[0].is_alive());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_ram_blocked_by_shield() {
        let mut state = playing_state();
        state.player.shield_ticks = 300;
        let id = state.spawn_enemy(EnemyKind::Scout, Vec2::new(120.0, 290.0));
        enemies_vs_player(&mut state);
        assert_eq!(state.player.hp, 100);
        assert_eq!(state.player.invulnerable_ticks, 0);
        assert_eq!(state.enemy(id).unwrap().hp, 20);
        assert!(!state.events.contains(&GameEvent::Crash));
    }

    #[test]
    fn test_only_one_ram_per_window() {
        let mut state = playing_state();
        state.spawn_enemy(EnemyKind::Scout, Vec2::new(120.0, 290.0));
        state.spawn_enemy(EnemyKind::Scout, Vec2::new(110.0, 300.0));
        enemies_vs_player(&mut state);
        assert_eq!(state.player.hp, 80);
        assert!(state.enemies[1].is_alive());
        assert_eq!(state.enemies[1].hp, 20);
    }

    /// A beam hit leaves the window open, so a ram later in the same tick
    /// still lands.
    #[test]
    fn test_beam_hit_does_not_shield_same_tick_ram() {
        let mut state = playing_state();
        firing_beam(&mut state, 315.0);
        state.spawn_enemy(EnemyKind::Scout, Vec2::new(120.0, 290.0));
        resolve_collisions(&mut state);
        assert_eq!(state.player.hp, 100 - 2 - 20);
        assert_eq!(state.player.invulnerable_ticks, 60);
    }

    #[test]
    fn test_bullet_hit_blocks_same_tick_beam_and_ram() {
        let mut state = playing_state();
        enemy_bullet(&mut state, Vec2::new(110.0, 310.0), 10);
        firing_beam(&mut state, 315.0);
        state.spawn_enemy(EnemyKind::Scout, Vec2::new(120.0, 290.0));
        resolve_collisions(&mut state);
        assert_eq!(state.player.hp, 90);
        assert_eq!(state.player.invulnerable_ticks, 30);
    }

    #[test]
    fn test_heart_pickup_at_full_hp_still_consumed() {
        let mut state = playing_state();
        state.spawn_powerup(PowerUpKind::Heart, state.player.center());
        player_vs_powerups(&mut state);
        assert_eq!(state.player.hp, 100);
        assert!(state.powerups.is_empty());
        assert!(!state.events.contains(&GameEvent::PowerUp));
    }

    #[test]
    fn test_shield_pickup() {
        let mut state = playing_state();
        state.spawn_powerup(PowerUpKind::Shield, state.player.center());
        state.spawn_powerup(PowerUpKind::Multishot, Vec2::new(900.0, 100.0));
        player_vs_powerups(&mut state);
        assert_eq!(state.player.shield_ticks, 300);
        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.powerups[0].kind, PowerUpKind::Multishot);
        assert!(state.events.contains(&GameEvent::PowerUp));
    }

    #[test]
    fn test_bomb_pickup_clears_field() {
        let tuning = Tuning {
            bomb_kill_chance: 1.0,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(31337, tuning);
        state.start_run();
        state.player.pos = Vec2::new(100.0, 300.0);
        state.spawn_enemy(EnemyKind::Fighter, Vec2::new(800.0, 100.0));
        state.spawn_enemy(EnemyKind::Scout, Vec2::new(800.0, 400.0));
        state.spawn_powerup(PowerUpKind::Bomb, state.player.center());

        player_vs_powerups(&mut state);

        assert!(state.powerups.is_empty());
        assert!(state.enemies.iter().all(|e| !e.is_alive()));
        assert!(state.enemies.iter().all(|e| e.kind != EnemyKind::Pilot));
        assert_eq!(state.score, 400);
        assert!(state.events.contains(&GameEvent::PowerUp));
        assert!(state.events.contains(&GameEvent::ScreenFlash));
        assert!(state.events.contains(&GameEvent::Haptic { millis: 500 }));
    }

    #[test]
    fn test_kill_can_drop_powerup() {
        let tuning = Tuning {
            drop_chance_heart: 1.0,
            drop_chance_shield: 0.0,
            drop_chance_multishot: 0.0,
            drop_chance_bomb: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(8, tuning);
        state.start_run();
        state.spawn_enemy(EnemyKind::Pilot, Vec2::new(600.0, 200.0));
        player_bullet(&mut state, Vec2::new(600.0, 205.0));
        player_bullets_vs_enemies(&mut state);
        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.powerups[0].kind, PowerUpKind::Heart);
        assert_eq!(state.powerups[0].rect().center(), Vec2::new(610.0, 210.0));
    }
}
