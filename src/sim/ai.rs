//! Per-kind enemy behaviour
//!
//! Each [`EnemyKind`] has its own step function, selected by a `match` on the
//! kind tag. Step functions may move the enemy, change its state, fire
//! projectiles, raise lasers or spawn children. Children are appended after
//! the pass, so nothing spawned this tick is stepped until the next one.

use glam::Vec2;

use super::state::{Enemy, EnemyKind, EnemyState, GameEvent, GameState, ProjectileOwner};
use crate::consts::ENEMY_BULLET_SPEED;
use crate::palette;

/// Entry speed for Scouts, Fighters and Destroyers
const STANDARD_ENTRY_SPEED: f32 = 4.0;
/// Hover lane: W - HOVER_LANE_BASE - (id % HOVER_LANE_SPREAD)
const HOVER_LANE_BASE: f32 = 200.0;
const HOVER_LANE_SPREAD: u32 = 200;
const HOVER_BOB_AMPLITUDE: f32 = 2.0;
const HOVER_BOB_FREQ: f32 = 0.05;

const PILOT_ENTRY_SPEED: f32 = 3.0;
const PILOT_ENTRY_TICKS: u32 = 30;
const PILOT_RETREAT_VEL: Vec2 = Vec2::new(5.0, -2.0);

const KAMIKAZE_SPEED: f32 = 7.0;
const KAMIKAZE_PURSUIT: f32 = 0.05;
/// Horizontal distance ahead of the player at which the dive starts
const KAMIKAZE_TRIGGER_RANGE: f32 = 400.0;
const KAMIKAZE_CRASH_VEL: Vec2 = Vec2::new(-4.0, 0.0);
const KAMIKAZE_CRASH_GRAVITY: f32 = 0.2;
const KAMIKAZE_SPIN: f32 = 0.15;

/// Ejection velocity of the Paratrooper a Kamikaze leaves behind
pub const PARATROOPER_EJECT_VEL: Vec2 = Vec2::new(-3.0, -10.0);
const PARATROOPER_GRAVITY: f32 = 0.3;
const PARATROOPER_TERMINAL_VY: f32 = 2.0;
const PARATROOPER_DRAG: f32 = 0.98;
const PARATROOPER_SWAY: f32 = 0.5;
const PARATROOPER_SHOT_SPEED: f32 = 5.0;

/// How far past an edge an enemy may drift before it is despawned
const EXIT_MARGIN: f32 = 50.0;
const LEFT_EXIT_X: f32 = -100.0;

/// Step every living enemy once
pub fn update_enemies(state: &mut GameState) {
    let mut enemies = std::mem::take(&mut state.enemies);

    for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
        enemy.state_ticks += 1;
        match enemy.kind {
            EnemyKind::Scout | EnemyKind::Fighter | EnemyKind::Destroyer => {
                step_standard(enemy, state)
            }
            EnemyKind::Pilot => step_pilot(enemy, state),
            EnemyKind::Kamikaze => step_kamikaze(enemy, state),
            EnemyKind::Paratrooper => step_paratrooper(enemy, state),
        }
    }

    // Anything spawned during the pass landed in the (empty) world list
    enemies.append(&mut state.enemies);
    state.enemies = enemies;
}

/// True on the ticks this enemy is allowed to roll an attack
fn on_attack_cadence(enemy: &Enemy, tick: u64) -> bool {
    (tick + enemy.shoot_offset as u64).is_multiple_of(enemy.kind.shoot_period() as u64)
}

/// Hover x-position, staggered by id so enemies don't stack
fn hover_x(enemy: &Enemy, canvas_width: f32) -> f32 {
    canvas_width - HOVER_LANE_BASE - (enemy.id % HOVER_LANE_SPREAD) as f32
}

/// Scouts, Fighters and Destroyers: fly in, hover and bob, attack on cadence
fn step_standard(enemy: &mut Enemy, state: &mut GameState) {
    let tick = state.time_ticks;
    let target_x = hover_x(enemy, state.tuning.canvas_width);

    if enemy.pos.x > target_x {
        enemy.set_state(EnemyState::Entering);
        enemy.pos.x -= STANDARD_ENTRY_SPEED;
    } else {
        enemy.set_state(EnemyState::Hovering);
        let phase = (tick + enemy.id as u64) as f32 * HOVER_BOB_FREQ;
        enemy.pos.y += phase.sin() * HOVER_BOB_AMPLITUDE;
    }

    if enemy.state != EnemyState::Hovering || !on_attack_cadence(enemy, tick) {
        return;
    }

    match enemy.kind {
        EnemyKind::Scout => scout_attack(enemy, state),
        EnemyKind::Fighter => fighter_attack(enemy, state),
        EnemyKind::Destroyer => destroyer_attack(enemy, state),
        _ => {}
    }
}

/// One fast shot, aimed vertically at the player (70%)
fn scout_attack(enemy: &Enemy, state: &mut GameState) {
    if state.roll() <= 0.3 {
        return;
    }
    let vy = (state.player.pos.y - enemy.pos.y) * 0.01;
    state.spawn_projectile(
        ProjectileOwner::Enemy,
        Vec2::new(enemy.pos.x, enemy.pos.y + enemy.size.y / 2.0),
        Vec2::new(-ENEMY_BULLET_SPEED * 1.5, vy),
        Vec2::new(10.0, 10.0),
        10,
        palette::NEON_YELLOW,
        false,
    );
    state.emit(GameEvent::EnemyShot);
}

/// Three-way spread (60%)
fn fighter_attack(enemy: &Enemy, state: &mut GameState) {
    if state.roll() <= 0.4 {
        return;
    }
    let muzzle = Vec2::new(enemy.pos.x, enemy.pos.y + enemy.size.y / 2.0);
    for i in -1..=1 {
        state.spawn_projectile(
            ProjectileOwner::Enemy,
            muzzle,
            Vec2::new(-ENEMY_BULLET_SPEED, i as f32 * 2.0),
            Vec2::new(12.0, 8.0),
            15,
            palette::NEON_PINK,
            false,
        );
    }
    state.emit(GameEvent::EnemyShot);
}

/// Charge a laser that tracks this Destroyer (50%)
fn destroyer_attack(enemy: &Enemy, state: &mut GameState) {
    if state.roll() <= 0.5 {
        return;
    }
    let laser_id = state.spawn_laser(enemy.id, enemy.pos.y + enemy.size.y / 2.0);
    state.emit(GameEvent::LaserCharge);
    log::debug!("Destroyer {} charging laser {}", enemy.id, laser_id);
}

/// Pilot: drift out of the wreck, lob one bomb at the player, then flee
fn step_pilot(enemy: &mut Enemy, state: &mut GameState) {
    match enemy.state {
        EnemyState::Entering => {
            enemy.pos.x -= PILOT_ENTRY_SPEED;
            if enemy.state_ticks >= PILOT_ENTRY_TICKS {
                enemy.set_state(EnemyState::Attacking);
            }
        }
        EnemyState::Attacking => {
            let vy = (state.player.pos.y - enemy.pos.y) * 0.02;
            state.spawn_projectile(
                ProjectileOwner::Enemy,
                enemy.pos,
                Vec2::new(-4.0, vy),
                Vec2::new(15.0, 15.0),
                30,
                palette::WHITE,
                true,
            );
            state.emit(GameEvent::BombThrow);
            enemy.set_state(EnemyState::Retreating);
        }
        _ => {
            enemy.pos += PILOT_RETREAT_VEL;
            if enemy.pos.x > state.tuning.canvas_width + EXIT_MARGIN {
                enemy.despawn();
            }
        }
    }
}

/// Kamikaze: rush left while homing on the player's row, then crash
fn step_kamikaze(enemy: &mut Enemy, state: &mut GameState) {
    match enemy.state {
        EnemyState::Crashing => {
            enemy.vel.y += KAMIKAZE_CRASH_GRAVITY;
            enemy.pos += enemy.vel;
            enemy.rotation += KAMIKAZE_SPIN;
            if enemy.pos.y > state.tuning.canvas_height + EXIT_MARGIN {
                enemy.despawn();
            }
        }
        _ => {
            let player = state.player.pos;
            enemy.pos.x -= KAMIKAZE_SPEED;
            enemy.pos.y += (player.y - enemy.pos.y) * KAMIKAZE_PURSUIT;

            let ahead = enemy.pos.x - player.x;
            if ahead > 0.0 && ahead < KAMIKAZE_TRIGGER_RANGE {
                begin_crash(enemy, state);
            } else if enemy.pos.x < LEFT_EXIT_X {
                enemy.despawn();
            }
        }
    }
}

/// Switch a Kamikaze into its crash dive and eject its Paratrooper
fn begin_crash(enemy: &mut Enemy, state: &mut GameState) {
    enemy.set_state(EnemyState::Crashing);
    enemy.vel = KAMIKAZE_CRASH_VEL;
    state.emit(GameEvent::Crash);

    let trooper = state.spawn_enemy(EnemyKind::Paratrooper, enemy.pos);
    if let Some(p) = state.enemy_mut(trooper) {
        p.vel = PARATROOPER_EJECT_VEL;
    }
    log::debug!("Kamikaze {} crashing, ejected paratrooper {}", enemy.id, trooper);
}

/// Paratrooper: pop up, settle to a slow swaying fall, snipe on cadence
fn step_paratrooper(enemy: &mut Enemy, state: &mut GameState) {
    let tick = state.time_ticks;

    enemy.vel.y = (enemy.vel.y + PARATROOPER_GRAVITY).min(PARATROOPER_TERMINAL_VY);
    enemy.vel.x *= PARATROOPER_DRAG;
    let sway = ((tick + enemy.id as u64) as f32 * 0.1).sin() * PARATROOPER_SWAY;
    enemy.pos.x += enemy.vel.x + sway;
    enemy.pos.y += enemy.vel.y;

    if on_attack_cadence(enemy, tick) {
        let aim = (state.player.center() - enemy.center()).normalize_or_zero();
        state.spawn_projectile(
            ProjectileOwner::Enemy,
            enemy.center(),
            aim * PARATROOPER_SHOT_SPEED,
            Vec2::new(8.0, 8.0),
            5,
            palette::NEON_ORANGE,
            false,
        );
        state.emit(GameEvent::EnemyShot);
    }

    if enemy.pos.y > state.tuning.canvas_height + EXIT_MARGIN || enemy.pos.x < LEFT_EXIT_X {
        enemy.despawn();
    }
}
