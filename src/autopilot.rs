//! Scripted pilot for headless runs and demos
//!
//! Reads the snapshot and produces the same `TickInput` a human would: dodge
//! incoming fire and beams first, otherwise line up with the nearest enemy,
//! and keep the trigger held while anything is on screen.

use glam::Vec2;

use crate::sim::{GameState, ProjectileOwner, TickInput};

/// How far ahead (px) an incoming bullet counts as a threat
const THREAT_LOOKAHEAD: f32 = 260.0;
/// Vertical slack around the ship when judging threats (px)
const THREAT_MARGIN: f32 = 24.0;
/// Horizontal post the pilot drifts back to
const HOME_X: f32 = 140.0;
/// Dead zone for aligning with a target (px)
const AIM_TOLERANCE: f32 = 6.0;
/// Pick-ups closer than this are worth a detour (px)
const PICKUP_RANGE: f32 = 220.0;

/// Plan this tick's input from the current snapshot
pub fn plan(state: &GameState, now_ms: f64) -> TickInput {
    let player = &state.player;
    let center = player.center();
    let band = (
        player.pos.y - THREAT_MARGIN,
        player.pos.y + player.size.y + THREAT_MARGIN,
    );

    let dy = match threat_y(state, band) {
        // Move away from the threat, but turn back near the edges
        Some(y) => {
            let away = if y > center.y { -1.0 } else { 1.0 };
            let room_up = player.pos.y > player.size.y;
            let room_down = player.pos.y + player.size.y * 2.0 < state.tuning.canvas_height;
            match (away < 0.0, room_up, room_down) {
                (true, false, _) => 1.0,
                (false, _, false) => -1.0,
                _ => away,
            }
        }
        None => target_y(state).map_or(0.0, |y| axis_toward(center.y, y)),
    };
    let dx = axis_toward(player.pos.x, HOME_X);

    TickInput {
        direction: Vec2::new(dx, dy),
        stick: None,
        fire: state.enemies.iter().any(|e| e.is_alive()),
        now_ms,
    }
}

fn axis_toward(from: f32, to: f32) -> f32 {
    if to - from > AIM_TOLERANCE {
        1.0
    } else if from - to > AIM_TOLERANCE {
        -1.0
    } else {
        0.0
    }
}

/// Y of the most pressing threat overlapping the ship's band, if any
fn threat_y(state: &GameState, (top, bottom): (f32, f32)) -> Option<f32> {
    let px = state.player.pos.x;
    let width = state.tuning.canvas_width;

    let beam = state
        .lasers
        .iter()
        .map(|l| l.beam_rect(width))
        .find(|r| r.pos.y < bottom && r.pos.y + r.size.y > top)
        .map(|r| r.center().y);
    if beam.is_some() {
        return beam;
    }

    state
        .projectiles
        .iter()
        .filter(|p| p.owner == ProjectileOwner::Enemy && p.is_live())
        .filter(|p| {
            let ahead = p.pos.x + p.size.x - px;
            ahead > -10.0 && ahead < THREAT_LOOKAHEAD
        })
        .filter(|p| p.pos.y < bottom && p.pos.y + p.size.y > top)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        .map(|p| p.rect().center().y)
}

/// Row to line up on: a nearby pickup, else the closest enemy ahead
fn target_y(state: &GameState) -> Option<f32> {
    let center = state.player.center();

    let pickup = state
        .powerups
        .iter()
        .map(|p| p.rect().center())
        .filter(|c| c.distance(center) < PICKUP_RANGE)
        .min_by(|a, b| a.distance(center).total_cmp(&b.distance(center)));
    if let Some(c) = pickup {
        return Some(c.y);
    }

    state
        .enemies
        .iter()
        .filter(|e| e.is_alive() && e.pos.x > state.player.pos.x)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        .map(|e| e.center().y)
}
