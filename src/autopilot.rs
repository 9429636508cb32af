//! Demo mode
//!
//! Plays the game through the same gesture path a human uses: chase the
//! orb, fire the super when it's ready, otherwise lob water at the
//! thirstiest plant.

use glam::Vec2;

use crate::consts::FRAME_MS;
use crate::sim::{Gesture, GameState};

/// Minimum time between synthetic gestures (ms)
pub const AUTOPILOT_INTERVAL_MS: f32 = 350.0;

/// Plants above this thirst are left alone
const WATER_BELOW: f32 = 75.0;

/// Pick the next gesture, if anything is worth doing
pub fn next_gesture(state: &GameState) -> Option<Gesture> {
    let t = &state.tuning;
    let player = &state.player;

    if let Some(orb) = &state.orb {
        let dx = orb.pos.x - player.pos.x;
        let off_target = (orb.pos.x - player.target_x).abs() > t.catch_radius / 2.0;
        if off_target && dx.abs() > t.move_min_dx {
            // Stroke along the bottom of the screen
            let y = state.arena.height - t.move_band / 3.0;
            return Some(Gesture::new(
                Vec2::new(player.pos.x, y),
                Vec2::new(player.pos.x + dx, y),
            ));
        }
    }

    if state.super_ready {
        return Some(Gesture::new(
            player.pos,
            player.pos - Vec2::new(0.0, t.move_max_dy * 4.0),
        ));
    }

    let target = state
        .plants
        .iter()
        .filter(|p| p.alive && p.thirst < WATER_BELOW)
        .min_by(|a, b| a.thirst.total_cmp(&b.thirst))?;

    aim_throw(state, target.pos)
}

/// Invert the throw ballistics: find a swipe whose drop reaches `target`
/// after a whole number of reference frames.
pub fn aim_throw(state: &GameState, target: Vec2) -> Option<Gesture> {
    let t = &state.tuning;
    let start = state.player.pos;
    let delta = target - state.player.hand();
    let scale = Vec2::new(t.throw_div_x, t.throw_div_y) / t.throw_power;
    // Must read as a throw, never as a move
    let min_rise = t.move_max_dy.max(t.throw_min_dy);

    for frames in (12..=60).step_by(4) {
        let n = frames as f32;
        if n * FRAME_MS >= t.drop_life_ms {
            break;
        }
        // y_n = y_0 + n*vy + g*n*(n-1)/2 under position-then-velocity integration
        let vel = Vec2::new(
            delta.x / n,
            (delta.y - t.drop_gravity * n * (n - 1.0) / 2.0) / n,
        );
        let swipe = vel * scale;
        if -swipe.y >= min_rise {
            return Some(Gesture::new(start, start + swipe));
        }
    }

    None
}
