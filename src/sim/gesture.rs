//! Swipe classification
//!
//! Turns a pointer/touch stroke into a game action. Classification only:
//! the resulting `Action` is applied by `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::tuning::Tuning;

/// A completed stroke in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    pub start: Vec2,
    pub end: Vec2,
}

impl Gesture {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn delta(&self) -> Vec2 {
        self.end - self.start
    }
}

/// A stroke in progress. Remembers the latest point so a stroke the
/// platform cancels mid-swipe can still be classified.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrokeTracker {
    start: Option<Vec2>,
    last: Vec2,
}

impl StrokeTracker {
    pub fn begin(&mut self, pos: Vec2) {
        self.start = Some(pos);
        self.last = pos;
    }

    pub fn update(&mut self, pos: Vec2) {
        if self.start.is_some() {
            self.last = pos;
        }
    }

    /// Stroke released at `pos`
    pub fn finish(&mut self, pos: Vec2) -> Option<Gesture> {
        let start = self.start.take()?;
        Some(Gesture::new(start, pos))
    }

    /// Stroke cut short; ends at the last point seen
    pub fn abandon(&mut self) -> Option<Gesture> {
        let start = self.start.take()?;
        Some(Gesture::new(start, self.last))
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    pub fn clear(&mut self) {
        self.start = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Action {
    /// Walk toward this x position
    MoveTo(f32),
    /// Throw a drop with this velocity (px/frame)
    ThrowDrop { vx: f32, vy: f32 },
    TriggerSuper,
    #[default]
    None,
}

/// The slice of session state a gesture is judged against
#[derive(Debug, Clone, Copy)]
pub struct GestureContext {
    pub player_x: f32,
    pub super_ready: bool,
    pub width: f32,
    pub height: f32,
}

impl GestureContext {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            player_x: state.player.pos.x,
            super_ready: state.super_ready,
            width: state.arena.width,
            height: state.arena.height,
        }
    }
}

/// Classify a stroke. Rules are checked in priority order:
/// 1. flat horizontal swipe starting in the bottom band moves the player
/// 2. upward swipe fires the super when ready, otherwise throws a drop
/// 3. anything else is ignored
pub fn resolve_gesture(gesture: &Gesture, ctx: &GestureContext, tuning: &Tuning) -> Action {
    let d = gesture.delta();

    let in_move_band = gesture.start.y >= ctx.height - tuning.move_band;
    if d.y.abs() < tuning.move_max_dy && d.x.abs() > tuning.move_min_dx && in_move_band {
        // max/min rather than clamp: narrow screens would invert the bounds
        let x = (ctx.player_x + d.x)
            .min(ctx.width - tuning.move_margin)
            .max(tuning.move_margin);
        return Action::MoveTo(x);
    }

    if d.y < 0.0 && -d.y > tuning.throw_min_dy {
        if ctx.super_ready {
            return Action::TriggerSuper;
        }
        return Action::ThrowDrop {
            vx: d.x / tuning.throw_div_x * tuning.throw_power,
            vy: d.y / tuning.throw_div_y * tuning.throw_power,
        };
    }

    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(super_ready: bool) -> GestureContext {
        GestureContext {
            player_x: 400.0,
            super_ready,
            width: 800.0,
            height: 1200.0,
        }
    }

    fn swipe(sx: f32, sy: f32, ex: f32, ey: f32) -> Gesture {
        Gesture::new(Vec2::new(sx, sy), Vec2::new(ex, ey))
    }

    #[test]
    fn test_abandoned_stroke_ends_at_last_point() {
        let mut stroke = StrokeTracker::default();
        assert!(stroke.abandon().is_none());

        stroke.begin(Vec2::new(400.0, 1100.0));
        stroke.update(Vec2::new(405.0, 1000.0));
        stroke.update(Vec2::new(410.0, 900.0));
        let gesture = stroke.abandon().unwrap();
        assert_eq!(gesture.delta(), Vec2::new(10.0, -200.0));
        assert!(!stroke.is_active());

        // Moves without a press are ignored
        stroke.update(Vec2::new(0.0, 0.0));
        assert!(stroke.finish(Vec2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_horizontal_swipe_in_bottom_band_moves() {
        let tuning = Tuning::default();
        let action = resolve_gesture(&swipe(300.0, 1100.0, 420.0, 1110.0), &ctx(false), &tuning);
        assert_eq!(action, Action::MoveTo(520.0));
    }

    #[test]
    fn test_move_target_is_clamped() {
        let tuning = Tuning::default();
        let right = resolve_gesture(&swipe(100.0, 1150.0, 700.0, 1150.0), &ctx(false), &tuning);
        assert_eq!(right, Action::MoveTo(720.0));

        let left = resolve_gesture(&swipe(700.0, 1150.0, 100.0, 1150.0), &ctx(false), &tuning);
        assert_eq!(left, Action::MoveTo(80.0));
    }

    #[test]
    fn test_horizontal_swipe_above_band_is_ignored() {
        let tuning = Tuning::default();
        let action = resolve_gesture(&swipe(300.0, 600.0, 500.0, 600.0), &ctx(false), &tuning);
        assert_eq!(action, Action::None);
    }

    #[test]
    fn test_upward_swipe_throws_scaled_velocity() {
        let tuning = Tuning::default();
        let action = resolve_gesture(&swipe(400.0, 1100.0, 436.0, 920.0), &ctx(false), &tuning);
        let Action::ThrowDrop { vx, vy } = action else {
            panic!("expected a throw, got {action:?}");
        };
        assert!((vx - 36.0 / 18.0 * 1.6).abs() < 1e-5);
        assert!((vy - -180.0 / 36.0 * 1.6).abs() < 1e-5);
    }

    #[test]
    fn test_upward_swipe_with_super_ready_triggers_super() {
        let tuning = Tuning::default();
        let action = resolve_gesture(&swipe(400.0, 1100.0, 400.0, 900.0), &ctx(true), &tuning);
        assert_eq!(action, Action::TriggerSuper);
    }

    #[test]
    fn test_short_or_downward_swipes_are_ignored() {
        let tuning = Tuning::default();
        // Upward but under the throw threshold, and not horizontal enough to move
        let short = resolve_gesture(&swipe(400.0, 700.0, 405.0, 680.0), &ctx(false), &tuning);
        assert_eq!(short, Action::None);

        let down = resolve_gesture(&swipe(400.0, 700.0, 400.0, 900.0), &ctx(true), &tuning);
        assert_eq!(down, Action::None);
    }

    #[test]
    fn test_move_rule_wins_over_throw() {
        let tuning = Tuning::default();
        // Slightly upward (40px) but flat enough to count as a move in the band
        let action = resolve_gesture(&swipe(400.0, 1150.0, 500.0, 1110.0), &ctx(true), &tuning);
        assert_eq!(action, Action::MoveTo(500.0));
    }
}
