//! Session lifecycle and frame orchestration
//!
//! `Game` owns the session state and everything that happens around a
//! simulation step: the asset gate, pending gestures, feedback cues and
//! handing the finished frame to a render surface.

use glam::Vec2;

use crate::assets::LoadProgress;
use crate::autopilot::{self, AUTOPILOT_INTERVAL_MS};
use crate::error::GameError;
use crate::settings::Settings;
use crate::sim::{
    Action, GameEvent, GameState, Gesture, GestureContext, SessionPhase, StrokeTracker, TickInput,
    resolve_gesture, tick,
};

/// Receives feedback cues (sound, haptics). Best effort: implementations
/// swallow their own failures.
pub trait FeedbackSink {
    fn cue(&mut self, event: &GameEvent);
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn cue(&mut self, _event: &GameEvent) {}
}

/// Draws a read-only snapshot of the session
pub trait RenderSurface {
    fn present(&mut self, state: &GameState, settings: &Settings);
}

/// A surface that failed to initialise simply draws nothing
impl<T: RenderSurface> RenderSurface for Option<T> {
    fn present(&mut self, state: &GameState, settings: &Settings) {
        if let Some(surface) = self {
            surface.present(state, settings);
        }
    }
}

pub struct Game<F: FeedbackSink = NullFeedback> {
    pub state: GameState,
    pub settings: Settings,
    assets: LoadProgress,
    input: TickInput,
    stroke: StrokeTracker,
    last_time: Option<f64>,
    feedback: F,
    demo_mode: bool,
    demo_cooldown_ms: f32,
}

impl<F: FeedbackSink> Game<F> {
    pub fn new(state: GameState, assets: LoadProgress, settings: Settings, feedback: F) -> Self {
        Self {
            state,
            settings,
            assets,
            input: TickInput::default(),
            stroke: StrokeTracker::default(),
            last_time: None,
            feedback,
            demo_mode: false,
            demo_cooldown_ms: 0.0,
        }
    }

    pub fn assets(&self) -> &LoadProgress {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut LoadProgress {
        &mut self.assets
    }

    pub fn feedback_mut(&mut self) -> &mut F {
        &mut self.feedback
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    /// (Re)initialise the session and begin running. Refused until every
    /// asset has reported in.
    pub fn start(&mut self) -> Result<(), GameError> {
        if !self.assets.is_complete() {
            return Err(GameError::AssetsLoading {
                loaded: self.assets.loaded(),
                total: self.assets.total(),
            });
        }

        self.state.start();
        self.input.clear();
        self.stroke.clear();
        self.last_time = None;
        self.demo_cooldown_ms = 0.0;
        log::info!(
            "Session started ({} plants, {:.0}s)",
            self.state.plants.len(),
            self.state.time_left
        );
        Ok(())
    }

    /// End the session early
    pub fn stop(&mut self) {
        if self.state.phase == SessionPhase::Running {
            self.state.phase = SessionPhase::Ended;
            log::info!("Session stopped with score {}", self.state.score);
        }
        self.input.clear();
        self.stroke.clear();
        self.last_time = None;
    }

    pub fn game_over(&mut self) {
        self.stop();
    }

    /// Classify a stroke and queue it for the next frame
    pub fn on_gesture(&mut self, start: Vec2, end: Vec2) -> Action {
        if !self.state.is_running() {
            return Action::None;
        }

        let ctx = GestureContext::from_state(&self.state);
        let action = resolve_gesture(&Gesture::new(start, end), &ctx, &self.state.tuning);
        log::trace!("Gesture {:?} -> {:?}", end - start, action);
        self.input.push(action);
        action
    }

    // === Raw pointer stream ===

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.stroke.begin(pos);
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.stroke.update(pos);
    }

    pub fn pointer_up(&mut self, pos: Vec2) -> Action {
        match self.stroke.finish(pos) {
            Some(g) => self.on_gesture(g.start, g.end),
            None => Action::None,
        }
    }

    /// The platform took the stroke over (e.g. to scroll); classify what
    /// was drawn so far
    pub fn pointer_cancel(&mut self) -> Action {
        match self.stroke.abandon() {
            Some(g) => self.on_gesture(g.start, g.end),
            None => Action::None,
        }
    }

    pub fn demo_mode(&self) -> bool {
        self.demo_mode
    }

    pub fn set_demo_mode(&mut self, on: bool) {
        self.demo_mode = on;
        self.demo_cooldown_ms = 0.0;
        log::info!("Demo mode: {}", on);
    }

    /// Run one frame at `timestamp_ms`: step the simulation, deliver cues,
    /// draw. Returns whether the loop should keep going.
    pub fn frame(&mut self, timestamp_ms: f64, surface: &mut dyn RenderSurface) -> bool {
        if !self.state.is_running() {
            self.last_time = None;
            return false;
        }

        // First frame after start has no elapsed time
        let dt = match self.last_time {
            Some(last) => ((timestamp_ms - last) as f32).clamp(0.0, self.state.tuning.max_frame_ms),
            None => 0.0,
        };
        self.last_time = Some(timestamp_ms);

        if self.demo_mode {
            self.drive_autopilot(dt);
        }

        tick(&mut self.state, &self.input, dt);
        self.input.clear();

        for event in self.state.events.drain(..) {
            self.feedback.cue(&event);
        }

        surface.present(&self.state, &self.settings);

        self.state.is_running()
    }

    fn drive_autopilot(&mut self, dt: f32) {
        self.demo_cooldown_ms -= dt;
        if self.demo_cooldown_ms > 0.0 {
            return;
        }
        self.demo_cooldown_ms = AUTOPILOT_INTERVAL_MS;
        if let Some(gesture) = autopilot::next_gesture(&self.state) {
            self.on_gesture(gesture.start, gesture.end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::Arena;
    use crate::tuning::Tuning;

    #[derive(Default)]
    struct Recorder {
        cues: Vec<GameEvent>,
    }

    impl FeedbackSink for Recorder {
        fn cue(&mut self, event: &GameEvent) {
            self.cues.push(*event);
        }
    }

    #[derive(Default)]
    struct CountingSurface {
        frames: usize,
        last_score: u64,
    }

    impl RenderSurface for CountingSurface {
        fn present(&mut self, state: &GameState, _settings: &Settings) {
            self.frames += 1;
            self.last_score = state.score;
        }
    }

    fn game(total_assets: usize) -> Game<Recorder> {
        let state = GameState::new(21, Arena::new(800.0, 1200.0), Tuning::default());
        Game::new(
            state,
            LoadProgress::new(total_assets),
            Settings::default(),
            Recorder::default(),
        )
    }

    #[test]
    fn test_start_waits_for_assets() {
        let mut game = game(2);
        let err = game.start().unwrap_err();
        assert!(matches!(err, GameError::AssetsLoading { loaded: 0, total: 2 }));
        assert_eq!(game.phase(), SessionPhase::NotStarted);

        game.assets_mut().mark_loaded("renderer");
        game.assets_mut().mark_failed("audio");
        game.start().unwrap();
        assert_eq!(game.phase(), SessionPhase::Running);
    }

    #[test]
    fn test_frame_loop_runs_until_timer_expires() {
        let mut game = game(0);
        game.start().unwrap();
        let mut surface = CountingSurface::default();

        let mut now = 1000.0;
        let mut frames = 0;
        while game.frame(now, &mut surface) {
            now += FRAME_MS as f64;
            frames += 1;
            assert!(frames < 10_000, "session never ended");
        }

        assert_eq!(game.phase(), SessionPhase::Ended);
        assert_eq!(surface.frames, frames + 1);
        assert!(game.feedback_mut().cues.contains(&GameEvent::SessionEnded));
        // ~60s of frames
        assert!((3590..=3610).contains(&frames));

        // Ended sessions draw nothing more
        assert!(!game.frame(now, &mut surface));
        assert_eq!(surface.frames, frames + 1);
    }

    #[test]
    fn test_gestures_only_count_while_running() {
        let mut game = game(0);
        let throw = (Vec2::new(400.0, 1100.0), Vec2::new(400.0, 900.0));
        assert_eq!(game.on_gesture(throw.0, throw.1), Action::None);

        game.start().unwrap();
        let action = game.on_gesture(throw.0, throw.1);
        assert!(matches!(action, Action::ThrowDrop { .. }));

        let mut surface: Option<CountingSurface> = None;
        game.frame(0.0, &mut surface);
        assert_eq!(game.state.drops.len(), 1);
    }

    #[test]
    fn test_cancelled_touch_swipe_still_throws() {
        let mut game = game(0);
        game.start().unwrap();

        game.pointer_down(Vec2::new(400.0, 1100.0));
        game.pointer_move(Vec2::new(402.0, 1000.0));
        game.pointer_move(Vec2::new(404.0, 880.0));
        let action = game.pointer_cancel();
        assert!(matches!(action, Action::ThrowDrop { .. }), "got {action:?}");

        // A release after the cancel has no stroke left to finish
        assert_eq!(game.pointer_up(Vec2::new(404.0, 870.0)), Action::None);

        let mut surface: Option<CountingSurface> = None;
        game.frame(0.0, &mut surface);
        assert_eq!(game.state.drops.len(), 1);
    }

    #[test]
    fn test_pointer_release_resolves_move() {
        let mut game = game(0);
        game.start().unwrap();

        game.pointer_down(Vec2::new(300.0, 1150.0));
        game.pointer_move(Vec2::new(360.0, 1152.0));
        assert_eq!(game.pointer_up(Vec2::new(420.0, 1150.0)), Action::MoveTo(520.0));
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut game = game(0);
        game.start().unwrap();
        let mut surface = CountingSurface::default();

        game.frame(0.0, &mut surface);
        game.frame(10_000.0, &mut surface);
        assert!((game.state.time_left - (60.0 - 0.25)).abs() < 1e-4);
    }

    #[test]
    fn test_stop_ends_session_and_restart_resets() {
        let mut game = game(0);
        game.start().unwrap();
        game.state.score = 50;
        game.stop();
        assert_eq!(game.phase(), SessionPhase::Ended);

        game.start().unwrap();
        assert_eq!(game.state.score, 0);
        assert_eq!(game.phase(), SessionPhase::Running);
    }

    #[test]
    fn test_demo_mode_scores() {
        let mut game = game(0);
        game.start().unwrap();
        game.set_demo_mode(true);
        let mut surface = CountingSurface::default();

        let mut now = 0.0;
        while game.frame(now, &mut surface) {
            now += FRAME_MS as f64;
        }
        assert!(surface.last_score > 0);
    }
}
