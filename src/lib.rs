//! Sunsplash - water the garden, catch the sun
//!
//! Core modules:
//! - `sim`: Simulation (entities, gestures, collisions, session state)
//! - `game`: Session lifecycle and frame orchestration
//! - `renderer`: Scene building and WebGPU pipeline
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod autopilot;
pub mod error;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use game::{FeedbackSink, Game, NullFeedback, RenderSurface};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Reference frame length in milliseconds. Per-frame rates are defined
    /// against this and scaled by `dt_ms / FRAME_MS`.
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Upper bound for thirst and the sunlight meter
    pub const METER_MAX: f32 = 100.0;

    /// Default play area used by the headless runner
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 1200.0;
}

/// Number of reference frames covered by `dt_ms`
#[inline]
pub fn frames_for(dt_ms: f32) -> f32 {
    dt_ms / consts::FRAME_MS
}

/// Sample uniformly from `[lo, hi)`, collapsing to `lo` for empty ranges
#[inline]
pub fn sample_range<R: rand::Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}
