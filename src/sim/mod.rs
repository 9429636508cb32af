//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Elapsed time in, state out
//! - Seeded RNG only
//! - Stable iteration order (plant list order decides hits)
//! - No rendering or platform dependencies

pub mod collision;
pub mod gesture;
pub mod placement;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use gesture::{Action, Gesture, GestureContext, StrokeTracker, resolve_gesture};
pub use placement::place_plants;
pub use state::{
    Arena, Facing, GameEvent, GameState, Orb, Particle, ParticleKind, Plant, Player,
    SessionPhase, WaterDrop,
};
pub use tick::{TickInput, apply_action, tick, trigger_super};
