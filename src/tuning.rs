//! Data-driven game balance
//!
//! Every rate, threshold and reward the simulation reads. Defaults are the
//! shipped balance; a JSON document may override any subset of fields.
//! Per-frame values are relative to `consts::FRAME_MS`.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    /// Countdown length (seconds)
    pub session_secs: f32,
    /// Largest delta the controller feeds into a single step (ms)
    pub max_frame_ms: f32,

    // === Player ===
    pub player_size: f32,
    /// Distance from the bottom edge to the player's centre
    pub player_ground_offset: f32,
    /// Fraction of the remaining distance covered per frame
    pub player_ease: f32,
    /// How long the player faces away after a throw (ms)
    pub facing_reset_ms: f32,

    // === Gestures ===
    pub move_min_dx: f32,
    pub move_max_dy: f32,
    /// Height of the bottom band where horizontal swipes move the player
    pub move_band: f32,
    /// Horizontal margin the move target is clamped to
    pub move_margin: f32,
    pub throw_min_dy: f32,
    pub throw_div_x: f32,
    pub throw_div_y: f32,
    pub throw_power: f32,

    // === Drops ===
    /// Downward acceleration (px/frame²)
    pub drop_gravity: f32,
    pub drop_life_ms: f32,
    pub hit_score: u64,

    // === Plants ===
    pub plant_count: usize,
    pub plant_size: f32,
    pub plant_min_distance: f32,
    pub placement_attempts: u32,
    /// Horizontal margin for plant placement
    pub plant_margin: f32,
    /// Thirst lost per second
    pub thirst_decay_per_sec: f32,
    /// Grow pulse lost per second
    pub grow_decay_per_sec: f32,

    // === Orb ===
    pub orb_cooldown_ms: f32,
    /// Fall speed (px/frame)
    pub orb_fall_speed: f32,
    pub orb_radius: f32,
    /// Spawn height (negative is above the visible area)
    pub orb_spawn_y: f32,
    pub orb_margin: f32,
    pub catch_radius: f32,
    /// Orbs below `height - miss_margin` count as missed
    pub miss_margin: f32,
    pub orb_sunlight: f32,
    pub orb_miss_penalty: f32,

    // === Super ===
    pub super_score: u64,

    // === Particles ===
    /// Downward acceleration (px/frame²)
    pub particle_gravity: f32,
    pub particle_life_min_ms: f32,
    pub particle_life_max_ms: f32,
    pub max_particles: usize,
    pub hit_burst: usize,
    pub catch_burst: usize,
    pub super_burst_per_plant: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            session_secs: 60.0,
            max_frame_ms: 250.0,

            player_size: 96.0,
            player_ground_offset: 120.0,
            player_ease: 0.16,
            facing_reset_ms: 220.0,

            move_min_dx: 20.0,
            move_max_dy: 50.0,
            move_band: 180.0,
            move_margin: 80.0,
            throw_min_dy: 28.0,
            throw_div_x: 18.0,
            throw_div_y: 36.0,
            throw_power: 1.6,

            drop_gravity: 0.25,
            drop_life_ms: 1600.0,
            hit_score: 6,

            plant_count: 5,
            plant_size: 72.0,
            plant_min_distance: 120.0,
            placement_attempts: 50,
            plant_margin: 80.0,
            thirst_decay_per_sec: 3.2,
            grow_decay_per_sec: 1.6,

            orb_cooldown_ms: 5000.0,
            orb_fall_speed: 3.0,
            orb_radius: 18.0,
            orb_spawn_y: -40.0,
            orb_margin: 60.0,
            catch_radius: 60.0,
            miss_margin: 20.0,
            orb_sunlight: 28.0,
            orb_miss_penalty: 10.0,

            super_score: 24,

            particle_gravity: 0.12,
            particle_life_min_ms: 450.0,
            particle_life_max_ms: 900.0,
            max_particles: 1024,
            hit_burst: 10,
            catch_burst: 12,
            super_burst_per_plant: 28,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning = serde_json::from_str(json)?;
        Ok(tuning)
    }
}
