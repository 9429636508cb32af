//! Game state and core simulation types
//!
//! Plain entity records plus the session state that owns them. Behaviour
//! lives in `tick`; these types only construct and describe themselves.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::placement::place_plants;
use crate::consts::METER_MAX;
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    NotStarted,
    Running,
    Ended,
}

/// Which way the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Front,
    /// Turned toward the garden, shown briefly after a throw
    Back,
}

/// Visible play area in screen pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    pub facing: Facing,
    pub target_x: f32,
    pub ease: f32,
    /// Time until `facing` snaps back to front (ms)
    pub facing_reset_ms: f32,
}

impl Player {
    pub fn new(arena: &Arena, tuning: &Tuning) -> Self {
        let x = arena.width / 2.0;
        Self {
            pos: Vec2::new(x, arena.height - tuning.player_ground_offset),
            size: tuning.player_size,
            facing: Facing::Front,
            target_x: x,
            ease: tuning.player_ease,
            facing_reset_ms: 0.0,
        }
    }

    /// Where thrown drops leave the player
    pub fn hand(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - self.size / 2.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub pos: Vec2,
    pub size: f32,
    /// 0-100, decays over time
    pub thirst: f32,
    pub alive: bool,
    /// Watered pulse (0-1, decays)
    pub grow: f32,
}

impl Plant {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size,
            thirst: METER_MAX,
            alive: true,
            grow: 0.0,
        }
    }

    /// Hit box centred on the plant
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, Vec2::splat(self.size))
    }

    /// Reset to fully watered
    pub fn water(&mut self) {
        self.thirst = METER_MAX;
        self.grow = 1.0;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterDrop {
    pub pos: Vec2,
    /// px/frame
    pub vel: Vec2,
    pub life_ms: f32,
}

/// The falling sun orb (at most one per session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orb {
    pub pos: Vec2,
    /// px/frame
    pub vy: f32,
    pub radius: f32,
}

/// Particle colour families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Water,
    Sun,
    Bloom,
}

/// Cosmetic particle; never affects gameplay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life_ms: f32,
    pub max_life_ms: f32,
    pub kind: ParticleKind,
}

/// Feedback cues raised during a step, drained by the controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Splash {
        volume: f32,
        frequency: f32,
        duration: f32,
    },
    OrbSpawned,
    OrbCollected,
    OrbMissed,
    SessionEnded,
}

/// Complete session state, owned by the controller and passed by reference
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub arena: Arena,
    pub tuning: Tuning,
    pub phase: SessionPhase,
    /// Countdown (seconds)
    pub time_left: f32,
    pub score: u64,
    /// 0-100
    pub sunlight: f32,
    pub super_ready: bool,
    pub player: Player,
    pub plants: Vec<Plant>,
    pub drops: Vec<WaterDrop>,
    pub orb: Option<Orb>,
    pub particles: Vec<Particle>,
    /// Time since the last orb resolved (ms)
    pub since_orb_ms: f32,
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, arena: Arena, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&arena, &tuning),
            arena,
            time_left: tuning.session_secs,
            tuning,
            phase: SessionPhase::NotStarted,
            score: 0,
            sunlight: 0.0,
            super_ready: false,
            plants: Vec::new(),
            drops: Vec::new(),
            orb: None,
            particles: Vec::new(),
            since_orb_ms: 0.0,
            events: Vec::new(),
        }
    }

    /// Reset every session value and begin running. Valid from any phase.
    pub fn start(&mut self) {
        self.phase = SessionPhase::Running;
        self.time_left = self.tuning.session_secs;
        self.score = 0;
        self.sunlight = 0.0;
        self.super_ready = false;
        self.player = Player::new(&self.arena, &self.tuning);
        self.drops.clear();
        self.orb = None;
        self.particles.clear();
        self.since_orb_ms = 0.0;
        self.events.clear();
        self.spawn_plants();
    }

    /// Scatter a fresh batch of plants over the garden area
    pub fn spawn_plants(&mut self) {
        let t = &self.tuning;
        let half = t.plant_size / 2.0;
        let area = Rect::new(
            Vec2::new(t.plant_margin, self.arena.height * 0.3),
            Vec2::new(
                self.arena.width - t.plant_margin,
                self.arena.height - t.move_band - half,
            ),
        );
        let positions = place_plants(
            t.plant_count,
            area,
            t.plant_min_distance,
            t.placement_attempts,
            &mut self.rng,
        );
        let size = t.plant_size;
        self.plants = positions
            .into_iter()
            .map(|pos| Plant::new(pos, size))
            .collect();
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn alive_plants(&self) -> usize {
        self.plants.iter().filter(|p| p.alive).count()
    }
}
