//! Per-frame simulation step
//!
//! Advances the garden by an elapsed delta in milliseconds. Stage order is
//! significant: later stages observe the mutations of earlier ones within
//! the same frame.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::gesture::Action;
use super::state::{
    Facing, GameEvent, GameState, Orb, Particle, ParticleKind, SessionPhase, WaterDrop,
};
use crate::consts::METER_MAX;
use crate::tuning::Tuning;
use crate::{frames_for, sample_range};

/// Input commands for a single step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Classified gestures, applied in order before anything moves
    pub actions: Vec<Action>,
}

impl TickInput {
    pub fn push(&mut self, action: Action) {
        if action != Action::None {
            self.actions.push(action);
        }
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

/// Advance the session by `dt_ms`. No-op unless the session is running.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if state.phase != SessionPhase::Running {
        return;
    }

    for action in &input.actions {
        apply_action(state, *action);
    }

    // A zero delta must leave every entity and timer untouched
    if dt_ms <= 0.0 {
        return;
    }

    step_player(state, dt_ms);
    step_drops(state, dt_ms);
    step_orb(state, dt_ms);
    step_particles(state, dt_ms);
    decay_plants(state, dt_ms);
    step_timer(state, dt_ms);
}

/// Apply a classified gesture
pub fn apply_action(state: &mut GameState, action: Action) {
    match action {
        Action::MoveTo(x) => state.player.target_x = x,
        Action::ThrowDrop { vx, vy } => {
            state.drops.push(WaterDrop {
                pos: state.player.hand(),
                vel: Vec2::new(vx, vy),
                life_ms: state.tuning.drop_life_ms,
            });
            state.player.facing = Facing::Back;
            state.player.facing_reset_ms = state.tuning.facing_reset_ms;
        }
        Action::TriggerSuper => {
            if state.super_ready {
                trigger_super(state);
            }
        }
        Action::None => {}
    }
}

/// Revive every living plant, spend the meter, award the bonus
pub fn trigger_super(state: &mut GameState) {
    let burst = state.tuning.super_burst_per_plant;
    let mut revived = 0;

    for plant in state.plants.iter_mut().filter(|p| p.alive) {
        plant.water();
        spawn_burst(
            &mut state.particles,
            &mut state.rng,
            &state.tuning,
            plant.pos,
            burst,
            ParticleKind::Bloom,
            (1.5, 5.0),
        );
        revived += 1;
    }

    state.sunlight = 0.0;
    state.super_ready = false;
    state.score += state.tuning.super_score;
    state.events.push(GameEvent::Splash {
        volume: 0.9,
        frequency: 330.0,
        duration: 0.45,
    });
    log::debug!("Super bloom revived {} plants", revived);
}

/// Ease the player toward its target and expire the throw pose
pub(crate) fn step_player(state: &mut GameState, dt_ms: f32) {
    let frames = frames_for(dt_ms);
    let player = &mut state.player;

    // Exponential approach: one reference frame covers exactly `ease`
    let k = 1.0 - (1.0 - player.ease).powf(frames);
    player.pos.x += (player.target_x - player.pos.x) * k;

    if player.facing_reset_ms > 0.0 {
        player.facing_reset_ms -= dt_ms;
        if player.facing_reset_ms <= 0.0 {
            player.facing_reset_ms = 0.0;
            player.facing = Facing::Front;
        }
    }
}

/// Move drops, water the first live plant each one lands in, drop strays
pub(crate) fn step_drops(state: &mut GameState, dt_ms: f32) {
    let frames = frames_for(dt_ms);
    let gravity = state.tuning.drop_gravity;
    let arena = state.arena;
    let plants = &state.plants;
    let mut hits: Vec<(usize, Vec2)> = Vec::new();

    state.drops.retain_mut(|drop| {
        drop.pos += drop.vel * frames;
        drop.vel.y += gravity * frames;
        drop.life_ms -= dt_ms;

        // First live plant in list order wins
        if let Some(i) = plants
            .iter()
            .position(|p| p.alive && p.bounds().contains(drop.pos))
        {
            hits.push((i, drop.pos));
            return false;
        }

        arena.contains(drop.pos) && drop.life_ms > 0.0
    });

    for (i, at) in hits {
        state.plants[i].water();
        state.score += state.tuning.hit_score;
        spawn_burst(
            &mut state.particles,
            &mut state.rng,
            &state.tuning,
            at,
            state.tuning.hit_burst,
            ParticleKind::Water,
            (1.0, 3.5),
        );
        state.events.push(GameEvent::Splash {
            volume: 0.35,
            frequency: 660.0,
            duration: 0.12,
        });
    }
}

/// Fall, catch or miss the orb; spawn the next one after the cooldown
pub(crate) fn step_orb(state: &mut GameState, dt_ms: f32) {
    let frames = frames_for(dt_ms);

    let Some(orb) = state.orb.as_mut() else {
        state.since_orb_ms += dt_ms;
        if state.since_orb_ms > state.tuning.orb_cooldown_ms {
            spawn_orb(state);
        }
        return;
    };

    let prev_y = orb.pos.y;
    orb.pos.y += orb.vy * frames;
    let orb_pos = orb.pos;

    // Sweep the whole fall of this step so long deltas can't tunnel the band
    let player = &state.player;
    let half = player.size / 2.0;
    let (top, bottom) = (prev_y.min(orb_pos.y), prev_y.max(orb_pos.y));
    let in_catch_band = bottom >= player.pos.y - half && top <= player.pos.y + half;
    let in_reach = (orb_pos.x - player.pos.x).abs() <= state.tuning.catch_radius;

    if in_catch_band && in_reach {
        state.sunlight = (state.sunlight + state.tuning.orb_sunlight).min(METER_MAX);
        if state.sunlight >= METER_MAX {
            state.super_ready = true;
        }
        spawn_burst(
            &mut state.particles,
            &mut state.rng,
            &state.tuning,
            orb_pos,
            state.tuning.catch_burst,
            ParticleKind::Sun,
            (1.0, 3.0),
        );
        state.events.push(GameEvent::OrbCollected);
        state.orb = None;
        state.since_orb_ms = 0.0;
        log::debug!("Orb caught, sunlight {:.0}", state.sunlight);
    } else if orb_pos.y > state.arena.height - state.tuning.miss_margin {
        let penalty = state.tuning.orb_miss_penalty;
        for plant in state.plants.iter_mut().filter(|p| p.alive) {
            plant.thirst = (plant.thirst - penalty).max(0.0);
        }
        state.events.push(GameEvent::OrbMissed);
        state.orb = None;
        state.since_orb_ms = 0.0;
        log::debug!("Orb missed");
    }
}

fn spawn_orb(state: &mut GameState) {
    let margin = state.tuning.orb_margin;
    let x = sample_range(&mut state.rng, margin, state.arena.width - margin);
    state.orb = Some(Orb {
        pos: Vec2::new(x, state.tuning.orb_spawn_y),
        vy: state.tuning.orb_fall_speed,
        radius: state.tuning.orb_radius,
    });
    state.events.push(GameEvent::OrbSpawned);
    log::debug!("Orb spawned at x={:.0}", x);
}

/// Integrate and age particles
pub(crate) fn step_particles(state: &mut GameState, dt_ms: f32) {
    let frames = frames_for(dt_ms);
    let gravity = state.tuning.particle_gravity;

    state.particles.retain_mut(|p| {
        p.pos += p.vel * frames;
        p.vel.y += gravity * frames;
        p.life_ms -= dt_ms;
        p.life_ms > 0.0
    });
}

/// Thirst decay (killing plants that run dry) and grow pulse fade
pub(crate) fn decay_plants(state: &mut GameState, dt_ms: f32) {
    let secs = dt_ms / 1000.0;
    let thirst_loss = state.tuning.thirst_decay_per_sec * secs;
    let grow_loss = state.tuning.grow_decay_per_sec * secs;

    for plant in &mut state.plants {
        if plant.alive {
            plant.thirst = (plant.thirst - thirst_loss).max(0.0);
            if plant.thirst <= 0.0 {
                plant.alive = false;
                log::debug!("Plant at ({:.0}, {:.0}) dried out", plant.pos.x, plant.pos.y);
            }
        }
        if plant.grow > 0.0 {
            plant.grow = (plant.grow - grow_loss).max(0.0);
        }
    }
}

/// Count down and end the session at zero
pub(crate) fn step_timer(state: &mut GameState, dt_ms: f32) {
    state.time_left -= dt_ms / 1000.0;
    if state.time_left <= 0.0 {
        state.time_left = 0.0;
        state.phase = SessionPhase::Ended;
        state.events.push(GameEvent::SessionEnded);
        log::info!("Session ended with score {}", state.score);
    }
}

/// Radial particle burst, capped at `tuning.max_particles` live particles
fn spawn_burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    tuning: &Tuning,
    at: Vec2,
    count: usize,
    kind: ParticleKind,
    speed: (f32, f32),
) {
    let room = tuning.max_particles.saturating_sub(particles.len());
    for _ in 0..count.min(room) {
        let angle = rng.random_range(0.0..TAU);
        let magnitude = sample_range(rng, speed.0, speed.1);
        let life = sample_range(rng, tuning.particle_life_min_ms, tuning.particle_life_max_ms);
        particles.push(Particle {
            pos: at,
            vel: Vec2::new(angle.cos(), angle.sin()) * magnitude,
            life_ms: life,
            max_life_ms: life,
            kind,
        });
    }
}
