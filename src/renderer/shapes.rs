//! Shape generation for 2D primitives and the garden scene

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::METER_MAX;
use crate::settings::Settings;
use crate::sim::{Facing, GameState, ParticleKind, Plant, Rect};

const DROP_RADIUS: f32 = 6.0;
const PARTICLE_RADIUS: f32 = 3.5;
const BAR_HEIGHT: f32 = 6.0;

/// Blend from parched to healthy as thirst rises
pub fn thirst_color(thirst: f32) -> [f32; 4] {
    let t = (thirst / METER_MAX).clamp(0.0, 1.0);
    let (a, b) = (colors::PLANT_PARCHED, colors::PLANT_HEALTHY);
    [
        a[0] * (1.0 - t) + b[0] * t,
        a[1] * (1.0 - t) + b[1] * t,
        a[2] * (1.0 - t) + b[2] * t,
        1.0,
    ]
}

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(r: Rect, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(r.min.x, r.min.y, color),
        Vertex::new(r.max.x, r.min.y, color),
        Vertex::new(r.min.x, r.max.y, color),
        Vertex::new(r.min.x, r.max.y, color),
        Vertex::new(r.max.x, r.min.y, color),
        Vertex::new(r.max.x, r.max.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Horizontal meter: dark track with a fill proportional to `fraction`
pub fn bar(origin: Vec2, width: f32, height: f32, fraction: f32, fill: [f32; 4]) -> Vec<Vertex> {
    let track = Rect::new(origin, origin + Vec2::new(width, height));
    let filled = Rect::new(
        origin,
        origin + Vec2::new(width * fraction.clamp(0.0, 1.0), height),
    );
    let mut vertices = rect(track, colors::BAR_BACK);
    vertices.extend(rect(filled, fill));
    vertices
}

fn plant(plant: &Plant, pulse_scale: f32) -> Vec<Vertex> {
    if !plant.alive {
        // Wilted stub
        let stub = Rect::centered(
            plant.pos + Vec2::new(0.0, plant.size * 0.3),
            Vec2::new(plant.size * 0.6, plant.size * 0.4),
        );
        return rect(stub, colors::PLANT_DEAD);
    }

    let scale = 1.0 + plant.grow * pulse_scale;
    let body = Rect::centered(plant.pos, Vec2::splat(plant.size * scale));
    let mut vertices = rect(body, thirst_color(plant.thirst));

    let bar_origin = Vec2::new(
        plant.pos.x - plant.size / 2.0,
        plant.pos.y - plant.size * scale / 2.0 - BAR_HEIGHT * 2.0,
    );
    vertices.extend(bar(
        bar_origin,
        plant.size,
        BAR_HEIGHT,
        plant.thirst / METER_MAX,
        colors::WATER,
    ));
    vertices
}

/// Build the full frame for a session snapshot
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let (w, h) = (state.arena.width, state.arena.height);
    let mut vertices = Vec::with_capacity(4096);

    // Ground
    let ground_top = h - state.tuning.move_band;
    vertices.extend(rect(
        Rect::new(Vec2::new(0.0, ground_top), Vec2::new(w, h)),
        colors::GROUND,
    ));

    for p in &state.plants {
        vertices.extend(plant(p, settings.pulse_scale()));
    }

    // Player: body plus head
    let player = &state.player;
    let body_color = match player.facing {
        Facing::Front => colors::PLAYER_FRONT,
        Facing::Back => colors::PLAYER_BACK,
    };
    let body = Rect::centered(
        player.pos + Vec2::new(0.0, player.size * 0.15),
        Vec2::new(player.size * 0.6, player.size * 0.7),
    );
    vertices.extend(rect(body, body_color));
    vertices.extend(circle(
        player.pos - Vec2::new(0.0, player.size * 0.3),
        player.size * 0.2,
        colors::SKIN,
        16,
    ));

    for drop in &state.drops {
        vertices.extend(circle(drop.pos, DROP_RADIUS, colors::WATER, 10));
    }

    if let Some(orb) = &state.orb {
        vertices.extend(circle(orb.pos, orb.radius * 1.6, colors::SUN_GLOW, 20));
        vertices.extend(circle(orb.pos, orb.radius, colors::SUN, 20));
    }

    if settings.particles {
        for p in &state.particles {
            let base = match p.kind {
                ParticleKind::Water => colors::WATER,
                ParticleKind::Sun => colors::SUN,
                ParticleKind::Bloom => colors::BLOOM,
            };
            let alpha = if p.max_life_ms > 0.0 {
                (p.life_ms / p.max_life_ms).clamp(0.0, 1.0)
            } else {
                0.0
            };
            vertices.extend(circle(p.pos, PARTICLE_RADIUS, with_alpha(base, alpha), 6));
        }
    }

    // HUD meters along the top edge
    let session = state.tuning.session_secs.max(f32::EPSILON);
    vertices.extend(bar(
        Vec2::new(0.0, 0.0),
        w,
        BAR_HEIGHT,
        state.time_left / session,
        colors::TIMER,
    ));
    let sun_fill = if state.super_ready {
        colors::SUPER_READY
    } else {
        colors::SUN
    };
    vertices.extend(bar(
        Vec2::new(0.0, BAR_HEIGHT * 2.0),
        w,
        BAR_HEIGHT * 1.5,
        state.sunlight / METER_MAX,
        sun_fill,
    ));

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Arena, Orb, Particle};
    use crate::tuning::Tuning;

    fn running() -> GameState {
        let mut state = GameState::new(3, Arena::new(800.0, 1200.0), Tuning::default());
        state.start();
        state
    }

    #[test]
    fn test_scene_is_a_triangle_list() {
        let mut state = running();
        state.orb = Some(Orb {
            pos: Vec2::new(300.0, 200.0),
            vy: 3.0,
            radius: 18.0,
        });
        let vertices = build_scene(&state, &Settings::default());
        assert!(!vertices.is_empty());
        assert_eq!(vertices.len() % 3, 0);
    }

    #[test]
    fn test_particles_respect_settings() {
        let mut state = running();
        for _ in 0..5 {
            state.particles.push(Particle {
                pos: Vec2::new(100.0, 100.0),
                vel: Vec2::ZERO,
                life_ms: 100.0,
                max_life_ms: 200.0,
                kind: ParticleKind::Sun,
            });
        }

        let with = build_scene(&state, &Settings::default());
        let without = build_scene(
            &state,
            &Settings {
                particles: false,
                ..Default::default()
            },
        );
        assert_eq!(with.len() - without.len(), 5 * 6 * 3);
    }

    #[test]
    fn test_thirst_color_endpoints() {
        assert_eq!(thirst_color(100.0), colors::PLANT_HEALTHY);
        assert_eq!(thirst_color(0.0), colors::PLANT_PARCHED);
        assert_eq!(thirst_color(250.0), colors::PLANT_HEALTHY);
    }

    #[test]
    fn test_dead_plant_draws_a_stub() {
        let mut p = Plant::new(Vec2::new(100.0, 100.0), 72.0);
        p.alive = false;
        let vertices = plant(&p, 0.18);
        assert_eq!(vertices.len(), 6);
        assert!(vertices.iter().all(|v| v.color == colors::PLANT_DEAD));
    }

    #[test]
    fn test_bar_fill_is_clamped() {
        let vertices = bar(Vec2::ZERO, 100.0, 10.0, 1.7, colors::SUN);
        let max_x = vertices[6..]
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_x, 100.0);
    }
}
