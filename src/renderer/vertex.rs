//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.55, 0.8, 0.95, 1.0];
    pub const GROUND: [f32; 4] = [0.45, 0.33, 0.2, 1.0];
    pub const PLAYER_FRONT: [f32; 4] = [0.25, 0.45, 0.85, 1.0];
    pub const PLAYER_BACK: [f32; 4] = [0.18, 0.32, 0.65, 1.0];
    pub const SKIN: [f32; 4] = [0.96, 0.8, 0.66, 1.0];
    pub const PLANT_HEALTHY: [f32; 4] = [0.2, 0.7, 0.25, 1.0];
    pub const PLANT_PARCHED: [f32; 4] = [0.65, 0.55, 0.2, 1.0];
    pub const PLANT_DEAD: [f32; 4] = [0.4, 0.35, 0.3, 1.0];
    pub const BAR_BACK: [f32; 4] = [0.0, 0.0, 0.0, 0.35];
    pub const WATER: [f32; 4] = [0.3, 0.65, 1.0, 1.0];
    pub const SUN: [f32; 4] = [1.0, 0.85, 0.2, 1.0];
    pub const SUN_GLOW: [f32; 4] = [1.0, 0.9, 0.4, 0.35];
    pub const BLOOM: [f32; 4] = [1.0, 0.5, 0.8, 1.0];
    pub const TIMER: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
    pub const SUPER_READY: [f32; 4] = [1.0, 0.55, 0.1, 1.0];
}
