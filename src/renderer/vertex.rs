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

/// Colors for game elements (sRGB, written to a non-sRGB surface)
pub mod colors {
    /// #73956F
    pub const BACKGROUND: [f32; 4] = [0.451, 0.584, 0.435, 1.0];
    /// #95464CCC, also used for the loss overlay
    pub const TIMER: [f32; 4] = [0.584, 0.275, 0.298, 0.8];
    pub const FAILURE_OVERLAY: [f32; 4] = TIMER;
    /// #FE5F55
    pub const LOG: [f32; 4] = [0.996, 0.373, 0.333, 1.0];
    /// #F7F7FF
    pub const WATER: [f32; 4] = [0.969, 0.969, 1.0, 1.0];
}
