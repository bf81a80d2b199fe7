//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in world pixels with straight-alpha color
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
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Fixed palette for non-object elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.039, 0.039, 0.059, 1.0]; // #0a0a0f
    pub const GRID: [f32; 4] = [0.0, 1.0, 1.0, 0.1];
    pub const VOID: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const VOID_EDGE: [f32; 4] = [0.0, 0.0, 0.0, 0.8];
    pub const RIM: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const RIM_GLOW: [f32; 4] = [0.0, 1.0, 1.0, 0.25];
}

/// Replace the alpha of an RGBA color
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}
