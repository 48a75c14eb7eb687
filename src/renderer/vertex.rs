//! Wheel scene vertex format and palette

use bytemuck::{Pod, Zeroable};

/// Scene vertex: world-space position around the hub (NDC once uploaded)
/// and a flat RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

    /// Layout matching `VertexInput` in `shader.wgsl`
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

/// Colors for wheel elements
pub mod colors {
    pub const SLICE_A: [f32; 4] = [0.86, 0.2, 0.25, 1.0];
    pub const SLICE_B: [f32; 4] = [0.97, 0.93, 0.85, 1.0];
    pub const SLICE_HIGHLIGHT: [f32; 4] = [1.0, 0.82, 0.2, 1.0];
    pub const RIM: [f32; 4] = [0.35, 0.22, 0.12, 1.0];
    pub const HUB: [f32; 4] = [0.2, 0.2, 0.25, 1.0];
    pub const PIN: [f32; 4] = [0.95, 0.95, 1.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}
