//! Shape generation for the wheel scene
//!
//! Everything is emitted as a plain triangle list in world units, centered on
//! the wheel hub. `RenderState` maps it to NDC.

use glam::{Vec2, Vec3};

use super::vertex::{Vertex, colors};
use crate::consts::PIN_ANGLE_DEG;
use crate::polar_to_cartesian;
use crate::sim::{SliceMesh, Wheel};

#[inline]
fn push(vertices: &mut Vec<Vertex>, p: Vec2, color: [f32; 4]) {
    vertices.push(Vertex::new(p.x, p.y, color));
}

/// Expand one slice mesh to a triangle list, rotated `rotation_deg` about the hub
pub fn slice(mesh: &SliceMesh, rotation_deg: f32, color: [f32; 4]) -> Vec<Vertex> {
    let rot = Vec2::from_angle(rotation_deg.to_radians());
    let project = |v: Vec3| rot.rotate(v.truncate());

    let mut vertices = Vec::with_capacity(mesh.indices.len());
    for [a, b, c] in mesh.triangles() {
        push(&mut vertices, project(mesh.vertices[a as usize]), color);
        push(&mut vertices, project(mesh.vertices[b as usize]), color);
        push(&mut vertices, project(mesh.vertices[c as usize]), color);
    }
    vertices
}

/// Filled disc
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let step = 360.0 / segments as f32;
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let a = center + polar_to_cartesian(radius, i as f32 * step);
        let b = center + polar_to_cartesian(radius, (i + 1) as f32 * step);
        push(&mut vertices, center, color);
        push(&mut vertices, a, color);
        push(&mut vertices, b, color);
    }

    vertices
}

/// Hollow ring between two radii
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let step = 360.0 / segments as f32;
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let (t1, t2) = (i as f32 * step, (i + 1) as f32 * step);
        let inner1 = center + polar_to_cartesian(inner_radius, t1);
        let outer1 = center + polar_to_cartesian(outer_radius, t1);
        let inner2 = center + polar_to_cartesian(inner_radius, t2);
        let outer2 = center + polar_to_cartesian(outer_radius, t2);

        // Two triangles per segment
        push(&mut vertices, inner1, color);
        push(&mut vertices, outer1, color);
        push(&mut vertices, inner2, color);

        push(&mut vertices, inner2, color);
        push(&mut vertices, outer1, color);
        push(&mut vertices, outer2, color);
    }

    vertices
}

/// Fixed pointer above the wheel, tip touching the rim
pub fn pin(wheel_radius: f32, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let up = polar_to_cartesian(1.0, PIN_ANGLE_DEG);
    let side = up.perp();
    let tip = up * (wheel_radius - size * 0.4);
    let base = up * (wheel_radius + size);

    let mut vertices = Vec::with_capacity(3);
    push(&mut vertices, tip, color);
    push(&mut vertices, base + side * size * 0.5, color);
    push(&mut vertices, base - side * size * 0.5, color);
    vertices
}

/// Full wheel scene: slices in their current colors, rim, hub, then the pin on top
pub fn wheel(wheel: &Wheel) -> Vec<Vertex> {
    let radius = wheel.config().radius;
    let rotation = wheel.rotation();

    let mut vertices = Vec::new();
    for s in wheel.slices() {
        vertices.extend(slice(&s.mesh, rotation, s.highlighter.color()));
    }
    vertices.extend(ring(Vec2::ZERO, radius, radius * 1.05, colors::RIM, 64));
    vertices.extend(circle(Vec2::ZERO, radius * 0.08, colors::HUB, 24));
    vertices.extend(pin(radius, radius * 0.12, colors::PIN));
    vertices
}
