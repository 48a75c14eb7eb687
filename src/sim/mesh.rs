//! Procedural slice (wedge) meshes
//!
//! A slice is a triangle fan around the wheel center:
//! - vertex 0 is the center
//! - vertices 1..=segments+1 lie on the arc, from start angle to end angle
//! - triangle i is (0, i, i+1)

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_SEGMENTS;
use crate::error::{Result, WheelError};
use crate::polar_to_cartesian;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Smallest box containing all points (zero box at origin if empty)
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some(first) = points.first() else {
            return Self {
                min: Vec3::ZERO,
                max: Vec3::ZERO,
            };
        };
        points.iter().skip(1).fold(
            Self {
                min: *first,
                max: *first,
            },
            |acc, p| Self {
                min: acc.min.min(*p),
                max: acc.max.max(*p),
            },
        )
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-size along each axis
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Geometry for one wheel slice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceMesh {
    pub vertices: Vec<Vec3>,
    /// Triangle list, three indices per triangle
    pub indices: Vec<u32>,
    /// Per-vertex normals
    pub normals: Vec<Vec3>,
    pub bounds: Aabb,
}

impl SliceMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Recompute per-vertex normals from face normals
    pub fn recalculate_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];
        for [a, b, c] in self.triangles() {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            let face = (self.vertices[b] - self.vertices[a])
                .cross(self.vertices[c] - self.vertices[a]);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        self.normals = normals.into_iter().map(Vec3::normalize_or_zero).collect();
    }

    pub fn recalculate_bounds(&mut self) {
        self.bounds = Aabb::from_points(&self.vertices);
    }
}

/// Build a wedge spanning `start_angle..end_angle` (degrees)
pub fn generate_slice(
    start_angle: f32,
    end_angle: f32,
    radius: f32,
    segments: u32,
) -> Result<SliceMesh> {
    // Index segments + 1 must fit in u32
    if segments == 0 || segments > MAX_SEGMENTS {
        return Err(WheelError::InvalidSegments);
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(WheelError::InvalidRadius(radius));
    }
    if !start_angle.is_finite() || !end_angle.is_finite() {
        return Err(WheelError::NonFiniteAngle {
            start: start_angle,
            end: end_angle,
        });
    }

    let mut vertices = Vec::with_capacity(segments as usize + 2);
    vertices.push(Vec3::ZERO);

    // Arc points
    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let angle = start_angle + (end_angle - start_angle) * t;
        vertices.push(polar_to_cartesian(radius, angle).extend(0.0));
    }

    // Triangle fan
    let mut indices = Vec::with_capacity(segments as usize * 3);
    for i in 1..=segments {
        indices.extend_from_slice(&[0, i, i + 1]);
    }

    let mut mesh = SliceMesh {
        vertices,
        indices,
        normals: Vec::new(),
        bounds: Aabb::from_points(&[]),
    };
    mesh.recalculate_normals();
    mesh.recalculate_bounds();

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_slice_counts() {
        let mesh = generate_slice(112.5, 67.5, 5.0, 10).unwrap();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.triangle_count(), 10);
        assert_eq!(mesh.normals.len(), 12);
    }

    #[test]
    fn test_fan_layout() {
        let mesh = generate_slice(0.0, 90.0, 2.0, 2).unwrap();
        assert_eq!(mesh.vertices[0], Vec3::ZERO);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);

        // First arc point at start angle, last at end angle
        assert!((mesh.vertices[1] - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
        assert!((mesh.vertices[3] - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
        // Midpoint at 45 degrees
        let mid = mesh.vertices[2];
        assert!((mid.length() - 2.0).abs() < 1e-5);
        assert!((mid.x - mid.y).abs() < 1e-5);
    }

    #[test]
    fn test_normals_follow_winding() {
        // Counter-clockwise sweep faces +Z
        let ccw = generate_slice(0.0, 45.0, 1.0, 4).unwrap();
        assert!(ccw.normals.iter().all(|n| (*n - Vec3::Z).length() < 1e-5));

        // Wheel slices sweep clockwise and face -Z
        let cw = generate_slice(112.5, 67.5, 1.0, 4).unwrap();
        assert!(cw.normals.iter().all(|n| (*n - Vec3::NEG_Z).length() < 1e-5));
    }

    #[test]
    fn test_bounds() {
        let mesh = generate_slice(0.0, 90.0, 3.0, 8).unwrap();
        assert!((mesh.bounds.min - Vec3::ZERO).length() < 1e-5);
        assert!((mesh.bounds.max - Vec3::new(3.0, 3.0, 0.0)).length() < 1e-5);
        assert!(mesh.vertices.iter().all(|v| mesh.bounds.contains(*v)));
        assert!((mesh.bounds.center() - Vec3::new(1.5, 1.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_degenerate_slice_has_zero_normals() {
        let mesh = generate_slice(30.0, 30.0, 1.0, 3).unwrap();
        assert_eq!(mesh.triangle_count(), 3);
        assert!(mesh.normals.iter().all(|n| *n == Vec3::ZERO));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            generate_slice(0.0, 90.0, 1.0, 0),
            Err(WheelError::InvalidSegments)
        ));
        assert!(matches!(
            generate_slice(0.0, 90.0, 1.0, u32::MAX),
            Err(WheelError::InvalidSegments)
        ));
        assert!(generate_slice(0.0, 90.0, 1.0, MAX_SEGMENTS).is_ok());
        assert!(matches!(
            generate_slice(0.0, 90.0, 0.0, 4),
            Err(WheelError::InvalidRadius(_))
        ));
        assert!(matches!(
            generate_slice(0.0, 90.0, f32::NAN, 4),
            Err(WheelError::InvalidRadius(_))
        ));
        assert!(matches!(
            generate_slice(f32::INFINITY, 90.0, 1.0, 4),
            Err(WheelError::NonFiniteAngle { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_counts_and_indices(
            segments in 1u32..256,
            start in -720.0f32..720.0,
            sweep in -360.0f32..360.0,
            radius in 0.01f32..100.0,
        ) {
            let mesh = generate_slice(start, start + sweep, radius, segments).unwrap();
            prop_assert_eq!(mesh.vertex_count(), segments as usize + 2);
            prop_assert_eq!(mesh.triangle_count(), segments as usize);
            prop_assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
            for v in &mesh.vertices[1..] {
                prop_assert!((v.length() - radius).abs() <= radius * 1e-4);
            }
        }
    }
}
