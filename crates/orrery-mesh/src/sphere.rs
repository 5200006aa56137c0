//! Latitude/longitude sphere tessellation.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

/// Reasons [`generate_sphere`] refuses its input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("sphere needs at least 2 segments per axis, got {x_segments}x{y_segments}")]
    TooFewSegments { x_segments: u32, y_segments: u32 },

    #[error("sphere radius must be finite and positive, got {0}")]
    InvalidRadius(f32),

    #[error("{x_segments}x{y_segments} segments overflow 32-bit indices")]
    TooManySegments { x_segments: u32, y_segments: u32 },
}

/// A UV sphere laid out as `y_segments` rings of `x_segments` vertices.
///
/// Ring 0 sits at the north pole (+Y) and the last ring at the south pole.
/// The first and last column of every ring coincide in position and differ
/// only in their U coordinate, giving the texture a seam to wrap across.
/// Triangles wind clockwise when seen from outside the sphere.
#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub radius: f32,
    pub x_segments: u32,
    pub y_segments: u32,
    pub positions: Vec<Vec3>,
    /// Unit outward normals, one per position.
    pub normals: Vec<Vec3>,
    /// Present only when requested from [`generate_sphere`].
    pub uvs: Option<Vec<Vec2>>,
    pub indices: Vec<u32>,
}

/// Tessellate a sphere of `radius` into `x_segments` columns by `y_segments` rings.
///
/// Produces exactly `x_segments * y_segments` vertices and
/// `x_segments * y_segments * 6` indices. Cells along the seam column and the
/// south pole ring reference wrapped or clamped neighbours, so the extra
/// triangles they contribute are degenerate but every index stays in bounds.
pub fn generate_sphere(
    radius: f32,
    x_segments: u32,
    y_segments: u32,
    with_uv: bool,
) -> Result<SphereMesh, MeshError> {
    if x_segments < 2 || y_segments < 2 {
        return Err(MeshError::TooFewSegments {
            x_segments,
            y_segments,
        });
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(MeshError::InvalidRadius(radius));
    }
    let index_count = u64::from(x_segments) * u64::from(y_segments) * 6;
    if index_count > u64::from(u32::MAX) {
        return Err(MeshError::TooManySegments {
            x_segments,
            y_segments,
        });
    }

    let vertex_count = (x_segments * y_segments) as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = with_uv.then(|| Vec::with_capacity(vertex_count));

    let x_last = (x_segments - 1) as f32;
    let y_last = (y_segments - 1) as f32;
    for y in 0..y_segments {
        let yi = y as f32 / y_last;
        let theta = yi * PI;
        for x in 0..x_segments {
            let xi = x as f32 / x_last;
            let phi = xi * TAU;
            let normal = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
            positions.push(normal * radius);
            normals.push(normal);
            if let Some(uvs) = uvs.as_mut() {
                uvs.push(Vec2::new(xi, 1.0 - yi));
            }
        }
    }

    let mut indices = Vec::with_capacity(index_count as usize);
    let last_ring = y_segments - 1;
    for i in 0..y_segments {
        let ring = i * x_segments;
        let next_ring = (i + 1).min(last_ring) * x_segments;
        for j in 0..x_segments {
            let j_next = (j + 1) % x_segments;
            let a = ring + j;
            let b = ring + j_next;
            let c = next_ring + j;
            let d = next_ring + j_next;
            indices.extend_from_slice(&[a, c, d, a, d, b]);
        }
    }

    Ok(SphereMesh {
        radius,
        x_segments,
        y_segments,
        positions,
        normals,
        uvs,
        indices,
    })
}

impl SphereMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Floats per vertex in [`interleaved`](Self::interleaved): 5 with UVs, 3 without.
    pub fn stride(&self) -> usize {
        if self.uvs.is_some() { 5 } else { 3 }
    }

    /// Flat `x, y, z[, u, v]` vertex stream.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertex_count() * self.stride());
        for (idx, p) in self.positions.iter().enumerate() {
            out.extend_from_slice(&p.to_array());
            if let Some(uvs) = &self.uvs {
                out.extend_from_slice(&uvs[idx].to_array());
            }
        }
        out
    }

    /// Number of triangles whose corners do not span any area.
    pub fn degenerate_triangle_count(&self) -> usize {
        self.indices
            .chunks_exact(3)
            .filter(|tri| {
                let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| self.positions[i as usize]);
                (b - a).cross(c - a).length_squared() <= f32::EPSILON * self.radius.powi(4)
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_follow_segment_product() {
        for (xs, ys) in [(2, 2), (3, 7), (50, 50), (64, 16)] {
            let mesh = generate_sphere(1.0, xs, ys, true).unwrap();
            assert_eq!(mesh.vertex_count(), (xs * ys) as usize);
            assert_eq!(mesh.index_count(), (xs * ys * 6) as usize);
        }
    }

    #[test]
    fn test_indices_in_bounds() {
        let mesh = generate_sphere(1.0, 50, 50, false).unwrap();
        let n = mesh.vertex_count() as u32;
        for &idx in &mesh.indices {
            assert!(idx < n, "index {idx} out of bounds (vertex count = {n})");
        }
    }

    #[test]
    fn test_vertices_on_sphere() {
        let mesh = generate_sphere(2.5, 20, 12, false).unwrap();
        for pos in &mesh.positions {
            assert!((pos.length() - 2.5).abs() < 1e-4, "vertex off sphere: {pos}");
        }
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_poles_and_seam() {
        let xs = 10;
        let mesh = generate_sphere(1.0, xs, 8, true).unwrap();
        assert!((mesh.positions[0] - Vec3::Y).length() < 1e-6);
        let south = mesh.positions[mesh.vertex_count() - 1];
        assert!((south + Vec3::Y).length() < 1e-5);

        // First and last column of a ring coincide.
        let ring = 3 * xs as usize;
        let first = mesh.positions[ring];
        let last = mesh.positions[ring + xs as usize - 1];
        assert!((first - last).length() < 1e-5);
    }

    #[test]
    fn test_first_vertex_matches_parametrisation() {
        let mesh = generate_sphere(1.0, 5, 5, true).unwrap();
        // x = 1, y = 1: xi = yi = 0.25
        let v = mesh.positions[5 + 1];
        let theta = 0.25 * PI;
        let phi = 0.25 * TAU;
        let expected = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
        assert!((v - expected).length() < 1e-6);
        assert_eq!(mesh.uvs.as_ref().unwrap()[6], Vec2::new(0.25, 0.75));
    }

    #[test]
    fn test_uvs_span_unit_square() {
        let mesh = generate_sphere(1.0, 16, 9, true).unwrap();
        let uvs = mesh.uvs.as_ref().unwrap();
        assert_eq!(uvs[0], Vec2::new(0.0, 1.0));
        assert_eq!(uvs[uvs.len() - 1], Vec2::new(1.0, 0.0));
        for uv in uvs {
            assert!((0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y));
        }
    }

    #[test]
    fn test_interleaved_stride() {
        let with_uv = generate_sphere(1.0, 4, 4, true).unwrap();
        assert_eq!(with_uv.stride(), 5);
        let data = with_uv.interleaved();
        assert_eq!(data.len(), 16 * 5);
        assert_eq!(&data[0..5], &[0.0, 1.0, 0.0, 0.0, 1.0]);

        let plain = generate_sphere(1.0, 4, 4, false).unwrap();
        assert_eq!(plain.stride(), 3);
        assert_eq!(plain.interleaved().len(), 16 * 3);
    }

    #[test]
    fn test_wrapped_cells_are_degenerate() {
        let (xs, ys) = (12, 10);
        let mesh = generate_sphere(1.0, xs, ys, false).unwrap();
        let degenerate = mesh.degenerate_triangle_count();
        let total = mesh.index_count() / 3;
        // At least the pole-ring cells, seam cells and north-pole fan halves.
        assert!(degenerate >= (2 * xs + 2 * ys) as usize - 4);
        assert!(degenerate < total);
    }

    #[test]
    fn test_winding_is_clockwise_from_outside() {
        let mesh = generate_sphere(1.0, 24, 24, false).unwrap();
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.positions[i as usize]);
            let n = (b - a).cross(c - a);
            if n.length_squared() > 1e-8 {
                assert!(n.dot(a + b + c) < 0.0, "triangle {tri:?} faces outward CCW");
            }
        }
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(
            generate_sphere(1.0, 1, 10, true).unwrap_err(),
            MeshError::TooFewSegments {
                x_segments: 1,
                y_segments: 10
            }
        );
        assert!(matches!(
            generate_sphere(0.0, 10, 10, true),
            Err(MeshError::InvalidRadius(_))
        ));
        assert!(matches!(
            generate_sphere(f32::NAN, 10, 10, true),
            Err(MeshError::InvalidRadius(_))
        ));
        assert!(matches!(
            generate_sphere(1.0, 100_000, 100_000, false),
            Err(MeshError::TooManySegments { .. })
        ));
    }
}
