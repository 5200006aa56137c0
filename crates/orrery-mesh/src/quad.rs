//! Full-screen quad used for the star background.

use glam::{Vec2, Vec3};

/// Four clip-space corners with texture coordinates, drawn as two triangles.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadMesh {
    pub positions: [Vec3; 4],
    pub uvs: [Vec2; 4],
    pub indices: [u32; 6],
}

/// Build the background quad at clip-space `depth`.
///
/// Corners run top-left, top-right, bottom-left, bottom-right; V grows upward
/// so the image's first row lands on the bottom edge.
pub fn background_quad(depth: f32) -> QuadMesh {
    QuadMesh {
        positions: [
            Vec3::new(-1.0, 1.0, depth),
            Vec3::new(1.0, 1.0, depth),
            Vec3::new(-1.0, -1.0, depth),
            Vec3::new(1.0, -1.0, depth),
        ],
        uvs: [
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
        ],
        indices: [0, 2, 1, 3, 1, 2],
    }
}

impl QuadMesh {
    /// Flat `x, y, z, u, v` vertex stream.
    pub fn interleaved(&self) -> Vec<f32> {
        self.positions
            .iter()
            .zip(&self.uvs)
            .flat_map(|(p, uv)| [p.x, p.y, p.z, uv.x, uv.y])
            .collect()
    }
}
