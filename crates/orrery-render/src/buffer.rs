//! Vertex and index buffers for the sphere and the background quad.

use bytemuck::{Pod, Zeroable};
use orrery_mesh::{QuadMesh, SphereMesh};
use wgpu::util::DeviceExt;

/// Interleaved vertex shared by every pipeline.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexPositionNormalUv {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl VertexPositionNormalUv {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Sphere vertices; a mesh generated without UVs gets `(0, 0)` everywhere.
    pub fn from_sphere(mesh: &SphereMesh) -> Vec<Self> {
        mesh.positions
            .iter()
            .zip(&mesh.normals)
            .enumerate()
            .map(|(idx, (p, n))| Self {
                position: p.to_array(),
                normal: n.to_array(),
                uv: mesh
                    .uvs
                    .as_ref()
                    .map_or([0.0; 2], |uvs| uvs[idx].to_array()),
            })
            .collect()
    }

    /// Quad vertices facing the viewer (+Z normal).
    pub fn from_quad(quad: &QuadMesh) -> Vec<Self> {
        quad.positions
            .iter()
            .zip(&quad.uvs)
            .map(|(p, uv)| Self {
                position: p.to_array(),
                normal: [0.0, 0.0, 1.0],
                uv: uv.to_array(),
            })
            .collect()
    }
}

/// Uploaded vertex and `u32` index buffers.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl MeshBuffer {
    /// Bind and draw the whole mesh once.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Creates labelled GPU buffers on one device.
pub struct BufferAllocator<'a> {
    device: &'a wgpu::Device,
}

impl<'a> BufferAllocator<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    pub fn create_mesh(
        &self,
        label: &str,
        vertices: &[VertexPositionNormalUv],
        indices: &[u32],
    ) -> MeshBuffer {
        let vertex_buffer = self.init(
            &format!("{label}-vertices"),
            bytemuck::cast_slice(vertices),
            wgpu::BufferUsages::VERTEX,
        );
        let index_buffer = self.init(
            &format!("{label}-indices"),
            bytemuck::cast_slice(indices),
            wgpu::BufferUsages::INDEX,
        );
        log::debug!(
            "Uploaded mesh '{label}': {} vertices, {} indices",
            vertices.len(),
            indices.len()
        );

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    pub fn create_sphere(&self, label: &str, mesh: &SphereMesh) -> MeshBuffer {
        self.create_mesh(label, &VertexPositionNormalUv::from_sphere(mesh), &mesh.indices)
    }

    pub fn create_quad(&self, label: &str, quad: &QuadMesh) -> MeshBuffer {
        self.create_mesh(label, &VertexPositionNormalUv::from_quad(quad), &quad.indices)
    }

    /// A uniform buffer initialised with `value`, writable from the queue.
    pub fn create_uniform<T: Pod>(&self, label: &str, value: &T) -> wgpu::Buffer {
        self.init(
            label,
            bytemuck::bytes_of(value),
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        )
    }

    fn init(&self, label: &str, contents: &[u8], usage: wgpu::BufferUsages) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_test_device_queue;
    use orrery_mesh::{background_quad, generate_sphere};

    #[test]
    fn test_vertex_stride() {
        assert_eq!(std::mem::size_of::<VertexPositionNormalUv>(), 32);
        let layout = VertexPositionNormalUv::layout();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes[2].offset, 24);
    }

    #[test]
    fn test_from_sphere_copies_attributes() {
        let mesh = generate_sphere(2.0, 6, 5, true).unwrap();
        let vertices = VertexPositionNormalUv::from_sphere(&mesh);
        assert_eq!(vertices.len(), mesh.vertex_count());
        assert_eq!(vertices[0].position, [0.0, 2.0, 0.0]);
        assert_eq!(vertices[0].normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertices[0].uv, [0.0, 1.0]);
    }

    #[test]
    fn test_from_sphere_without_uv() {
        let mesh = generate_sphere(1.0, 4, 4, false).unwrap();
        let vertices = VertexPositionNormalUv::from_sphere(&mesh);
        assert!(vertices.iter().all(|v| v.uv == [0.0, 0.0]));
    }

    #[test]
    fn test_from_quad() {
        let vertices = VertexPositionNormalUv::from_quad(&background_quad(0.25));
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[3].position, [1.0, -1.0, 0.25]);
        assert_eq!(vertices[3].uv, [1.0, 0.0]);
    }

    #[test]
    fn test_create_sphere_buffer() {
        let Some((device, _queue)) = create_test_device_queue() else {
            return;
        };
        let mesh = generate_sphere(1.0, 50, 50, true).unwrap();
        let buffer = BufferAllocator::new(&device).create_sphere("sphere", &mesh);
        assert_eq!(buffer.index_count, 50 * 50 * 6);
        assert_eq!(buffer.vertex_buffer.size(), 50 * 50 * 32);
        assert_eq!(buffer.index_buffer.size(), 50 * 50 * 6 * 4);
    }
}
