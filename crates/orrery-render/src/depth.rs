//! Reverse-Z depth buffer.
//!
//! The near plane maps to 1.0 and the far plane to 0.0, so the buffer is
//! cleared to 0.0 and fragments pass with `GreaterEqual`.

/// Depth attachment sized to the surface.
pub struct DepthBuffer {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// The far plane.
    pub const CLEAR_VALUE: f32 = 0.0;

    pub const COMPARE_FUNCTION: wgpu::CompareFunction = wgpu::CompareFunction::GreaterEqual;

    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth-buffer"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            width,
            height,
        }
    }

    /// Recreate at the new size; does nothing when the size is unchanged.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }
        *self = Self::new(device, width, height);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Convert a conventional depth (0 = near, 1 = far) to this buffer's convention.
    pub fn reversed(forward_depth: f32) -> f32 {
        1.0 - forward_depth.clamp(0.0, 1.0)
    }

    /// `DepthStencilState` for geometry drawn against this buffer.
    pub fn stencil_state(write: bool) -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format: Self::FORMAT,
            depth_write_enabled: write,
            depth_compare: Self::COMPARE_FUNCTION,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_test_device_queue;

    #[test]
    fn test_clear_value_is_far_plane() {
        assert_eq!(DepthBuffer::CLEAR_VALUE, 0.0);
        assert_eq!(
            DepthBuffer::COMPARE_FUNCTION,
            wgpu::CompareFunction::GreaterEqual
        );
    }

    #[test]
    fn test_reversed_depth() {
        assert_eq!(DepthBuffer::reversed(0.0), 1.0);
        assert_eq!(DepthBuffer::reversed(1.0), 0.0);
        assert!((DepthBuffer::reversed(0.99) - 0.01).abs() < 1e-6);
        assert_eq!(DepthBuffer::reversed(2.0), 0.0);
    }

    #[test]
    fn test_stencil_state_write_flag() {
        assert!(DepthBuffer::stencil_state(true).depth_write_enabled);
        let read_only = DepthBuffer::stencil_state(false);
        assert!(!read_only.depth_write_enabled);
        assert_eq!(read_only.format, wgpu::TextureFormat::Depth32Float);
    }

    #[test]
    fn test_depth_buffer_matches_surface_size() {
        let Some((device, _queue)) = create_test_device_queue() else {
            return;
        };
        let mut depth = DepthBuffer::new(&device, 800, 600);
        assert_eq!(depth.size(), (800, 600));
        assert_eq!(depth.texture.format(), DepthBuffer::FORMAT);

        depth.resize(&device, 1024, 768);
        assert_eq!(depth.size(), (1024, 768));
        assert_eq!(depth.texture.width(), 1024);
    }
}
