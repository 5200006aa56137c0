//! wgpu rendering for the orrery: device and surface setup, depth buffer,
//! textures, the body and background pipelines, and the per-frame draw.

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod light;
pub mod pass;
pub mod pipeline;
pub mod renderer;
pub mod texture;

pub use buffer::{BufferAllocator, MeshBuffer, VertexPositionNormalUv};
pub use camera::{Camera, CameraUniform, aspect_ratio};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use light::{SunLight, SunLightUniform};
pub use pass::{FrameEncoder, RenderPassBuilder};
pub use pipeline::{BackgroundPipeline, ObjectUniform, SolarPipeline};
pub use renderer::{FrameData, SolarRenderer};
pub use texture::{ManagedTexture, TextureError, TextureManager, mip_level_count};

#[cfg(test)]
pub(crate) fn create_test_device_queue() -> Option<(wgpu::Device, wgpu::Queue)> {
    pollster::block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok()?;

        adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .ok()
    })
}
