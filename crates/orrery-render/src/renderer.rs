//! Owns every GPU resource of the scene and records the frame's draws.

use std::sync::Arc;

use orrery_assets::{AssetSet, BodyTexture};
use orrery_mesh::{QuadMesh, SphereMesh};

use crate::buffer::{BufferAllocator, MeshBuffer};
use crate::camera::CameraUniform;
use crate::light::SunLightUniform;
use crate::pipeline::{BackgroundPipeline, ObjectUniform, SolarPipeline, uniform_bind_group};
use crate::texture::{ManagedTexture, TextureError, TextureManager};

/// Bodies drawn with the sphere mesh, in draw order.
pub const BODIES: [BodyTexture; 3] = [BodyTexture::Sun, BodyTexture::Earth, BodyTexture::Moon];

/// Uniform values for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameData {
    pub camera: CameraUniform,
    /// Sun, earth, moon.
    pub bodies: [ObjectUniform; 3],
    pub light: SunLightUniform,
}

struct BodySlot {
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    texture: Arc<ManagedTexture>,
}

pub struct SolarRenderer {
    solar: SolarPipeline,
    background: BackgroundPipeline,
    textures: TextureManager,
    sphere: MeshBuffer,
    quad: MeshBuffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    light_buffer: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,
    bodies: [BodySlot; 3],
    background_texture: Arc<ManagedTexture>,
}

impl SolarRenderer {
    /// Upload meshes and textures and build both pipelines.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        assets: &AssetSet,
        sphere: &SphereMesh,
        quad: &QuadMesh,
        initial: &FrameData,
    ) -> Result<Self, TextureError> {
        let mut textures = TextureManager::new(device);
        let solar = SolarPipeline::new(device, surface_format, textures.bind_group_layout());
        let background = BackgroundPipeline::new(device, surface_format, textures.bind_group_layout());

        let alloc = BufferAllocator::new(device);
        let sphere_buffer = alloc.create_sphere("sphere", sphere);
        let quad_buffer = alloc.create_quad("background-quad", quad);

        let camera_buffer = alloc.create_uniform("camera-uniform", &initial.camera);
        let camera_bind_group =
            uniform_bind_group(device, "camera-bind-group", &solar.camera_layout, &camera_buffer);
        let light_buffer = alloc.create_uniform("sun-light-uniform", &initial.light);
        let light_bind_group =
            uniform_bind_group(device, "sun-light-bind-group", &solar.light_layout, &light_buffer);

        let mut slot = |index: usize| -> Result<BodySlot, TextureError> {
            let kind = BODIES[index];
            let label = kind.label();
            let texture = textures.upload(device, queue, label, assets.get(kind))?;
            let uniform =
                alloc.create_uniform(&format!("{label}-object-uniform"), &initial.bodies[index]);
            let bind_group = uniform_bind_group(
                device,
                &format!("{label}-object-bind-group"),
                &solar.object_layout,
                &uniform,
            );
            Ok(BodySlot {
                uniform,
                bind_group,
                texture,
            })
        };
        let bodies = [slot(0)?, slot(1)?, slot(2)?];

        let background_texture = textures.upload(
            device,
            queue,
            BodyTexture::Background.label(),
            assets.get(BodyTexture::Background),
        )?;

        log::info!(
            "Scene ready: sphere {} indices, {} textures",
            sphere_buffer.index_count,
            BODIES.len() + 1
        );

        Ok(Self {
            solar,
            background,
            textures,
            sphere: sphere_buffer,
            quad: quad_buffer,
            camera_buffer,
            camera_bind_group,
            light_buffer,
            light_bind_group,
            bodies,
            background_texture,
        })
    }

    /// Write this frame's uniforms.
    pub fn prepare(&self, queue: &wgpu::Queue, frame: &FrameData) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&frame.camera));
        queue.write_buffer(&self.light_buffer, 0, bytemuck::bytes_of(&frame.light));
        for (slot, object) in self.bodies.iter().zip(&frame.bodies) {
            queue.write_buffer(&slot.uniform, 0, bytemuck::bytes_of(object));
        }
    }

    /// Draw sun, earth and moon, then the background into the remaining pixels.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.solar.pipeline);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
        pass.set_bind_group(3, &self.light_bind_group, &[]);
        for slot in &self.bodies {
            pass.set_bind_group(1, &slot.bind_group, &[]);
            pass.set_bind_group(2, &slot.texture.bind_group, &[]);
            self.sphere.draw(pass);
        }

        pass.set_pipeline(&self.background.pipeline);
        pass.set_bind_group(0, &self.background_texture.bind_group, &[]);
        self.quad.draw(pass);
    }

    pub fn textures(&self) -> &TextureManager {
        &self.textures
    }
}
