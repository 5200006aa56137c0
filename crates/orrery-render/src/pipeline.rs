//! Render pipelines for the textured bodies and the background.
//!
//! Body bind groups:
//! - group 0: camera (`CameraUniform`)
//! - group 1: per-body object (`ObjectUniform`)
//! - group 2: texture + sampler
//! - group 3: sun light (`SunLightUniform`)

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::buffer::VertexPositionNormalUv;
use crate::camera::CameraUniform;
use crate::depth::DepthBuffer;
use crate::light::SunLightUniform;

const SOLAR_SHADER: &str = include_str!("shaders/solar.wgsl");
const BACKGROUND_SHADER: &str = include_str!("shaders/background.wgsl");

/// Per-body uniform, 80 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// x = 1 for emissive bodies that ignore lighting.
    pub params: [f32; 4],
}

impl ObjectUniform {
    pub fn new(model: Mat4, emissive: bool) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            params: [if emissive { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

fn uniform_layout(
    device: &wgpu::Device,
    label: &str,
    visibility: wgpu::ShaderStages,
    size: usize,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(size as u64),
            },
            count: None,
        }],
    })
}

/// Bind a whole uniform buffer at binding 0 of `layout`.
pub fn uniform_bind_group(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}

/// Textured, optionally lit sphere pipeline.
pub struct SolarPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub camera_layout: wgpu::BindGroupLayout,
    pub object_layout: wgpu::BindGroupLayout,
    pub light_layout: wgpu::BindGroupLayout,
}

impl SolarPipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let vertex_fragment = wgpu::ShaderStages::VERTEX_FRAGMENT;
        let camera_layout = uniform_layout(
            device,
            "camera-bind-group-layout",
            vertex_fragment,
            std::mem::size_of::<CameraUniform>(),
        );
        let object_layout = uniform_layout(
            device,
            "object-bind-group-layout",
            vertex_fragment,
            std::mem::size_of::<ObjectUniform>(),
        );
        let light_layout = uniform_layout(
            device,
            "sun-light-bind-group-layout",
            wgpu::ShaderStages::FRAGMENT,
            std::mem::size_of::<SunLightUniform>(),
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("solar-shader"),
            source: wgpu::ShaderSource::Wgsl(SOLAR_SHADER.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("solar-pipeline-layout"),
            bind_group_layouts: &[&camera_layout, &object_layout, texture_layout, &light_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("solar-pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[VertexPositionNormalUv::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Sphere triangles wind clockwise seen from outside.
                front_face: wgpu::FrontFace::Cw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(DepthBuffer::stencil_state(true)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(surface_format.into())],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            camera_layout,
            object_layout,
            light_layout,
        }
    }
}

/// Full-screen textured quad drawn behind everything else.
///
/// Depth-tested but not depth-writing, so it only fills pixels no body covered.
pub struct BackgroundPipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl BackgroundPipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("background-shader"),
            source: wgpu::ShaderSource::Wgsl(BACKGROUND_SHADER.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("background-pipeline-layout"),
            bind_group_layouts: &[texture_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("background-pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[VertexPositionNormalUv::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(DepthBuffer::stencil_state(false)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(surface_format.into())],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self { pipeline }
    }
}
