//! Frame command encoding and render pass setup.

/// Describes the main pass: colour clear plus an optional reverse-Z depth clear.
#[derive(Debug, Clone, Copy)]
pub struct RenderPassBuilder<'a> {
    clear_color: wgpu::Color,
    depth: Option<&'a wgpu::TextureView>,
    label: Option<&'static str>,
}

impl Default for RenderPassBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> RenderPassBuilder<'a> {
    /// White clear, no depth.
    pub fn new() -> Self {
        Self {
            clear_color: wgpu::Color::WHITE,
            depth: None,
            label: None,
        }
    }

    pub fn clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Clear `view` to [`DepthBuffer::CLEAR_VALUE`](crate::DepthBuffer::CLEAR_VALUE).
    pub fn depth(mut self, view: &'a wgpu::TextureView) -> Self {
        self.depth = Some(view);
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn begin<'e>(
        &self,
        encoder: &'e mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
    ) -> wgpu::RenderPass<'e> {
        let depth_stencil_attachment =
            self.depth
                .map(|view| wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(crate::DepthBuffer::CLEAR_VALUE),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: self.label,
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

/// One frame: the acquired swapchain image and the encoder recording into it.
///
/// [`finish`](Self::finish) submits the commands and presents the image.
pub struct FrameEncoder {
    encoder: wgpu::CommandEncoder,
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
}

impl FrameEncoder {
    pub fn new(device: &wgpu::Device, surface_texture: wgpu::SurfaceTexture) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            encoder,
            surface_texture,
            view,
        }
    }

    pub fn begin_render_pass(&mut self, builder: &RenderPassBuilder<'_>) -> wgpu::RenderPass<'_> {
        builder.begin(&mut self.encoder, &self.view)
    }

    pub fn finish(self, queue: &wgpu::Queue) {
        queue.submit(std::iter::once(self.encoder.finish()));
        self.surface_texture.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_test_device_queue;

    #[test]
    fn test_builder_defaults_to_white() {
        let builder = RenderPassBuilder::new();
        assert_eq!(builder.clear_color, wgpu::Color::WHITE);
        assert!(builder.depth.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let color = wgpu::Color {
            r: 0.1,
            g: 0.2,
            b: 0.3,
            a: 1.0,
        };
        let builder = RenderPassBuilder::new().clear_color(color).label("main");
        assert_eq!(builder.clear_color, color);
        assert_eq!(builder.label, Some("main"));
    }

    #[test]
    fn test_pass_with_depth_records() {
        let Some((device, queue)) = create_test_device_queue() else {
            return;
        };
        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen"),
            size: wgpu::Extent3d {
                width: 16,
                height: 16,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let depth = crate::DepthBuffer::new(&device, 16, 16);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor::default());
        {
            let builder = RenderPassBuilder::new().depth(&depth.view);
            let _pass = builder.begin(&mut encoder, &view);
        }
        queue.submit(std::iter::once(encoder.finish()));
    }
}
