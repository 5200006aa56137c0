//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]; [`run`] owns the
//! event loop until the window closes.

use std::path::PathBuf;
use std::sync::Arc;

use orrery_assets::{AssetError, AssetSet, BodyTexture, PREVIEW_LIMIT};
use orrery_config::{AssetConfig, CliArgs, Config};
use orrery_input::Controls;
use orrery_mesh::{MeshError, background_quad, generate_sphere};
use orrery_render::{
    DepthBuffer, FrameEncoder, RenderContext, RenderContextError, RenderPassBuilder,
    SolarRenderer, SurfaceError, TextureError, init_render_context_blocking,
};
use orrery_scene::Scene;
use tracing::{debug, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::game_loop::GameLoop;

/// Fatal failures. Each one ends the process with a non-zero status.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error(transparent)]
    RenderContext(#[from] RenderContextError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("failed to build sphere mesh: {0}")]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error("GPU out of memory")]
    OutOfMemory,
}

pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let attrs = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ));
    if config.window.fullscreen {
        attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attrs
    }
}

pub fn clear_color(config: &Config) -> wgpu::Color {
    let [r, g, b, a] = config.render.clear_color;
    wgpu::Color { r, g, b, a }
}

pub fn asset_file_name(assets: &AssetConfig, slot: BodyTexture) -> &str {
    match slot {
        BodyTexture::Sun => &assets.sun,
        BodyTexture::Earth => &assets.earth,
        BodyTexture::Moon => &assets.moon,
        BodyTexture::Background => &assets.background,
    }
}

pub fn load_assets(assets: &AssetConfig) -> Result<AssetSet, AssetError> {
    AssetSet::load(&assets.dir, |slot| asset_file_name(assets, slot).to_owned())
}

/// Everything that only exists once the window has a GPU surface.
struct Gpu {
    ctx: RenderContext,
    depth: DepthBuffer,
    renderer: SolarRenderer,
}

pub struct AppState {
    /// Config as read from disk, before CLI overrides.
    file_config: Config,
    /// Effective config.
    pub config: Config,
    cli: CliArgs,
    config_dir: PathBuf,
    pub window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    pub scene: Option<Scene>,
    pub controls: Controls,
    pub game_loop: GameLoop,
    fatal: Option<AppError>,
}

impl AppState {
    pub fn new(file_config: Config, cli: CliArgs, config_dir: PathBuf) -> Self {
        let mut config = file_config.clone();
        config.apply_cli_overrides(&cli);
        Self {
            file_config,
            config,
            cli,
            config_dir,
            window: None,
            gpu: None,
            scene: None,
            controls: Controls::new(),
            game_loop: GameLoop::new(),
            fatal: None,
        }
    }

    /// Window, GPU, textures, meshes, scene; in that order.
    #[instrument(skip_all)]
    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window = Arc::new(event_loop.create_window(window_attributes_from_config(&self.config))?);
        let ctx = init_render_context_blocking(window.clone(), self.config.window.vsync)?;
        let size = window.inner_size();

        let assets = load_assets(&self.config.assets)?;
        if self.config.debug.dump_images {
            for slot in BodyTexture::ALL {
                info!(texture = slot.label(), "{}", assets.get(slot).preview(PREVIEW_LIMIT));
            }
        }

        let render = &self.config.render;
        let sphere = generate_sphere(1.0, render.sphere_x_segments, render.sphere_y_segments, true)?;
        info!(
            vertices = sphere.vertex_count(),
            indices = sphere.index_count(),
            degenerate_triangles = sphere.degenerate_triangle_count(),
            "Sphere mesh generated"
        );
        let quad = background_quad(DepthBuffer::reversed(render.background_depth));

        let scene = Scene::from_config(&self.config, size.width, size.height);
        let renderer = SolarRenderer::new(
            &ctx.device,
            &ctx.queue,
            ctx.surface_format,
            &assets,
            &sphere,
            &quad,
            &scene.frame_data(),
        )?;
        let (width, height) = ctx.size();
        let depth = DepthBuffer::new(&ctx.device, width, height);

        self.gpu = Some(Gpu {
            ctx,
            depth,
            renderer,
        });
        self.scene = Some(scene);
        self.window = Some(window);
        self.game_loop.restart();
        Ok(())
    }

    /// Stop the loop; [`run`] hands `err` back to the caller.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(gpu) = &mut self.gpu {
            gpu.ctx.resize(width, height);
            let (w, h) = gpu.ctx.size();
            gpu.depth.resize(&gpu.ctx.device, w, h);
        }
        if let Some(scene) = &mut self.scene {
            scene.set_viewport(width, height);
        }
        debug!(width, height, "Window resized");
    }

    fn set_cursor_captured(&mut self, captured: bool) {
        if let Some(window) = &self.window {
            self.controls.mouse.set_captured(window, captured);
        }
    }

    /// Re-read `config.ron` and push the changes into the scene. Window and
    /// mesh settings take effect on the next start.
    fn reload_config(&mut self) {
        match self.file_config.reload(&self.config_dir) {
            Ok(Some(file_config)) => {
                let mut config = file_config.clone();
                config.apply_cli_overrides(&self.cli);
                if let Some(scene) = &mut self.scene {
                    scene.apply_config(&config);
                }
                let free_camera = self.scene.as_ref().is_some_and(|scene| scene.rig.is_free());
                if !free_camera && self.controls.mouse.is_captured() {
                    self.set_cursor_captured(false);
                }
                self.file_config = file_config;
                self.config = config;
            }
            Ok(None) => info!("Config unchanged"),
            Err(err) => warn!("Config reload failed: {err}"),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let free_camera = self.scene.as_ref().is_some_and(|scene| scene.rig.is_free());
        let controls = self.controls.frame(free_camera);
        if controls.quit {
            info!("Escape pressed, shutting down");
            event_loop.exit();
            return;
        }
        if controls.capture_cursor {
            self.set_cursor_captured(true);
        }
        if controls.release_cursor {
            self.set_cursor_captured(false);
        }
        if controls.reload_config {
            self.reload_config();
        }

        if let Some(scene) = &mut self.scene {
            scene.frame_input(&controls);
            self.game_loop
                .tick(|dt| scene.fixed_update(&controls, dt as f32));
        }

        if let Err(err) = self.render() {
            self.fail(event_loop, err);
            return;
        }
        self.controls.end_frame();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn render(&self) -> Result<(), AppError> {
        let (Some(gpu), Some(scene)) = (&self.gpu, &self.scene) else {
            return Ok(());
        };

        let surface_texture = match gpu.ctx.get_current_texture() {
            Ok(texture) => texture,
            Err(SurfaceError::Timeout) => {
                warn!("Surface timeout, skipping frame");
                return Ok(());
            }
            Err(SurfaceError::Lost) => {
                warn!("Surface still lost after reconfigure, skipping frame");
                return Ok(());
            }
            Err(SurfaceError::OutOfMemory) => return Err(AppError::OutOfMemory),
        };

        gpu.renderer.prepare(&gpu.ctx.queue, &scene.frame_data());

        let mut frame = FrameEncoder::new(&gpu.ctx.device, surface_texture);
        {
            let builder = RenderPassBuilder::new()
                .clear_color(clear_color(&self.config))
                .depth(&gpu.depth.view)
                .label("main-pass");
            let mut pass = frame.begin_render_pass(&builder);
            gpu.renderer.draw(&mut pass);
        }
        frame.finish(&gpu.ctx.queue);
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match self.initialize(event_loop) {
            Ok(()) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.resize(size.width, size.height);
                }
            }
            WindowEvent::Focused(false) => {
                self.controls.keyboard.release_all();
                self.set_cursor_captured(false);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.controls.keyboard.process_event(&event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.controls.mouse.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.controls.mouse.on_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.controls.mouse.on_scroll(delta);
            }
            WindowEvent::CursorLeft { .. } => {
                self.controls.mouse.on_cursor_left();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.controls.mouse.on_raw_motion(delta.0, delta.1);
        }
    }
}

/// Run the demo until the window closes.
///
/// `file_config` is the config as loaded from `config_dir`; `cli` overrides
/// are applied on top, and again after every reload.
#[instrument(skip_all)]
pub fn run(file_config: Config, cli: CliArgs, config_dir: PathBuf) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(file_config, cli, config_dir);
    event_loop.run_app(&mut app)?;
    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
