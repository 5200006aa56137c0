//! Scene state for the orrery: orbiting bodies, the camera rig and the sun light,
//! flattened into the uniforms the renderer consumes each frame.

pub mod free_camera;
pub mod orbit_camera;
pub mod rig;
pub mod solar;

pub use free_camera::FreeCamera;
pub use orbit_camera::OrbitCamera;
pub use rig::CameraRig;
pub use solar::{BodyTransforms, SolarSystem, wrap_degrees};

use orrery_config::{Config, Stage};
use orrery_input::ControlFrame;
use orrery_render::{Camera, FrameData, ObjectUniform, SunLight};

pub struct Scene {
    pub stage: Stage,
    pub system: SolarSystem,
    pub rig: CameraRig,
    pub camera: Camera,
    pub light: SunLight,
}

impl Scene {
    pub fn from_config(config: &Config, width: u32, height: u32) -> Self {
        let stage = config.scene.stage;
        let mut camera = camera_from_config(config);
        camera.set_viewport(width, height);
        let rig = CameraRig::for_stage(stage, &config.camera);
        rig.apply(&mut camera);

        tracing::info!(?stage, "Scene created");

        Self {
            stage,
            system: SolarSystem::from_config(&config.scene),
            rig,
            camera,
            light: SunLight {
                enabled: stage.lighting(),
                ..Default::default()
            },
        }
    }

    /// One fixed simulation step.
    pub fn fixed_update(&mut self, controls: &ControlFrame, dt: f32) {
        self.system.advance(dt);
        self.rig.step(controls, dt);
        self.rig.apply(&mut self.camera);
    }

    /// Input that arrives once per rendered frame.
    pub fn frame_input(&mut self, controls: &ControlFrame) {
        if controls.reset_camera {
            self.rig.reset();
            tracing::debug!("Camera reset");
        }
        self.rig.apply_frame_input(controls);
        self.rig.apply(&mut self.camera);
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    /// Pick up a reloaded config. Orbit angles carry over; the camera keeps its
    /// orientation and takes the new camera settings unless the stage changed.
    pub fn apply_config(&mut self, config: &Config) {
        let mut system = SolarSystem::from_config(&config.scene);
        system.earth_orbit = self.system.earth_orbit;
        system.earth_spin = self.system.earth_spin;
        system.moon_orbit = self.system.moon_orbit;
        self.system = system;

        let aspect_ratio = self.camera.aspect_ratio;
        self.camera = Camera {
            aspect_ratio,
            ..camera_from_config(config)
        };

        if config.scene.stage != self.stage {
            tracing::info!(from = ?self.stage, to = ?config.scene.stage, "Stage changed");
            self.stage = config.scene.stage;
            self.rig = CameraRig::for_stage(self.stage, &config.camera);
        } else {
            self.rig.set_config(&config.camera);
        }
        self.light.enabled = self.stage.lighting();
        self.rig.apply(&mut self.camera);
    }

    pub fn frame_data(&self) -> FrameData {
        let transforms = self.system.transforms();
        FrameData {
            camera: self.camera.to_uniform(),
            bodies: [
                ObjectUniform::new(transforms.sun, true),
                ObjectUniform::new(transforms.earth, false),
                ObjectUniform::new(transforms.moon, false),
            ],
            light: self.light.to_uniform(),
        }
    }
}

fn camera_from_config(config: &Config) -> Camera {
    Camera {
        fov_y: config.render.fov_degrees.to_radians(),
        near: config.render.near,
        far: config.render.far,
        ..Default::default()
    }
}
