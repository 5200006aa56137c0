//! The active camera controller, chosen by stage.

use orrery_config::{CameraConfig, Stage};
use orrery_input::ControlFrame;
use orrery_render::Camera;

use crate::free_camera::FreeCamera;
use crate::orbit_camera::OrbitCamera;

#[derive(Debug, Clone, PartialEq)]
pub enum CameraRig {
    Orbit(OrbitCamera),
    Free(FreeCamera),
}

impl CameraRig {
    pub fn for_stage(stage: Stage, config: &CameraConfig) -> Self {
        if stage.free_camera() {
            Self::Free(FreeCamera::from_config(config))
        } else {
            Self::Orbit(OrbitCamera::from_config(config))
        }
    }

    /// Apply new camera settings without moving the camera.
    pub fn set_config(&mut self, config: &CameraConfig) {
        match self {
            Self::Orbit(orbit) => orbit.set_config(config),
            Self::Free(free) => free.set_config(config),
        }
    }

    /// Held-key motion, integrated over `dt` seconds.
    pub fn step(&mut self, controls: &ControlFrame, dt: f32) {
        match self {
            Self::Orbit(orbit) => orbit.turn(controls.orbit, dt),
            Self::Free(free) => free.fly(controls.movement, dt),
        }
    }

    /// Per-frame deltas: mouse look and wheel.
    pub fn apply_frame_input(&mut self, controls: &ControlFrame) {
        if let Self::Free(free) = self {
            free.look(controls.look);
            free.adjust_speed(controls.speed_steps);
        }
    }

    pub fn reset(&mut self) {
        match self {
            Self::Orbit(orbit) => orbit.reset(),
            Self::Free(free) => free.reset(),
        }
    }

    pub fn apply(&self, camera: &mut Camera) {
        match self {
            Self::Orbit(orbit) => orbit.apply(camera),
            Self::Free(free) => free.apply(camera),
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free(_))
    }
}
