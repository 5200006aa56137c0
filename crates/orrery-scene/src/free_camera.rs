//! Free-fly camera: mouse look, WASD + Space/Ctrl movement, wheel for speed.

use glam::{Quat, Vec2, Vec3};
use orrery_config::CameraConfig;
use orrery_render::Camera;

/// Radians per pixel of mouse motion at sensitivity 1.
const BASE_SENSITIVITY: f32 = 0.003;

#[derive(Debug, Clone, PartialEq)]
pub struct FreeCamera {
    pub position: Vec3,
    /// Radians.
    pub yaw: f32,
    /// Radians, clamped to ±89°.
    pub pitch: f32,
    /// Units per second.
    pub speed: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Multiplier per wheel notch.
    pub speed_scroll_factor: f32,
    pub mouse_sensitivity: f32,
    pub invert_y: bool,
    home: Vec3,
    home_speed: f32,
}

impl Default for FreeCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl FreeCamera {
    /// Starts where the orbit camera would, looking at the sun.
    pub fn from_config(config: &CameraConfig) -> Self {
        let home = Vec3::new(0.0, 0.0, config.orbit_distance);
        Self {
            position: home,
            yaw: 0.0,
            pitch: 0.0,
            speed: config.move_speed,
            speed_min: 0.05,
            speed_max: 100.0,
            speed_scroll_factor: 1.2,
            mouse_sensitivity: BASE_SENSITIVITY * config.mouse_sensitivity,
            invert_y: config.invert_y,
            home,
            home_speed: config.move_speed,
        }
    }

    /// Take speed, sensitivity and home from `config`; position and
    /// orientation are kept.
    pub fn set_config(&mut self, config: &CameraConfig) {
        self.home = Vec3::new(0.0, 0.0, config.orbit_distance);
        self.home_speed = config.move_speed;
        self.speed = config.move_speed.clamp(self.speed_min, self.speed_max);
        self.mouse_sensitivity = BASE_SENSITIVITY * config.mouse_sensitivity;
        self.invert_y = config.invert_y;
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Rotate by a mouse delta in pixels; `delta.y` grows downward.
    pub fn look(&mut self, delta: Vec2) {
        let dy = if self.invert_y { -delta.y } else { delta.y };
        self.yaw -= delta.x * self.mouse_sensitivity;
        self.pitch -= dy * self.mouse_sensitivity;
        let limit = 89.0_f32.to_radians();
        self.pitch = self.pitch.clamp(-limit, limit);
    }

    /// Move along camera-local `input` (`x` right, `y` world up, `z` forward) for `dt` seconds.
    pub fn fly(&mut self, input: Vec3, dt: f32) {
        let rotation = self.rotation();
        let forward = rotation * Vec3::NEG_Z;
        let right = rotation * Vec3::X;
        let dir = forward * input.z + right * input.x + Vec3::Y * input.y;
        if dir.length_squared() > 1e-6 {
            self.position += dir.normalize() * self.speed * dt;
        }
    }

    /// Scale speed by one factor per wheel notch.
    pub fn adjust_speed(&mut self, steps: f32) {
        if steps == 0.0 {
            return;
        }
        self.speed *= self.speed_scroll_factor.powf(steps);
        self.speed = self.speed.clamp(self.speed_min, self.speed_max);
    }

    pub fn reset(&mut self) {
        self.position = self.home;
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.speed = self.home_speed;
    }

    pub fn apply(&self, camera: &mut Camera) {
        camera.position = self.position;
        camera.rotation = self.rotation();
    }
}
