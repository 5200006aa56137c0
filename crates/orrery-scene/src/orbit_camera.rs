//! Camera circling the sun at a fixed distance, turned with the arrow keys.

use glam::{Mat4, Quat, Vec2, Vec3};
use orrery_config::CameraConfig;
use orrery_render::Camera;

const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// `view = T(0, 0, -distance) * R_y(yaw) * R_x(pitch)`, angles in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    /// Degrees per second at full arrow-key deflection.
    pub turn_rate: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl OrbitCamera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            distance: config.orbit_distance,
            yaw: 0.0,
            pitch: 0.0,
            turn_rate: config.orbit_turn_rate,
        }
    }

    /// Take distance and turn rate from `config`; yaw and pitch are kept.
    pub fn set_config(&mut self, config: &CameraConfig) {
        self.distance = config.orbit_distance;
        self.turn_rate = config.orbit_turn_rate;
    }

    /// Turn by `input * turn_rate * dt`; `input.x` is yaw, `input.y` pitch.
    pub fn turn(&mut self, input: Vec2, dt: f32) {
        let step = input * self.turn_rate * dt;
        self.yaw = crate::solar::wrap_degrees(self.yaw + step.x);
        self.pitch = (self.pitch + step.y).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
    }

    pub fn reset(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
            * Mat4::from_rotation_y(self.yaw.to_radians())
            * Mat4::from_rotation_x(self.pitch.to_radians())
    }

    /// Place `camera` so that its view matrix equals [`view_matrix`](Self::view_matrix).
    pub fn apply(&self, camera: &mut Camera) {
        let rotation = Quat::from_rotation_x(-self.pitch.to_radians())
            * Quat::from_rotation_y(-self.yaw.to_radians());
        camera.rotation = rotation;
        camera.position = rotation * Vec3::new(0.0, 0.0, self.distance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_looks_at_sun_from_plus_z() {
        let orbit = OrbitCamera::default();
        let mut camera = Camera::default();
        orbit.apply(&mut camera);
        assert!(camera.position.abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-5));
        assert!(camera.forward().abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn test_camera_view_equals_chain() {
        let mut orbit = OrbitCamera::default();
        let mut camera = Camera::default();
        for (yaw, pitch) in [(0.0, 0.0), (30.0, 10.0), (200.0, -45.0), (359.0, 80.0)] {
            orbit.yaw = yaw;
            orbit.pitch = pitch;
            orbit.apply(&mut camera);
            assert!(
                camera.view_matrix().abs_diff_eq(orbit.view_matrix(), 1e-4),
                "yaw {yaw} pitch {pitch}"
            );
        }
    }

    #[test]
    fn test_sun_stays_centred() {
        let mut orbit = OrbitCamera::default();
        orbit.turn(Vec2::new(1.0, 0.5), 1.3);
        let centre = orbit.view_matrix().transform_point3(Vec3::ZERO);
        assert!(centre.abs_diff_eq(Vec3::new(0.0, 0.0, -orbit.distance), 1e-5));
    }

    #[test]
    fn test_set_config_keeps_angles() {
        let mut orbit = OrbitCamera::default();
        orbit.turn(Vec2::new(1.0, 1.0), 0.5);
        let (yaw, pitch) = (orbit.yaw, orbit.pitch);
        orbit.set_config(&CameraConfig {
            orbit_distance: 12.0,
            orbit_turn_rate: 90.0,
            ..Default::default()
        });
        assert_eq!((orbit.yaw, orbit.pitch), (yaw, pitch));
        assert_eq!(orbit.distance, 12.0);
        assert_eq!(orbit.turn_rate, 90.0);
    }

    #[test]
    fn test_turn_rate_and_pitch_clamp() {
        let mut orbit = OrbitCamera::default();
        orbit.turn(Vec2::X, 1.0);
        assert!((orbit.yaw - 45.0).abs() < 1e-4);
        orbit.turn(Vec2::NEG_X, 2.0);
        assert!((orbit.yaw - 315.0).abs() < 1e-4);
        orbit.turn(Vec2::Y, 10.0);
        assert_eq!(orbit.pitch, PITCH_LIMIT_DEGREES);
        orbit.reset();
        assert_eq!((orbit.yaw, orbit.pitch), (0.0, 0.0));
    }
}
