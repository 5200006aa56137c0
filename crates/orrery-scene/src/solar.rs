//! Sun, earth and moon: orbit angles and the transform chain built from them.

use glam::{Mat4, Quat, Vec3};
use orrery_config::SceneConfig;

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Model matrices for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTransforms {
    pub sun: Mat4,
    pub earth: Mat4,
    pub moon: Mat4,
}

/// Orbit state of the three bodies. Angles are in degrees, rates in degrees per second.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarSystem {
    pub sun_radius: f32,
    pub earth_distance: f32,
    pub earth_scale: f32,
    pub moon_distance: f32,
    pub moon_scale: f32,
    /// Tilt of earth's spin axis away from the orbit normal.
    pub obliquity: f32,
    pub earth_orbit: f32,
    pub earth_spin: f32,
    pub moon_orbit: f32,
    pub earth_orbit_rate: f32,
    pub earth_spin_rate: f32,
    pub moon_orbit_rate: f32,
    pub time_scale: f32,
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

impl SolarSystem {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            sun_radius: config.sun_radius,
            earth_distance: config.earth_distance,
            earth_scale: config.earth_scale,
            moon_distance: config.moon_distance,
            moon_scale: config.moon_scale,
            obliquity: config.obliquity_degrees,
            earth_orbit: wrap_degrees(config.earth_orbit_start_degrees),
            earth_spin: 0.0,
            moon_orbit: wrap_degrees(config.moon_orbit_start_degrees),
            earth_orbit_rate: config.earth_orbit_rate,
            earth_spin_rate: config.earth_spin_rate,
            moon_orbit_rate: config.moon_orbit_rate,
            time_scale: config.time_scale,
        }
    }

    /// Step every angle by `rate * dt` and wrap it.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt * self.time_scale;
        self.earth_orbit = wrap_degrees(self.earth_orbit + self.earth_orbit_rate * dt);
        self.earth_spin = wrap_degrees(self.earth_spin + self.earth_spin_rate * dt);
        self.moon_orbit = wrap_degrees(self.moon_orbit + self.moon_orbit_rate * dt);
    }

    /// Earth's centre in world space.
    pub fn earth_position(&self) -> Vec3 {
        Quat::from_rotation_y(self.earth_orbit.to_radians()) * Vec3::new(self.earth_distance, 0.0, 0.0)
    }

    /// Earth's spin axis, tilted towards +x.
    pub fn earth_axis(&self) -> Vec3 {
        Quat::from_rotation_z(-self.obliquity.to_radians()) * Vec3::Y
    }

    #[cfg(test)]
    fn moon_position(&self) -> Vec3 {
        self.transforms().moon.w_axis.truncate()
    }

    pub fn transforms(&self) -> BodyTransforms {
        let tilt = Mat4::from_rotation_z(-self.obliquity.to_radians());
        let earth_pos = self.earth_position();

        let sun = Mat4::from_scale(Vec3::splat(self.sun_radius));

        let earth = Mat4::from_translation(earth_pos)
            * tilt
            * Mat4::from_rotation_y((self.earth_orbit + self.earth_spin).to_radians())
            * Mat4::from_scale(Vec3::splat(self.earth_scale));

        let moon = Mat4::from_translation(earth_pos)
            * Mat4::from_axis_angle(self.earth_axis(), self.moon_orbit.to_radians())
            * tilt
            * Mat4::from_translation(Vec3::new(self.moon_distance, 0.0, 0.0))
            * Mat4::from_scale(Vec3::splat(self.moon_scale));

        BodyTransforms { sun, earth, moon }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn untilted() -> SolarSystem {
        SolarSystem {
            obliquity: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(370.0), 10.0);
        assert_eq!(wrap_degrees(-10.0), 350.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert!((0.0..360.0).contains(&wrap_degrees(-1e-9)));
    }

    #[test]
    fn test_defaults() {
        let s = SolarSystem::default();
        assert_eq!(s.earth_orbit, 20.0);
        assert_eq!(s.moon_orbit, 20.0);
        assert_eq!(s.earth_spin, 0.0);
        assert_eq!(s.earth_orbit_rate, 1.5);
        assert_eq!(s.moon_orbit_rate, 10.5);
        assert_eq!(s.earth_spin_rate, 30.0);
    }

    #[test]
    fn test_advance_uses_rates() {
        let mut s = SolarSystem::default();
        s.advance(2.0);
        assert!((s.earth_orbit - 23.0).abs() < EPS);
        assert!((s.moon_orbit - 41.0).abs() < EPS);
        assert!((s.earth_spin - 60.0).abs() < EPS);
    }

    #[test]
    fn test_advance_wraps() {
        let mut s = SolarSystem::default();
        for _ in 0..1000 {
            s.advance(1.0);
            for angle in [s.earth_orbit, s.earth_spin, s.moon_orbit] {
                assert!((0.0..360.0).contains(&angle), "{angle} escaped [0, 360)");
            }
        }
    }

    #[test]
    fn test_time_scale_zero_freezes() {
        let mut s = SolarSystem {
            time_scale: 0.0,
            ..Default::default()
        };
        let before = s.clone();
        s.advance(5.0);
        assert_eq!(s, before);
    }

    #[test]
    fn test_sun_is_scaled_identity() {
        assert_eq!(SolarSystem::default().transforms().sun, Mat4::IDENTITY);
    }

    #[test]
    fn test_earth_distance_from_sun() {
        let mut s = SolarSystem::default();
        for _ in 0..50 {
            s.advance(0.7);
            assert!((s.earth_position().length() - s.earth_distance).abs() < EPS);
            assert!(s.earth_position().y.abs() < EPS);
        }
    }

    #[test]
    fn test_untilted_earth_matches_orbit_then_translate() {
        let s = untilted();
        let expected = Mat4::from_rotation_y(s.earth_orbit.to_radians())
            * Mat4::from_translation(Vec3::new(s.earth_distance, 0.0, 0.0))
            * Mat4::from_scale(Vec3::splat(s.earth_scale));
        assert!(s.transforms().earth.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn test_earth_spins_about_tilted_axis() {
        let s = SolarSystem::default();
        let earth = s.transforms().earth;
        let north_pole = earth.transform_point3(Vec3::Y);
        let axis = (north_pole - s.earth_position()).normalize();
        assert!(axis.abs_diff_eq(s.earth_axis(), EPS));
        assert!((s.earth_axis().angle_between(Vec3::Y).to_degrees() - 23.5).abs() < 1e-3);
    }

    #[test]
    fn test_moon_keeps_distance_in_plane_perpendicular_to_axis() {
        let mut s = SolarSystem::default();
        for _ in 0..40 {
            s.advance(1.3);
            let offset = s.moon_position() - s.earth_position();
            assert!((offset.length() - s.moon_distance).abs() < EPS);
            assert!(offset.dot(s.earth_axis()).abs() < EPS);
        }
    }

    #[test]
    fn test_moon_scale() {
        let s = SolarSystem::default();
        let moon = s.transforms().moon;
        let radius = (moon.transform_point3(Vec3::X) - moon.transform_point3(Vec3::ZERO)).length();
        assert!((radius - s.moon_scale).abs() < EPS);
    }

    #[test]
    fn test_from_config_wraps_start_angles() {
        let config = SceneConfig {
            earth_orbit_start_degrees: 380.0,
            moon_orbit_start_degrees: -30.0,
            ..Default::default()
        };
        let s = SolarSystem::from_config(&config);
        assert!((s.earth_orbit - 20.0).abs() < EPS);
        assert!((s.moon_orbit - 330.0).abs() < EPS);
    }
}
