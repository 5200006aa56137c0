//! The sun as a point light.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// CPU-side description of the light emitted by the sun.
#[derive(Clone, Debug, PartialEq)]
pub struct SunLight {
    pub position: Vec3,
    /// Linear RGB.
    pub color: Vec3,
    pub intensity: f32,
    /// Light reaching surfaces facing away from the sun.
    pub ambient: Vec3,
    pub specular_strength: f32,
    pub shininess: f32,
    /// When false every surface is drawn with its plain texture colour.
    pub enabled: bool,
}

impl Default for SunLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: Vec3::new(1.0, 0.95, 0.85),
            intensity: 1.2,
            ambient: Vec3::splat(0.06),
            specular_strength: 0.25,
            shininess: 24.0,
            enabled: true,
        }
    }
}

/// GPU layout of [`SunLight`], 64 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SunLightUniform {
    /// xyz = position, w unused.
    pub position: [f32; 4],
    /// xyz = colour, w = intensity.
    pub color_intensity: [f32; 4],
    /// xyz = ambient, w = specular strength.
    pub ambient_specular: [f32; 4],
    /// x = shininess, y = 1 when lighting is on.
    pub params: [f32; 4],
}

impl SunLight {
    pub fn to_uniform(&self) -> SunLightUniform {
        SunLightUniform {
            position: self.position.extend(1.0).to_array(),
            color_intensity: self.color.extend(self.intensity).to_array(),
            ambient_specular: self.ambient.extend(self.specular_strength).to_array(),
            params: [
                self.shininess,
                if self.enabled { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ],
        }
    }
}

/// CPU mirror of the fragment shader's lighting, for a texel of colour `albedo`.
#[cfg(test)]
pub(crate) fn shade(light: &SunLight, albedo: Vec3, world_pos: Vec3, normal: Vec3, eye: Vec3) -> Vec3 {
    if !light.enabled {
        return albedo;
    }
    let n = normal.normalize_or_zero();
    let l = (light.position - world_pos).normalize_or_zero();
    let v = (eye - world_pos).normalize_or_zero();
    let h = (l + v).normalize_or_zero();
    let diffuse = n.dot(l).max(0.0);
    let specular = if diffuse > 0.0 {
        n.dot(h).max(0.0).powf(light.shininess) * light.specular_strength
    } else {
        0.0
    };
    let radiance = light.color * light.intensity;
    albedo * (light.ambient + radiance * diffuse) + radiance * specular
}
