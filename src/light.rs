use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Single directional light shared by the whole scene.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    pub color: Vec3,
    pub direction: Vec3,
    pub ambient_intensity: f32,
    pub diffuse_intensity: f32,
    pub specular_intensity: f32,
}

impl DirectionalLight {
    pub fn new() -> Self {
        Self {
            color: Vec3::ONE,
            direction: Vec3::Y,
            ambient_intensity: 0.5,
            diffuse_intensity: 0.8,
            specular_intensity: 1.0,
        }
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU-side layout of the light, padded to 16-byte rows for WGSL.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightUniform {
    pub direction: [f32; 3],
    pub _pad0: f32,
    pub color: [f32; 3],
    pub ambient_intensity: f32,
    pub diffuse_intensity: f32,
    pub specular_intensity: f32,
    pub _pad1: [f32; 2],
}

impl DirectionalLight {
    pub fn to_uniform(&self) -> LightUniform {
        LightUniform {
            direction: self.direction.to_array(),
            _pad0: 0.0,
            color: self.color.to_array(),
            ambient_intensity: self.ambient_intensity,
            diffuse_intensity: self.diffuse_intensity,
            specular_intensity: self.specular_intensity,
            _pad1: [0.0; 2],
        }
    }
}
