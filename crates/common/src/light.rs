use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Number of point lights any shader binding samples per frame.
pub const MAX_LIGHTS: usize = 4;

/// Directional or point light.
///
/// For the sun `direction` is the direction light travels; for point lights
/// it is the world position. Intensity is folded into `colour` on
/// construction and not kept separately.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Light {
    pub direction: Vec3,
    pub colour: Vec3,
}

impl Light {
    pub fn new(direction: Vec3, colour: Vec3, intensity: f32) -> Self {
        Self {
            direction,
            colour: colour * intensity,
        }
    }
}

/// Explicit Phong coefficients, bound in place of mesh-supplied material data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub specular_power: f32,
}

impl Material {
    pub fn new(ambient: Vec3, diffuse: Vec3, specular: Vec3, specular_power: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            specular_power,
        }
    }
}
