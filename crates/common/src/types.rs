use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Handle to a mesh owned by the graphics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshHandle(pub u32);

/// Handle to a linked shader program owned by the graphics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShaderHandle(pub u32);

/// Handle to a loaded texture owned by the graphics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Handle to an offscreen render target owned by the graphics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RenderTargetHandle(pub u32);

/// The geometry an instance draws: either a procedurally built mesh
/// (quads, full-screen quads) or a mesh loaded from a model file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshRef {
    Simple(MeshHandle),
    Loaded(MeshHandle),
}

impl MeshRef {
    pub fn handle(self) -> MeshHandle {
        match self {
            Self::Simple(h) | Self::Loaded(h) => h,
        }
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Build from Euler angles in degrees, applied X first, then Y, then Z.
    pub fn from_euler_degrees(position: Vec3, euler_degrees: Vec3, scale: Vec3) -> Self {
        let rotation = Quat::from_rotation_z(euler_degrees.z.to_radians())
            * Quat::from_rotation_y(euler_degrees.y.to_radians())
            * Quat::from_rotation_x(euler_degrees.x.to_radians());
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Model matrix: translate * rotate * scale.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}
