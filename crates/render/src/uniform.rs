//! The fixed menu of shader uniforms an instance knows how to supply.
//!
//! Shaders are never assumed to declare anything: the draw routine asks the
//! backend whether the active program declares a uniform before binding it.

use glam::{Mat4, Vec3};
use serde::Serialize;

/// Texture unit reserved for the shadow map.
pub const SHADOW_MAP_UNIT: u32 = 7;
/// Texture unit for a diffuse texture or the primary render target.
pub const PRIMARY_TEXTURE_UNIT: u32 = 1;
/// Texture unit for the secondary render target.
pub const SECONDARY_TEXTURE_UNIT: u32 = 2;

/// A named uniform slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Uniform {
    ProjectionViewModel,
    ModelMatrix,
    AmbientColour,
    LightColour,
    LightDirection,
    LightMatrix,
    OffsetLightMatrix,
    CameraPosition,
    LightCount,
    PointLightPositions,
    PointLightColours,
    ShadowMap,
    ShadowBiasMin,
    ShadowBiasMax,
    Time,
    Dimensions,
    AmbientCoefficient,
    DiffuseCoefficient,
    SpecularCoefficient,
    SpecularPower,
    DiffuseTexture,
    DiffuseTexture1,
    DiffuseTexture2,
    ColourTarget,
    /// Light-space matrix consumed by the shadow-generation program.
    ShadowCasterMatrix,
}

impl Uniform {
    pub const ALL: [Uniform; 25] = [
        Uniform::ProjectionViewModel,
        Uniform::ModelMatrix,
        Uniform::AmbientColour,
        Uniform::LightColour,
        Uniform::LightDirection,
        Uniform::LightMatrix,
        Uniform::OffsetLightMatrix,
        Uniform::CameraPosition,
        Uniform::LightCount,
        Uniform::PointLightPositions,
        Uniform::PointLightColours,
        Uniform::ShadowMap,
        Uniform::ShadowBiasMin,
        Uniform::ShadowBiasMax,
        Uniform::Time,
        Uniform::Dimensions,
        Uniform::AmbientCoefficient,
        Uniform::DiffuseCoefficient,
        Uniform::SpecularCoefficient,
        Uniform::SpecularPower,
        Uniform::DiffuseTexture,
        Uniform::DiffuseTexture1,
        Uniform::DiffuseTexture2,
        Uniform::ColourTarget,
        Uniform::ShadowCasterMatrix,
    ];

    /// Name as declared in shader source.
    pub fn name(self) -> &'static str {
        match self {
            Uniform::ProjectionViewModel => "ProjectionViewModel",
            Uniform::ModelMatrix => "ModelMatrix",
            Uniform::AmbientColour => "AmbientColour",
            Uniform::LightColour => "LightColour",
            Uniform::LightDirection => "LightDirection",
            Uniform::LightMatrix => "LightMatrix",
            Uniform::OffsetLightMatrix => "offsetLightMatrix",
            Uniform::CameraPosition => "cameraPosition",
            Uniform::LightCount => "numLights",
            Uniform::PointLightPositions => "PointLightPosition",
            Uniform::PointLightColours => "PointLightColour",
            Uniform::ShadowMap => "shadowMap",
            Uniform::ShadowBiasMin => "shadowBiasMin",
            Uniform::ShadowBiasMax => "shadowBiasMax",
            Uniform::Time => "time",
            Uniform::Dimensions => "dimensions",
            Uniform::AmbientCoefficient => "Ka",
            Uniform::DiffuseCoefficient => "Kd",
            Uniform::SpecularCoefficient => "Ks",
            Uniform::SpecularPower => "specularPower",
            Uniform::DiffuseTexture => "diffuseTexture",
            Uniform::DiffuseTexture1 => "diffuseTexture1",
            Uniform::DiffuseTexture2 => "diffuseTexture2",
            Uniform::ColourTarget => "colourTarget",
            Uniform::ShadowCasterMatrix => "lightMatrix",
        }
    }

    /// Reverse lookup by shader-source name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Uniform> {
        Self::ALL.into_iter().find(|u| u.name() == name)
    }
}

impl std::fmt::Display for Uniform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed value for a uniform slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3(Vec3),
    Mat4(Mat4),
    Vec3Array(Vec<Vec3>),
    /// Texture unit index for a sampler uniform.
    Sampler(u32),
}
