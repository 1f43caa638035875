use glam::{Mat4, Vec3};
use shoreline_common::{
    Material, MeshRef, RenderTargetHandle, ShaderHandle, TextureHandle, Transform,
};

use crate::backend::{RenderBackend, ShaderBackend, bind_if_declared};
use crate::camera::Camera;
use crate::scene::Scene;
use crate::uniform::{
    PRIMARY_TEXTURE_UNIT, SECONDARY_TEXTURE_UNIT, SHADOW_MAP_UNIT, Uniform, UniformValue,
};

/// What an instance samples as its surface colour.
///
/// A diffuse texture and render targets are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceSource {
    #[default]
    None,
    Texture(TextureHandle),
    /// Colour outputs of offscreen passes, e.g. reflection and refraction.
    Targets {
        primary: RenderTargetHandle,
        secondary: Option<RenderTargetHandle>,
    },
}

/// One positioned, shaded, drawable occurrence of a mesh.
///
/// Mesh, shader, texture and targets are handles; the instance owns none
/// of them.
#[derive(Debug, Clone)]
pub struct Instance {
    transform: Mat4,
    mesh: MeshRef,
    shader: ShaderHandle,
    surface: SurfaceSource,
    material: Option<Material>,
    dimensions: i32,
}

impl Instance {
    pub fn new(transform: Mat4, mesh: MeshRef, shader: ShaderHandle) -> Self {
        Self {
            transform,
            mesh,
            shader,
            surface: SurfaceSource::None,
            material: None,
            dimensions: 1,
        }
    }

    /// Build from position, Euler angles in degrees and scale.
    pub fn from_euler(
        position: Vec3,
        euler_degrees: Vec3,
        scale: Vec3,
        mesh: MeshRef,
        shader: ShaderHandle,
    ) -> Self {
        let transform = Transform::from_euler_degrees(position, euler_degrees, scale).matrix();
        Self::new(transform, mesh, shader)
    }

    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.surface = SurfaceSource::Texture(texture);
        self
    }

    pub fn with_render_targets(
        mut self,
        primary: RenderTargetHandle,
        secondary: Option<RenderTargetHandle>,
    ) -> Self {
        self.surface = SurfaceSource::Targets { primary, secondary };
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_dimensions(mut self, dimensions: i32) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn mesh(&self) -> MeshRef {
        self.mesh
    }

    pub fn shader(&self) -> ShaderHandle {
        self.shader
    }

    pub fn surface(&self) -> SurfaceSource {
        self.surface
    }

    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    pub fn dimensions(&self) -> i32 {
        self.dimensions
    }

    /// Replace the stored shader, e.g. to switch post-processing effects.
    pub fn swap_shader(&mut self, shader: ShaderHandle) {
        self.shader = shader;
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = Some(material);
    }

    pub fn set_dimensions(&mut self, dimensions: i32) {
        self.dimensions = dimensions;
    }

    fn resolve_shader(&self, shader_override: Option<ShaderHandle>) -> ShaderHandle {
        shader_override.unwrap_or(self.shader)
    }

    /// Draw with the full lighting, shadow and material state.
    ///
    /// Every uniform is bound only if the active shader declares it, so the
    /// same routine serves unlit, Phong, textured, water and post shaders.
    pub fn draw<B>(
        &self,
        backend: &mut B,
        scene: &Scene,
        camera: &Camera,
        shader_override: Option<ShaderHandle>,
    ) where
        B: RenderBackend + ?Sized,
    {
        let shader = self.resolve_shader(shader_override);
        backend.bind_shader(shader);

        self.bind_transforms(backend, shader, scene, camera);

        let sun = scene.sunlight();
        let sampled = scene.sampled_point_lights();
        bind_if_declared(backend, shader, Uniform::AmbientColour, || {
            UniformValue::Vec3(scene.ambient_light())
        });
        bind_if_declared(backend, shader, Uniform::LightColour, || {
            UniformValue::Vec3(sun.colour)
        });
        bind_if_declared(backend, shader, Uniform::LightDirection, || {
            UniformValue::Vec3(sun.direction)
        });
        bind_if_declared(backend, shader, Uniform::LightMatrix, || {
            UniformValue::Mat4(scene.light_matrix())
        });
        bind_if_declared(backend, shader, Uniform::OffsetLightMatrix, || {
            UniformValue::Mat4(scene.offset_light_matrix())
        });
        bind_if_declared(backend, shader, Uniform::CameraPosition, || {
            UniformValue::Vec3(camera.position)
        });
        bind_if_declared(backend, shader, Uniform::LightCount, || {
            UniformValue::Int(sampled.count() as i32)
        });
        bind_if_declared(backend, shader, Uniform::PointLightPositions, || {
            UniformValue::Vec3Array(sampled.positions().to_vec())
        });
        bind_if_declared(backend, shader, Uniform::PointLightColours, || {
            UniformValue::Vec3Array(sampled.colours().to_vec())
        });

        if backend.declares_uniform(shader, Uniform::ShadowMap) {
            match scene.shadow_target() {
                Some(target) => {
                    backend.bind_target_depth(target, SHADOW_MAP_UNIT);
                    backend.set_uniform(
                        shader,
                        Uniform::ShadowMap,
                        UniformValue::Sampler(SHADOW_MAP_UNIT),
                    );
                }
                None => tracing::debug!(?shader, "shadow map declared but no shadow target set"),
            }
        }
        let (bias_min, bias_max) = scene.shadow_bias();
        bind_if_declared(backend, shader, Uniform::ShadowBiasMin, || {
            UniformValue::Float(bias_min)
        });
        bind_if_declared(backend, shader, Uniform::ShadowBiasMax, || {
            UniformValue::Float(bias_max)
        });

        bind_if_declared(backend, shader, Uniform::Time, || {
            UniformValue::Float(scene.time())
        });
        bind_if_declared(backend, shader, Uniform::Dimensions, || {
            UniformValue::Int(self.dimensions)
        });

        if let Some(material) = &self.material {
            bind_material(backend, shader, material);
        }

        self.bind_surface(backend, shader);

        backend.draw_mesh(self.mesh);
    }

    /// Draw binding only the spatial transforms. Used for depth-only passes.
    pub fn draw_raw<B>(
        &self,
        backend: &mut B,
        scene: &Scene,
        camera: &Camera,
        shader_override: Option<ShaderHandle>,
    ) where
        B: RenderBackend + ?Sized,
    {
        let shader = self.resolve_shader(shader_override);
        backend.bind_shader(shader);
        self.bind_transforms(backend, shader, scene, camera);
        backend.draw_mesh(self.mesh);
    }

    fn bind_transforms<B>(
        &self,
        backend: &mut B,
        shader: ShaderHandle,
        scene: &Scene,
        camera: &Camera,
    ) where
        B: ShaderBackend + ?Sized,
    {
        bind_if_declared(backend, shader, Uniform::ProjectionViewModel, || {
            let size = scene.window_size();
            UniformValue::Mat4(camera.view_projection(size.x, size.y) * self.transform)
        });
        bind_if_declared(backend, shader, Uniform::ModelMatrix, || {
            UniformValue::Mat4(self.transform)
        });
    }

    fn bind_surface<B>(&self, backend: &mut B, shader: ShaderHandle)
    where
        B: RenderBackend + ?Sized,
    {
        match self.surface {
            SurfaceSource::None => {}
            SurfaceSource::Texture(texture) => {
                if bind_if_declared(backend, shader, Uniform::DiffuseTexture, || {
                    UniformValue::Sampler(PRIMARY_TEXTURE_UNIT)
                }) {
                    backend.bind_texture(texture, PRIMARY_TEXTURE_UNIT);
                }
            }
            SurfaceSource::Targets { primary, secondary } => {
                bind_if_declared(backend, shader, Uniform::DiffuseTexture1, || {
                    UniformValue::Sampler(PRIMARY_TEXTURE_UNIT)
                });
                bind_if_declared(backend, shader, Uniform::DiffuseTexture2, || {
                    UniformValue::Sampler(SECONDARY_TEXTURE_UNIT)
                });
                bind_if_declared(backend, shader, Uniform::ColourTarget, || {
                    UniformValue::Sampler(PRIMARY_TEXTURE_UNIT)
                });
                backend.bind_target_colour(primary, PRIMARY_TEXTURE_UNIT);
                if let Some(secondary) = secondary {
                    backend.bind_target_colour(secondary, SECONDARY_TEXTURE_UNIT);
                }
            }
        }
    }
}

fn bind_material<B>(backend: &mut B, shader: ShaderHandle, material: &Material)
where
    B: ShaderBackend + ?Sized,
{
    bind_if_declared(backend, shader, Uniform::AmbientCoefficient, || {
        UniformValue::Vec3(material.ambient)
    });
    bind_if_declared(backend, shader, Uniform::DiffuseCoefficient, || {
        UniformValue::Vec3(material.diffuse)
    });
    bind_if_declared(backend, shader, Uniform::SpecularCoefficient, || {
        UniformValue::Vec3(material.specular)
    });
    bind_if_declared(backend, shader, Uniform::SpecularPower, || {
        UniformValue::Float(material.specular_power)
    });
}
