//! Seams to the graphics API.
//!
//! The core never touches GPU objects directly. Meshes, shader programs,
//! textures and render targets live behind handles owned by whatever
//! implements these traits, and must outlive every scene that refers to them.

use glam::{Mat4, Vec4};
use serde::Serialize;
use shoreline_common::{MeshRef, RenderTargetHandle, ShaderHandle, TextureHandle};

use crate::uniform::{Uniform, UniformValue};

/// Which triangle faces are culled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CullFace {
    Front,
    Back,
}

/// Rasterisation mode for polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PolygonMode {
    Fill,
    Line,
}

pub trait ShaderBackend {
    /// Make `shader` the active program.
    fn bind_shader(&mut self, shader: ShaderHandle);
    /// Whether `shader` declares `uniform` (reflection query).
    fn declares_uniform(&self, shader: ShaderHandle, uniform: Uniform) -> bool;
    fn set_uniform(&mut self, shader: ShaderHandle, uniform: Uniform, value: UniformValue);
}

pub trait MeshBackend {
    /// Issue the draw call for a mesh's geometry.
    fn draw_mesh(&mut self, mesh: MeshRef);
}

pub trait TextureBackend {
    fn bind_texture(&mut self, texture: TextureHandle, unit: u32);
    /// Bind the first colour attachment of a render target for sampling.
    fn bind_target_colour(&mut self, target: RenderTargetHandle, unit: u32);
    /// Bind the depth attachment of a render target for sampling.
    fn bind_target_depth(&mut self, target: RenderTargetHandle, unit: u32);
}

pub trait PipelineBackend {
    /// Redirect subsequent draws into `target`.
    fn bind_render_target(&mut self, target: RenderTargetHandle);
    /// Return to drawing into the window.
    fn unbind_render_target(&mut self, target: RenderTargetHandle);
    fn clear(&mut self);
    fn set_clear_colour(&mut self, colour: Vec4);
    fn set_viewport(&mut self, width: u32, height: u32);
    fn set_cull_face(&mut self, face: CullFace);
    fn set_polygon_mode(&mut self, mode: PolygonMode);
    /// Immediate-mode reference grid drawn with the given view-projection.
    fn draw_debug_grid(&mut self, view_projection: Mat4);
}

/// Everything the scene and frame orchestrator need from a graphics API.
pub trait RenderBackend: ShaderBackend + MeshBackend + TextureBackend + PipelineBackend {}

impl<T: ?Sized> RenderBackend for T where
    T: ShaderBackend + MeshBackend + TextureBackend + PipelineBackend
{
}

/// Bind `value` to `uniform` only when the shader declares it.
///
/// The value is built lazily so undeclared uniforms cost nothing.
pub fn bind_if_declared<B, F>(
    backend: &mut B,
    shader: ShaderHandle,
    uniform: Uniform,
    value: F,
) -> bool
where
    B: ShaderBackend + ?Sized,
    F: FnOnce() -> UniformValue,
{
    if backend.declares_uniform(shader, uniform) {
        backend.set_uniform(shader, uniform, value());
        true
    } else {
        false
    }
}
