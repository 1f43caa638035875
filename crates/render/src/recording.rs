//! In-memory backend that records every command instead of talking to a GPU.
//!
//! Used by the headless CLI and by tests to observe pass ordering and the
//! exact uniforms each draw bound.

use glam::{Mat4, Vec4};
use serde::Serialize;
use shoreline_common::{MeshHandle, MeshRef, RenderTargetHandle, ShaderHandle, TextureHandle};
use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::backend::{
    CullFace, MeshBackend, PipelineBackend, PolygonMode, ShaderBackend, TextureBackend,
};
use crate::uniform::{Uniform, UniformValue};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Command {
    BindShader(ShaderHandle),
    SetUniform {
        shader: ShaderHandle,
        uniform: Uniform,
        value: UniformValue,
    },
    BindTexture {
        texture: TextureHandle,
        unit: u32,
    },
    BindTargetColour {
        target: RenderTargetHandle,
        unit: u32,
    },
    BindTargetDepth {
        target: RenderTargetHandle,
        unit: u32,
    },
    DrawMesh(MeshRef),
    BindRenderTarget(RenderTargetHandle),
    UnbindRenderTarget(RenderTargetHandle),
    Clear,
    SetClearColour(Vec4),
    SetViewport {
        width: u32,
        height: u32,
    },
    SetCullFace(CullFace),
    SetPolygonMode(PolygonMode),
    DrawDebugGrid(Mat4),
}

#[derive(Debug, Clone)]
struct ShaderInfo {
    name: String,
    uniforms: BTreeSet<Uniform>,
}

#[derive(Debug, Clone)]
struct TargetInfo {
    name: String,
    width: u32,
    height: u32,
}

/// Counts over a recorded command log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommandStats {
    pub draws: usize,
    pub uniforms: usize,
    pub shader_binds: usize,
    pub texture_binds: usize,
    pub target_binds: usize,
    pub clears: usize,
}

impl std::fmt::Display for CommandStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "draws={} uniforms={} shader_binds={} texture_binds={} target_binds={} clears={}",
            self.draws,
            self.uniforms,
            self.shader_binds,
            self.texture_binds,
            self.target_binds,
            self.clears
        )
    }
}

/// Backend that registers resources by name and logs every call.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    shaders: Vec<ShaderInfo>,
    meshes: Vec<String>,
    textures: Vec<String>,
    targets: Vec<TargetInfo>,
    commands: Vec<Command>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shader program together with the uniforms it declares.
    pub fn create_shader(&mut self, name: &str, uniforms: &[Uniform]) -> ShaderHandle {
        let handle = ShaderHandle(self.shaders.len() as u32);
        self.shaders.push(ShaderInfo {
            name: name.to_owned(),
            uniforms: uniforms.iter().copied().collect(),
        });
        handle
    }

    pub fn create_mesh(&mut self, name: &str) -> MeshHandle {
        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes.push(name.to_owned());
        handle
    }

    pub fn create_texture(&mut self, name: &str) -> TextureHandle {
        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(name.to_owned());
        handle
    }

    pub fn create_render_target(
        &mut self,
        name: &str,
        width: u32,
        height: u32,
    ) -> RenderTargetHandle {
        let handle = RenderTargetHandle(self.targets.len() as u32);
        self.targets.push(TargetInfo {
            name: name.to_owned(),
            width,
            height,
        });
        handle
    }

    pub fn shader_name(&self, shader: ShaderHandle) -> Option<&str> {
        self.shaders.get(shader.0 as usize).map(|s| s.name.as_str())
    }

    pub fn mesh_name(&self, mesh: MeshHandle) -> Option<&str> {
        self.meshes.get(mesh.0 as usize).map(String::as_str)
    }

    pub fn target_name(&self, target: RenderTargetHandle) -> Option<&str> {
        self.targets.get(target.0 as usize).map(|t| t.name.as_str())
    }

    pub fn target_size(&self, target: RenderTargetHandle) -> Option<(u32, u32)> {
        self.targets
            .get(target.0 as usize)
            .map(|t| (t.width, t.height))
    }

    /// Read-only access to the command log.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Drain and return the command log.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn stats(&self) -> CommandStats {
        stats_of(&self.commands)
    }

    /// Human-readable listing of the command log, one call per line.
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for command in &self.commands {
            let line = match command {
                Command::BindShader(s) => format!("bind shader {}", self.shader_label(*s)),
                Command::SetUniform { uniform, value, .. } => {
                    format!("  set {uniform} = {}", describe_value(value))
                }
                Command::BindTexture { texture, unit } => {
                    let name = self
                        .textures
                        .get(texture.0 as usize)
                        .map(String::as_str)
                        .unwrap_or("?");
                    format!("  bind texture {name} -> unit {unit}")
                }
                Command::BindTargetColour { target, unit } => {
                    format!("  bind {} colour -> unit {unit}", self.target_label(*target))
                }
                Command::BindTargetDepth { target, unit } => {
                    format!("  bind {} depth -> unit {unit}", self.target_label(*target))
                }
                Command::DrawMesh(mesh) => {
                    let name = self.mesh_name(mesh.handle()).unwrap_or("?");
                    format!("  draw {name}")
                }
                Command::BindRenderTarget(t) => format!("target {}", self.target_label(*t)),
                Command::UnbindRenderTarget(t) => format!("release {}", self.target_label(*t)),
                Command::Clear => "clear".to_owned(),
                Command::SetClearColour(c) => {
                    format!("clear colour ({:.2}, {:.2}, {:.2}, {:.2})", c.x, c.y, c.z, c.w)
                }
                Command::SetViewport { width, height } => format!("viewport {width}x{height}"),
                Command::SetCullFace(face) => format!("cull {face:?}"),
                Command::SetPolygonMode(mode) => format!("polygon mode {mode:?}"),
                Command::DrawDebugGrid(_) => "  draw debug grid".to_owned(),
            };
            let _ = writeln!(out, "{line}");
        }
        out
    }

    fn shader_label(&self, shader: ShaderHandle) -> &str {
        self.shader_name(shader).unwrap_or("?")
    }

    fn target_label(&self, target: RenderTargetHandle) -> &str {
        self.target_name(target).unwrap_or("?")
    }
}

/// Counts over any slice of recorded commands.
pub fn stats_of(commands: &[Command]) -> CommandStats {
    let mut stats = CommandStats::default();
    for command in commands {
        match command {
            Command::DrawMesh(_) => stats.draws += 1,
            Command::SetUniform { .. } => stats.uniforms += 1,
            Command::BindShader(_) => stats.shader_binds += 1,
            Command::BindTexture { .. }
            | Command::BindTargetColour { .. }
            | Command::BindTargetDepth { .. } => stats.texture_binds += 1,
            Command::BindRenderTarget(_) => stats.target_binds += 1,
            Command::Clear => stats.clears += 1,
            _ => {}
        }
    }
    stats
}

fn describe_value(value: &UniformValue) -> String {
    match value {
        UniformValue::Int(v) => v.to_string(),
        UniformValue::Float(v) => format!("{v:.3}"),
        UniformValue::Vec3(v) => format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z),
        UniformValue::Mat4(_) => "mat4".to_owned(),
        UniformValue::Vec3Array(values) => format!("[vec3; {}]", values.len()),
        UniformValue::Sampler(unit) => format!("unit {unit}"),
    }
}

impl ShaderBackend for RecordingBackend {
    fn bind_shader(&mut self, shader: ShaderHandle) {
        self.commands.push(Command::BindShader(shader));
    }

    fn declares_uniform(&self, shader: ShaderHandle, uniform: Uniform) -> bool {
        self.shaders
            .get(shader.0 as usize)
            .is_some_and(|s| s.uniforms.contains(&uniform))
    }

    fn set_uniform(&mut self, shader: ShaderHandle, uniform: Uniform, value: UniformValue) {
        self.commands.push(Command::SetUniform {
            shader,
            uniform,
            value,
        });
    }
}

impl MeshBackend for RecordingBackend {
    fn draw_mesh(&mut self, mesh: MeshRef) {
        self.commands.push(Command::DrawMesh(mesh));
    }
}

impl TextureBackend for RecordingBackend {
    fn bind_texture(&mut self, texture: TextureHandle, unit: u32) {
        self.commands.push(Command::BindTexture { texture, unit });
    }

    fn bind_target_colour(&mut self, target: RenderTargetHandle, unit: u32) {
        self.commands.push(Command::BindTargetColour { target, unit });
    }

    fn bind_target_depth(&mut self, target: RenderTargetHandle, unit: u32) {
        self.commands.push(Command::BindTargetDepth { target, unit });
    }
}

impl PipelineBackend for RecordingBackend {
    fn bind_render_target(&mut self, target: RenderTargetHandle) {
        self.commands.push(Command::BindRenderTarget(target));
    }

    fn unbind_render_target(&mut self, target: RenderTargetHandle) {
        self.commands.push(Command::UnbindRenderTarget(target));
    }

    fn clear(&mut self) {
        self.commands.push(Command::Clear);
    }

    fn set_clear_colour(&mut self, colour: Vec4) {
        self.commands.push(Command::SetClearColour(colour));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.commands.push(Command::SetViewport { width, height });
    }

    fn set_cull_face(&mut self, face: CullFace) {
        self.commands.push(Command::SetCullFace(face));
    }

    fn set_polygon_mode(&mut self, mode: PolygonMode) {
        self.commands.push(Command::SetPolygonMode(mode));
    }

    fn draw_debug_grid(&mut self, view_projection: Mat4) {
        self.commands.push(Command::DrawDebugGrid(view_projection));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_uniforms_are_queryable() {
        let mut backend = RecordingBackend::new();
        let shader = backend.create_shader("simple", &[Uniform::ProjectionViewModel]);
        assert!(backend.declares_uniform(shader, Uniform::ProjectionViewModel));
        assert!(!backend.declares_uniform(shader, Uniform::ModelMatrix));
        assert!(!backend.declares_uniform(ShaderHandle(99), Uniform::ModelMatrix));
        assert_eq!(backend.shader_name(shader), Some("simple"));
    }

    #[test]
    fn handles_are_sequential_per_kind() {
        let mut backend = RecordingBackend::new();
        assert_eq!(backend.create_mesh("quad"), MeshHandle(0));
        assert_eq!(backend.create_mesh("bunny"), MeshHandle(1));
        assert_eq!(backend.create_texture("tiles"), TextureHandle(0));
        let t = backend.create_render_target("shadow", 2048, 2048);
        assert_eq!(t, RenderTargetHandle(0));
        assert_eq!(backend.target_size(t), Some((2048, 2048)));
    }

    #[test]
    fn stats_and_transcript_reflect_log() {
        let mut backend = RecordingBackend::new();
        let shader = backend.create_shader("phong", &[]);
        let mesh = backend.create_mesh("bunny");
        backend.bind_shader(shader);
        backend.set_uniform(shader, Uniform::Time, UniformValue::Float(1.5));
        backend.draw_mesh(MeshRef::Loaded(mesh));
        backend.clear();

        let stats = backend.stats();
        assert_eq!(stats.draws, 1);
        assert_eq!(stats.uniforms, 1);
        assert_eq!(stats.shader_binds, 1);
        assert_eq!(stats.clears, 1);

        let text = backend.transcript();
        assert!(text.contains("bind shader phong"));
        assert!(text.contains("set time = 1.500"));
        assert!(text.contains("draw bunny"));
    }

    #[test]
    fn take_commands_drains() {
        let mut backend = RecordingBackend::new();
        backend.clear();
        assert_eq!(backend.take_commands(), vec![Command::Clear]);
        assert!(backend.commands().is_empty());
    }
}
