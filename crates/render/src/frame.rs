//! Per-frame pass sequencing: shadow, reflection, refraction, main and
//! post-process, strictly in that order.
//!
//! # Invariants
//! - The shadow map is written before any pass samples it.
//! - Reflection and refraction targets are written before the water surface
//!   is drawn in the main pass.
//! - The camera is back in its original state once the reflection pass ends.

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use shoreline_common::{Light, MeshRef, RenderTargetHandle, ShaderHandle};
use shoreline_input::InputProvider;

use crate::backend::{CullFace, RenderBackend, bind_if_declared};
use crate::camera::Camera;
use crate::instance::Instance;
use crate::scene::{DrawSet, Scene, light_space_matrix};
use crate::uniform::{Uniform, UniformValue};

pub const SHADOW_MAP_SIZE: u32 = 2048;

/// A render pass, as recorded in a [`FrameReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    Shadow,
    Reflection,
    Refraction,
    /// Full scene, either to the window or into the post-process target.
    Scene,
    PostProcess,
}

/// Screen effect selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectMode {
    #[default]
    None,
    BoxBlur,
    Sharpen,
    Chromatic,
    /// Visualise the post target through the depth shader.
    Depth,
    Wireframe,
}

/// Full-screen shaders for each post-process effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostEffectShaders {
    pub box_blur: ShaderHandle,
    pub sharpen: ShaderHandle,
    pub chromatic: ShaderHandle,
    pub depth: ShaderHandle,
}

impl PostEffectShaders {
    pub fn shader_for(&self, mode: EffectMode) -> Option<ShaderHandle> {
        match mode {
            EffectMode::BoxBlur => Some(self.box_blur),
            EffectMode::Sharpen => Some(self.sharpen),
            EffectMode::Chromatic => Some(self.chromatic),
            EffectMode::Depth => Some(self.depth),
            EffectMode::None | EffectMode::Wireframe => None,
        }
    }
}

/// Offscreen targets the water surface samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterTargets {
    pub reflection: RenderTargetHandle,
    pub refraction: RenderTargetHandle,
}

/// Resources the orchestrator needs, all owned by the backend.
#[derive(Debug, Clone)]
pub struct FrameSetup {
    pub window_width: u32,
    pub window_height: u32,
    pub shadow_map_size: u32,
    pub shadow_target: RenderTargetHandle,
    pub shadow_gen_shader: ShaderHandle,
    /// `None` when the scene has no water surface.
    pub water: Option<WaterTargets>,
    pub post_target: RenderTargetHandle,
    pub post_quad: MeshRef,
    pub post_shaders: PostEffectShaders,
}

/// Time values for one frame update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since startup.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
}

/// Passes executed by one call to [`FrameOrchestrator::render_frame`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    pub passes: Vec<Pass>,
}

/// Clear colour tinted by the sun's elevation.
pub fn background_colour(sun: &Light) -> Vec4 {
    let level = sun.direction.y * -0.35 + 0.4;
    Vec4::new(0.05, level / 1.5, level, 1.0)
}

/// Sequences the render passes of each frame against one scene.
#[derive(Debug, Clone)]
pub struct FrameOrchestrator {
    window_width: u32,
    window_height: u32,
    shadow_map_size: u32,
    shadow_target: RenderTargetHandle,
    shadow_gen_shader: ShaderHandle,
    water: Option<WaterTargets>,
    post_target: RenderTargetHandle,
    post_shaders: PostEffectShaders,
    post_instance: Instance,
    effect: EffectMode,
    post_processing: bool,
    show_grid: bool,
    clear_colour: Vec4,
}

impl FrameOrchestrator {
    /// Wire the orchestrator to `scene`: the scene samples the shadow target
    /// and takes the window size as its viewport.
    pub fn new(setup: FrameSetup, scene: &mut Scene) -> Self {
        scene.set_shadow_target(setup.shadow_target);
        scene.set_window_size(Vec2::new(
            setup.window_width as f32,
            setup.window_height as f32,
        ));

        let post_instance = Instance::from_euler(
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::ONE,
            setup.post_quad,
            setup.post_shaders.depth,
        )
        .with_render_targets(setup.post_target, None);

        Self {
            window_width: setup.window_width,
            window_height: setup.window_height,
            shadow_map_size: setup.shadow_map_size,
            shadow_target: setup.shadow_target,
            shadow_gen_shader: setup.shadow_gen_shader,
            water: setup.water,
            post_target: setup.post_target,
            post_shaders: setup.post_shaders,
            post_instance,
            effect: EffectMode::None,
            post_processing: false,
            show_grid: false,
            clear_colour: background_colour(scene.sunlight()),
        }
    }

    pub fn effect(&self) -> EffectMode {
        self.effect
    }

    pub fn post_processing(&self) -> bool {
        self.post_processing
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
        tracing::debug!(show_grid = self.show_grid, "grid toggled");
    }

    pub fn clear_colour(&self) -> Vec4 {
        self.clear_colour
    }

    /// The full-screen quad drawn in the post-process pass.
    pub fn post_instance(&self) -> &Instance {
        &self.post_instance
    }

    /// Switch screen effect. Post effects hot-swap the quad's shader and turn
    /// wireframe off; wireframe turns post-processing off.
    pub fn apply_effect(&mut self, scene: &mut Scene, mode: EffectMode) {
        match self.post_shaders.shader_for(mode) {
            Some(shader) => {
                self.post_processing = true;
                self.post_instance.swap_shader(shader);
                scene.set_wireframe(false);
            }
            None => {
                self.post_processing = false;
                scene.set_wireframe(mode == EffectMode::Wireframe);
            }
        }
        self.effect = mode;
        tracing::debug!(?mode, post_processing = self.post_processing, "effect applied");
    }

    /// Advance scene time, move the camera and retint the background.
    pub fn update<I>(&mut self, scene: &mut Scene, camera: &mut Camera, input: &I, time: FrameTime)
    where
        I: InputProvider + ?Sized,
    {
        scene.set_time(time.elapsed);
        camera.update(time.delta, input);
        self.clear_colour = background_colour(scene.sunlight());
    }

    /// Run every pass of one frame, in order.
    pub fn render_frame<B>(
        &mut self,
        backend: &mut B,
        scene: &mut Scene,
        camera: &mut Camera,
    ) -> FrameReport
    where
        B: RenderBackend + ?Sized,
    {
        let mut report = FrameReport::default();
        backend.set_clear_colour(self.clear_colour);

        self.shadow_pass(backend, scene, camera);
        report.passes.push(Pass::Shadow);

        if let Some(water) = self.water {
            self.reflection_pass(backend, scene, camera, water.reflection);
            report.passes.push(Pass::Reflection);
            self.refraction_pass(backend, scene, camera, water.refraction);
            report.passes.push(Pass::Refraction);
        }

        self.main_pass(backend, scene, camera, &mut report);
        report
    }

    fn shadow_pass<B>(&self, backend: &mut B, scene: &Scene, camera: &Camera)
    where
        B: RenderBackend + ?Sized,
    {
        let _span = tracing::info_span!("shadow_pass").entered();
        backend.bind_render_target(self.shadow_target);
        backend.set_viewport(self.shadow_map_size, self.shadow_map_size);
        backend.clear();

        let shader = self.shadow_gen_shader;
        backend.bind_shader(shader);
        let light_matrix = light_space_matrix(scene.sunlight().direction);
        bind_if_declared(backend, shader, Uniform::ShadowCasterMatrix, || {
            UniformValue::Mat4(light_matrix)
        });

        // Front faces culled while writing depth.
        backend.set_cull_face(CullFace::Front);
        scene.draw_raw(backend, camera, DrawSet::NotWater, Some(shader));
        backend.set_cull_face(CullFace::Back);

        backend.unbind_render_target(self.shadow_target);
        backend.set_viewport(self.window_width, self.window_height);
        backend.clear();
    }

    fn reflection_pass<B>(
        &self,
        backend: &mut B,
        scene: &mut Scene,
        camera: &mut Camera,
        target: RenderTargetHandle,
    ) where
        B: RenderBackend + ?Sized,
    {
        let _span = tracing::info_span!("reflection_pass").entered();
        backend.bind_render_target(target);
        backend.clear();
        {
            let mirrored = camera.mirror_below_water();
            scene.draw(backend, &mirrored, DrawSet::AboveWater, None);
            if self.show_grid {
                backend.draw_debug_grid(
                    mirrored.view_projection(self.window_width as f32, self.window_height as f32),
                );
            }
        }
        backend.unbind_render_target(target);
    }

    fn refraction_pass<B>(
        &self,
        backend: &mut B,
        scene: &mut Scene,
        camera: &Camera,
        target: RenderTargetHandle,
    ) where
        B: RenderBackend + ?Sized,
    {
        let _span = tracing::info_span!("refraction_pass").entered();
        backend.bind_render_target(target);
        backend.clear();
        scene.draw(backend, camera, DrawSet::BelowWater, None);
        backend.unbind_render_target(target);
    }

    fn main_pass<B>(
        &self,
        backend: &mut B,
        scene: &mut Scene,
        camera: &Camera,
        report: &mut FrameReport,
    ) where
        B: RenderBackend + ?Sized,
    {
        let _span = tracing::info_span!("main_pass", post = self.post_processing).entered();
        backend.clear();
        if self.post_processing {
            backend.bind_render_target(self.post_target);
            backend.clear();
            scene.draw(backend, camera, DrawSet::All, None);
            backend.unbind_render_target(self.post_target);
            report.passes.push(Pass::Scene);

            backend.clear();
            self.post_instance.draw(backend, scene, camera, None);
            report.passes.push(Pass::PostProcess);
        } else {
            scene.draw(backend, camera, DrawSet::All, None);
            report.passes.push(Pass::Scene);
        }
    }
}
