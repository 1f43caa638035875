//! Scene registry and render-pass orchestration.
//!
//! A [`Scene`] owns instances and lights and files each instance into lists
//! by its position relative to the water plane. A [`FrameOrchestrator`] runs
//! the shadow, reflection, refraction, main and post-process passes against
//! those lists. All GPU work goes through the [`RenderBackend`] traits.
//!
//! # Invariants
//! - Single-threaded: per-frame state is written before any pass reads it.
//! - Instances bind a uniform only when the active shader declares it.
//! - Category lists are fixed at registration; draws never classify.

mod backend;
mod camera;
mod frame;
mod instance;
mod recording;
mod scene;
mod uniform;

pub use backend::{
    CullFace, MeshBackend, PipelineBackend, PolygonMode, RenderBackend, ShaderBackend,
    TextureBackend, bind_if_declared,
};
pub use camera::{Camera, MAX_CAMERA_ANGLE, MirroredCamera};
pub use frame::{
    EffectMode, FrameOrchestrator, FrameReport, FrameSetup, FrameTime, Pass, PostEffectShaders,
    SHADOW_MAP_SIZE, WaterTargets, background_colour,
};
pub use instance::{Instance, SurfaceSource};
pub use recording::{Command, CommandStats, RecordingBackend, stats_of};
pub use scene::{
    Category, DrawSet, InstanceId, Membership, PointLightSamples, Scene, SceneError,
    TEXTURE_SPACE_OFFSET, light_space_matrix,
};
pub use uniform::{SHADOW_MAP_UNIT, Uniform, UniformValue};

pub fn crate_info() -> &'static str {
    "shoreline-render v0.1.0"
}
