//! Shared value types for the shoreline renderer.
//!
//! # Invariants
//! - Resource handles are plain indices; whoever created the resource owns it.
//! - A `Light` stores colour already scaled by its intensity.

mod light;
mod types;

pub use light::{Light, MAX_LIGHTS, Material};
pub use types::{MeshHandle, MeshRef, RenderTargetHandle, ShaderHandle, TextureHandle, Transform};

pub fn crate_info() -> &'static str {
    "shoreline-common v0.1.0"
}
