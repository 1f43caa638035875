//! Polled keyboard and mouse input.
//!
//! # Invariants
//! - Input is sampled, not pushed: consumers read the current state once per frame.
//! - Bindings are data; no consumer hard-codes a key.

pub mod bindings;
pub mod state;

pub use bindings::CameraBindings;
pub use state::{InputProvider, InputState, Key, MouseButton};

pub fn crate_info() -> &'static str {
    "shoreline-input v0.1.0"
}
