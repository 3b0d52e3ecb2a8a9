//! GPU abstraction.
//!
//! The engine talks to the GPU only through [`GlApi`]. The `glow` feature
//! (on by default) implements it for `glow::Context`; tests use a recording
//! implementation.

mod api;
#[cfg(feature = "glow")]
mod glow_backend;

pub use api::{GlApi, ShaderStage, TextureParameter, TextureValue};
