//! Glimmer engine crate.
//!
//! Turns marked host elements into live fragment-shader surfaces: shader and
//! texture assets are collected (deduplicated across surfaces), a GPU program
//! is compiled per surface, and one shared frame loop redraws every active
//! instance on each display refresh.
//!
//! The platform is abstracted behind [`host::Host`] (element replacement,
//! local-reference lookup, remote fetches, frame callbacks, context creation)
//! and [`gl::GlApi`] (the GPU calls). [`engine::Engine`] owns all state.

pub mod asset;
pub mod config;
pub mod coords;
pub mod engine;
pub mod error;
pub mod gl;
pub mod host;
pub mod instance;
pub mod logging;
pub mod program;
pub mod render;
pub mod scheduler;
pub mod surface;
pub mod time;

#[cfg(test)]
mod testing;

pub use config::{ContextAttributes, EngineConfig};
pub use engine::Engine;
pub use error::ActivationError;
