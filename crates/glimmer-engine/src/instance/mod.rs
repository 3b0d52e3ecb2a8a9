//! Instance store: the per-surface GPU state the frame loop draws.

mod render_instance;
mod store;
mod uniforms;

pub use render_instance::RenderInstance;
pub use store::{InstanceKey, InstanceStore};
pub use uniforms::{UniformTable, IMAGE_UNIFORM, TEXTURE_UNIFORMS, TIME_UNIFORM};
