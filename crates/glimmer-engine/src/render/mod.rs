//! Geometry and texture setup shared by every surface.
//!
//! Convention:
//! - one full-surface quad per instance, drawn as a 4-vertex triangle strip
//! - texture slot `n` is bound to texture unit `n`

mod quad;
mod texture;

pub use quad::{draw_quad, upload_quad, QuadVertex, QUAD_VERTEX_COUNT, QUAD_VERTICES};
pub use texture::link_texture;
