use bytemuck::{Pod, Zeroable};

use crate::error::ActivationError;
use crate::gl::GlApi;

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 3],
}

impl QuadVertex {
    /// Floats per vertex, as described to the `position` attribute.
    pub const COMPONENTS: i32 = 3;
}

/// Full-surface quad, drawn as a triangle strip. The default vertex stage maps
/// it so that the unit square `0..1` spans the viewport.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [1.0, 1.0, 0.0] },
    QuadVertex { pos: [-1.0, 1.0, 0.0] },
    QuadVertex { pos: [1.0, -1.0, 0.0] },
    QuadVertex { pos: [-1.0, -1.0, 0.0] },
];

pub const QUAD_VERTEX_COUNT: i32 = QUAD_VERTICES.len() as i32;

/// Allocates a new array buffer holding [`QUAD_VERTICES`] and leaves it bound.
pub fn upload_quad<G: GlApi>(gl: &G) -> Result<G::Buffer, ActivationError> {
    let buffer = gl.create_buffer().map_err(ActivationError::Gl)?;
    gl.bind_array_buffer(Some(buffer));
    gl.array_buffer_data(bytemuck::cast_slice(&QUAD_VERTICES));
    Ok(buffer)
}

/// Binds `buffer`, describes the position attribute, and draws the quad.
pub fn draw_quad<G: GlApi>(gl: &G, buffer: G::Buffer, position: Option<u32>) {
    gl.bind_array_buffer(Some(buffer));
    if let Some(index) = position {
        // Tightly packed: stride 0.
        gl.vertex_attrib_pointer_f32(index, QuadVertex::COMPONENTS, 0, 0);
    }
    gl.draw_triangle_strip(0, QUAD_VERTEX_COUNT);
}
