//! Engine configuration.

use crate::program::DEFAULT_VERTEX_SHADER;

/// Attributes requested when the host creates a GPU context for a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextAttributes {
    /// Request a multisampled default framebuffer. A hint; hosts may ignore it.
    pub antialias: bool,
}

impl Default for ContextAttributes {
    fn default() -> Self {
        Self { antialias: true }
    }
}

/// Engine-wide settings. Keep this small; per-surface data comes from elements.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Clear color applied to every surface before it is drawn (RGBA, 0..1).
    pub clear_color: [f32; 4],

    pub context: ContextAttributes,

    /// Vertex stage linked with every fragment shader.
    ///
    /// Must expose a `position` attribute fed with the full-screen quad.
    pub vertex_shader: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 0.0],
            context: ContextAttributes::default(),
            vertex_shader: DEFAULT_VERTEX_SHADER.to_string(),
        }
    }
}
