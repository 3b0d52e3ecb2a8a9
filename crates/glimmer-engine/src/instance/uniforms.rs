use crate::gl::GlApi;
use crate::surface::SECONDARY_TEXTURE_COUNT;

pub const TIME_UNIFORM: &str = "time";
pub const IMAGE_UNIFORM: &str = "image";
pub const TEXTURE_UNIFORMS: [&str; SECONDARY_TEXTURE_COUNT] = [
    "texture0", "texture1", "texture2", "texture3", "texture4", "texture5",
];

/// Cached locations of the fixed uniform layout.
///
/// A uniform the shader does not declare (or the driver optimized out) is
/// `None`; setting it is a no-op.
#[derive(Debug, Clone)]
pub struct UniformTable<L> {
    pub time: Option<L>,
    pub image: Option<L>,
    pub textures: [Option<L>; SECONDARY_TEXTURE_COUNT],
}

impl<L: Clone> UniformTable<L> {
    pub fn locate<G>(gl: &G, program: G::Program) -> Self
    where
        G: GlApi<UniformLocation = L>,
    {
        Self {
            time: gl.uniform_location(program, TIME_UNIFORM),
            image: gl.uniform_location(program, IMAGE_UNIFORM),
            textures: std::array::from_fn(|i| gl.uniform_location(program, TEXTURE_UNIFORMS[i])),
        }
    }

    /// Number of fixed uniforms the program actually exposes.
    pub fn resolved(&self) -> usize {
        usize::from(self.time.is_some())
            + usize::from(self.image.is_some())
            + self.textures.iter().filter(|l| l.is_some()).count()
    }
}
