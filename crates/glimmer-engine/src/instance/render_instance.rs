use std::time::Instant;

use crate::asset::ImageHandle;
use crate::error::ActivationError;
use crate::gl::GlApi;
use crate::program::POSITION_ATTRIBUTE;
use crate::render;
use crate::surface::{TargetId, SECONDARY_TEXTURE_COUNT};

use super::UniformTable;

/// Live GPU state of one activated surface.
///
/// Owns its context, program, vertex buffer and textures. Nothing but the
/// elapsed time changes after creation.
pub struct RenderInstance<G: GlApi> {
    target: TargetId,
    gl: G,
    program: G::Program,
    uniforms: UniformTable<G::UniformLocation>,
    position: Option<u32>,
    vertices: G::Buffer,
    textures: Vec<G::Texture>,
    /// `bound[i]` is set when secondary texture `i` (slot `i + 1`) has a texture.
    bound: [bool; SECONDARY_TEXTURE_COUNT],
    started: Instant,
}

impl<G: GlApi> RenderInstance<G> {
    /// Builds the instance around a linked `program`.
    ///
    /// `textures[slot]` is bound to texture unit `slot`. On failure every GPU
    /// object created so far, including `program`, is released.
    pub fn new(
        target: TargetId,
        gl: G,
        program: G::Program,
        textures: &[Option<ImageHandle>],
        clear_color: [f32; 4],
        started: Instant,
    ) -> Result<Self, ActivationError> {
        let position = gl.attrib_location(program, POSITION_ATTRIBUTE);
        let uniforms = UniformTable::locate(&gl, program);

        let vertices = match render::upload_quad(&gl) {
            Ok(buffer) => buffer,
            Err(err) => {
                gl.delete_program(program);
                return Err(err);
            }
        };

        if let Some(index) = position {
            gl.enable_vertex_attrib_array(index);
        }

        let mut instance = Self {
            target,
            gl,
            program,
            uniforms,
            position,
            vertices,
            textures: Vec::with_capacity(textures.len()),
            bound: [false; SECONDARY_TEXTURE_COUNT],
            started,
        };

        for (slot, image) in textures.iter().enumerate() {
            let Some(image) = image else { continue };
            let unit = u32::try_from(slot).unwrap_or(u32::MAX);
            match render::link_texture(&instance.gl, image, unit) {
                Ok(texture) => instance.textures.push(texture),
                Err(err) => {
                    instance.release();
                    return Err(err);
                }
            }
            if let Some(flag) = slot.checked_sub(1).and_then(|i| instance.bound.get_mut(i)) {
                *flag = true;
            }
        }

        let [r, g, b, a] = clear_color;
        instance.gl.clear_color(r, g, b, a);
        instance.gl.disable_depth_test();

        log::debug!(
            "instance for target {target}: {} texture(s), {} uniform(s) resolved",
            instance.textures.len(),
            instance.uniforms.resolved()
        );

        Ok(instance)
    }

    #[inline]
    pub fn target(&self) -> TargetId {
        self.target
    }

    #[inline]
    pub fn gl(&self) -> &G {
        &self.gl
    }

    #[inline]
    pub fn program(&self) -> G::Program {
        self.program
    }

    #[inline]
    pub fn uniforms(&self) -> &UniformTable<G::UniformLocation> {
        &self.uniforms
    }

    #[inline]
    pub fn position_attribute(&self) -> Option<u32> {
        self.position
    }

    #[inline]
    pub fn vertex_buffer(&self) -> G::Buffer {
        self.vertices
    }

    #[inline]
    pub fn bound_textures(&self) -> &[bool; SECONDARY_TEXTURE_COUNT] {
        &self.bound
    }

    #[inline]
    pub fn started(&self) -> Instant {
        self.started
    }

    /// Seconds since activation, as the `time` uniform receives it.
    pub fn elapsed(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.started).as_secs_f32()
    }

    /// Deletes every GPU object this instance owns.
    pub fn release(self) {
        for texture in &self.textures {
            self.gl.delete_texture(*texture);
        }
        self.gl.delete_buffer(self.vertices);
        self.gl.use_program(None);
        self.gl.delete_program(self.program);
        log::debug!("released instance for target {}", self.target);
    }
}
