use image::imageops;

use crate::asset::ImageHandle;
use crate::error::ActivationError;
use crate::gl::{GlApi, TextureParameter, TextureValue};

/// Uploads `image` into a new texture bound to `unit`.
///
/// Rows are flipped so the first image row lands at the top of the quad.
/// Sampling: linear minification, clamp-to-edge on both axes.
pub fn link_texture<G: GlApi>(
    gl: &G,
    image: &ImageHandle,
    unit: u32,
) -> Result<G::Texture, ActivationError> {
    let texture = gl.create_texture().map_err(ActivationError::Gl)?;
    gl.active_texture(unit);
    gl.bind_texture_2d(Some(texture));

    let flipped = imageops::flip_vertical(image.image());
    gl.tex_image_2d_rgba(flipped.width(), flipped.height(), flipped.as_raw());

    gl.tex_parameter(TextureParameter::MinFilter, TextureValue::Linear);
    gl.tex_parameter(TextureParameter::WrapS, TextureValue::ClampToEdge);
    gl.tex_parameter(TextureParameter::WrapT, TextureValue::ClampToEdge);

    Ok(texture)
}
