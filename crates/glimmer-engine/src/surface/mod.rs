//! Surface requests (what an element asks for) and rendering targets.

mod request;
mod target;

pub use request::{
    secondary_texture_attribute, SurfaceRequest, PRIMARY_TEXTURE_ATTRIBUTE,
    SECONDARY_TEXTURE_COUNT, SHADER_ATTRIBUTE,
};
pub use target::{RenderTarget, TargetId, Targets};
