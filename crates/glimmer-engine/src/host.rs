//! Platform collaborators.
//!
//! The engine never touches a document tree, a network stack, or a windowing
//! system directly. Hosts implement these traits and feed asynchronous results
//! back through [`Engine`](crate::Engine) methods.

use crate::asset::{AssetId, ImageHandle};
use crate::config::ContextAttributes;
use crate::coords::SurfaceSize;
use crate::gl::GlApi;
use crate::surface::TargetId;

/// Resolves and fetches shader text and texture images.
pub trait AssetSource {
    /// Text of the in-document script element with the given id (no `#`).
    fn find_script(&self, name: &str) -> Option<String>;

    /// Already-present image element with the given id (no `#`).
    fn find_image(&self, name: &str) -> Option<ImageHandle>;

    /// Starts retrieving shader text. Completion is reported later with
    /// [`Engine::text_loaded`](crate::Engine::text_loaded) or
    /// [`Engine::asset_failed`](crate::Engine::asset_failed).
    fn fetch_text(&mut self, id: &AssetId);

    /// Starts decoding an image. Completion is reported later with
    /// [`Engine::image_loaded`](crate::Engine::image_loaded) or
    /// [`Engine::asset_failed`](crate::Engine::asset_failed).
    fn load_image(&mut self, id: &AssetId);
}

/// The display-refresh callback primitive.
pub trait FrameRequester {
    /// Schedules one call to [`Engine::tick`](crate::Engine::tick) on the next refresh.
    fn request_frame(&mut self);
}

/// Where a new rendering target goes relative to the element it was made for.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum MountMode {
    /// The target takes the element's place.
    #[default]
    Replace,
    /// The target is inserted before the element, which stays in the document.
    KeepOriginal,
}

/// A discovered element carrying surface attributes.
pub trait SurfaceElement {
    fn attribute(&self, name: &str) -> Option<String>;

    /// Rendered size of the element; the target is created at this size.
    fn size(&self) -> SurfaceSize;
}

/// Everything the engine needs from the embedding platform.
pub trait Host: AssetSource + FrameRequester {
    type Element: SurfaceElement;
    type Gl: GlApi;

    /// One-time capability check. When false, replace calls do nothing.
    fn gl_supported(&self) -> bool;

    /// Places the rendering target for `element` in the document.
    fn mount_target(&mut self, element: &Self::Element, target: TargetId, mode: MountMode);

    /// Creates the GPU context backing `target`.
    fn create_context(
        &mut self,
        target: TargetId,
        attributes: &ContextAttributes,
    ) -> anyhow::Result<Self::Gl>;
}
