/// Drawable size of a rendering target in physical pixels.
///
/// Used both as the reference dimensions of a replaced element and as the GL
/// viewport of the surface created for it.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Viewport arguments `(x, y, width, height)` as GL expects them.
    ///
    /// Values beyond `i32::MAX` saturate.
    #[inline]
    pub fn viewport(self) -> (i32, i32, i32, i32) {
        let w = i32::try_from(self.width).unwrap_or(i32::MAX);
        let h = i32::try_from(self.height).unwrap_or(i32::MAX);
        (0, 0, w, h)
    }
}
