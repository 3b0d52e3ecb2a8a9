use std::fmt;
use std::rc::Rc;

use image::RgbaImage;

/// Decoded texture image shared by every surface that references it.
///
/// Images are read-only once decoded, so one handle is handed to all requesters
/// of the same identifier.
#[derive(Clone)]
pub struct ImageHandle(Rc<RgbaImage>);

impl ImageHandle {
    pub fn new(image: RgbaImage) -> Self {
        Self(Rc::new(image))
    }

    /// Decodes an encoded image (PNG, JPEG, ...) into RGBA8.
    pub fn decode(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::new(decoded.to_rgba8()))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.0
    }

    /// True when both handles point at the same decoded image.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
