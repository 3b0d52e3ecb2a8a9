use crate::asset::AssetId;
use crate::error::ActivationError;
use crate::host::SurfaceElement;

/// Attribute holding the shader identifier.
pub const SHADER_ATTRIBUTE: &str = "data-shader";

/// Attribute holding the primary texture (slot 0, the `image` uniform).
pub const PRIMARY_TEXTURE_ATTRIBUTE: &str = "src";

/// Number of secondary textures (`data-texture0`..`data-texture5`).
pub const SECONDARY_TEXTURE_COUNT: usize = 6;

/// Name of the `index`-th secondary texture attribute.
pub fn secondary_texture_attribute(index: usize) -> String {
    format!("data-texture{index}")
}

/// One surface to activate: its shader and its texture slots.
///
/// `textures[0]` is the primary image and may be `None`. `textures[1..]` are
/// the secondary textures found contiguously; the list never has holes after
/// slot 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceRequest {
    pub shader: AssetId,
    pub textures: Vec<Option<AssetId>>,
}

impl SurfaceRequest {
    /// A request for `shader` with no textures.
    pub fn new(shader: impl Into<AssetId>) -> Self {
        Self {
            shader: shader.into(),
            textures: vec![None],
        }
    }

    pub fn with_primary(mut self, id: impl Into<AssetId>) -> Self {
        self.textures[0] = Some(id.into());
        self
    }

    /// Appends the next secondary texture. Extra textures beyond the sixth are ignored.
    pub fn with_texture(mut self, id: impl Into<AssetId>) -> Self {
        if self.textures.len() <= SECONDARY_TEXTURE_COUNT {
            self.textures.push(Some(id.into()));
        }
        self
    }

    /// Reads the request from an element's attributes.
    ///
    /// Secondary textures are scanned from `data-texture0` upward; the first
    /// missing index ends the scan.
    pub fn from_element<E: SurfaceElement + ?Sized>(element: &E) -> Result<Self, ActivationError> {
        let shader = element
            .attribute(SHADER_ATTRIBUTE)
            .ok_or(ActivationError::MissingShaderAttribute {
                attribute: SHADER_ATTRIBUTE,
            })?;

        let mut request = Self::new(shader);
        request.textures[0] = element.attribute(PRIMARY_TEXTURE_ATTRIBUTE).map(AssetId::from);

        for index in 0..SECONDARY_TEXTURE_COUNT {
            match element.attribute(&secondary_texture_attribute(index)) {
                Some(id) => request.textures.push(Some(AssetId::from(id))),
                None => break,
            }
        }

        Ok(request)
    }

    /// Number of texture identifiers that will actually be loaded.
    pub fn texture_count(&self) -> usize {
        self.textures.iter().flatten().count()
    }
}
