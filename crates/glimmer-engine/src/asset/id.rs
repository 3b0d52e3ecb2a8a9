use std::fmt;

/// Raw asset identifier as written on the element.
///
/// Either a local reference (`#<id>`, resolved against resources already present
/// in the host document) or a remote location. The raw string is the cache key:
/// `img.png` and `./img.png` are different assets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_local(&self) -> bool {
        self.0.starts_with('#')
    }

    /// The element id of a local reference, without the leading `#`.
    pub fn local_name(&self) -> Option<&str> {
        self.0.strip_prefix('#')
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// What an identifier was loaded as.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AssetKind {
    Shader,
    Image,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shader => f.write_str("shader"),
            Self::Image => f.write_str("image"),
        }
    }
}
