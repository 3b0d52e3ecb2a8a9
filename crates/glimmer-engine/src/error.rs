use thiserror::Error;

use crate::asset::{AssetId, AssetKind};
use crate::gl::ShaderStage;
use crate::surface::TargetId;

/// A fatal condition that stops the activation of one surface.
///
/// Errors never cross surfaces: the engine logs the error, invokes the error
/// hook once, and keeps every other pending or running surface going.
#[derive(Debug, Error)]
pub enum ActivationError {
    #[error("surface element has no `{attribute}` attribute")]
    MissingShaderAttribute { attribute: &'static str },

    #[error("unable to locate the script element with id {0}")]
    MissingScript(AssetId),

    #[error("unable to locate the image element with id {0}")]
    MissingImage(AssetId),

    #[error("asset {id} is cached as {cached} and cannot be used as {requested}")]
    KindMismatch {
        id: AssetId,
        cached: AssetKind,
        requested: AssetKind,
    },

    #[error("failed to load {id}: {reason}")]
    Fetch { id: AssetId, reason: String },

    #[error("no shader source is registered for {0}")]
    MissingSource(AssetId),

    #[error("failed to create a GPU context for target {target}: {message}")]
    Context { target: TargetId, message: String },

    #[error("GPU object creation failed: {0}")]
    Gl(String),

    #[error("{stage} shader compilation failed:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("shader program link failed:\n{log}")]
    Link { log: String },
}

impl ActivationError {
    /// True for the errors caused by an identifier that could not be resolved.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Self::MissingShaderAttribute { .. }
                | Self::MissingScript(_)
                | Self::MissingImage(_)
                | Self::KindMismatch { .. }
                | Self::Fetch { .. }
                | Self::MissingSource(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_carries_info_log() {
        let err = ActivationError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:1: syntax error".into(),
        };
        let text = err.to_string();
        assert!(text.starts_with("fragment shader compilation failed"));
        assert!(text.contains("0:1: syntax error"));
        assert!(!err.is_resolution());
    }

    #[test]
    fn missing_reference_is_resolution() {
        let err = ActivationError::MissingScript(AssetId::from("#frag"));
        assert!(err.is_resolution());
        assert_eq!(err.to_string(), "unable to locate the script element with id #frag");
    }
}
