//! Asset loading.
//!
//! Resolves a surface's shader identifier and texture identifiers into shader
//! text and decoded images. Identifiers are deduplicated across all surfaces;
//! each surface is told exactly once when everything it needs has settled.

mod id;
mod handle;
mod join;
mod loader;
mod sources;

pub use id::{AssetId, AssetKind};
pub use handle::ImageHandle;
pub use join::Join;
pub use loader::{AssetLoader, Collected, RequestId, ResolvedAssets, Settled};
pub use sources::ShaderSources;
