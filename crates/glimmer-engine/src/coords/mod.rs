//! Pixel-size types shared by targets and the render loop.

mod size;

pub use size::SurfaceSize;
