//! Pixel-space geometry shared by the surface binding and the views.
//!
//! Everything here is in physical pixels, origin top-left.

mod size;
mod viewport;

pub use size::SurfaceSize;
pub use viewport::Viewport;
