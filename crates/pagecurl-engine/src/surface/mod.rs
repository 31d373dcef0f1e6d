//! Native surface to swap target binding.

mod binding;

pub use binding::{SurfaceBinding, SurfaceReleased};
