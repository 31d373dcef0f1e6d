//! View, camera and projection state owned by the render session.

mod camera;
mod projection;
#[allow(clippy::module_inception)]
mod view;

pub use camera::{Camera, CameraUniform};
pub use projection::{FovAxis, Projection};
pub use view::View;
