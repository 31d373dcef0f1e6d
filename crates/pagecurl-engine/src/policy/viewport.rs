use crate::coords::Viewport;
use crate::view::{FovAxis, Projection, View};

/// Projection parameters applied on every resize.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProjectionConfig {
    pub fov_degrees: f64,
    pub axis: FovAxis,
    pub near: f64,
    pub far: f64,
}

impl ProjectionConfig {
    pub fn projection(&self, aspect: f64) -> Projection {
        Projection::perspective(self.fov_degrees, aspect, self.near, self.far, self.axis)
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            axis: FovAxis::Horizontal,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Keeps a view's camera and viewport in step with the surface size.
#[derive(Debug, Clone, Default)]
pub struct ViewportPolicy {
    config: ProjectionConfig,
}

impl ViewportPolicy {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Applies a `width` x `height` surface size to `view`.
    ///
    /// The viewport always follows the surface. The projection is left alone
    /// when the size has no defined aspect ratio.
    pub fn on_resize(&self, view: &mut View, width: u32, height: u32) {
        let viewport = Viewport::full(width, height);
        view.set_viewport(viewport);

        let Some(aspect) = viewport.aspect() else {
            log::debug!("degenerate size {width}x{height}; projection unchanged");
            return;
        };

        view.camera_mut().set_projection(self.config.projection(aspect));
    }
}
