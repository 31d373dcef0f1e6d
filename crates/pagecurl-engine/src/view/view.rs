use crate::coords::Viewport;
use crate::paint::Color;

use super::camera::Camera;

/// What the renderer draws each frame: a camera looking at the scene, into a
/// pixel rectangle of the swap target, over a clear color.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    viewport: Viewport,
    camera: Camera,
    clear_color: Color,
}

impl View {
    pub fn new(camera: Camera, clear_color: Color) -> Self {
        Self {
            viewport: Viewport::default(),
            camera,
            clear_color,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }
}
