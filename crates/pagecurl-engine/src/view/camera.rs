use bytemuck::{Pod, Zeroable};

use super::projection::Projection;

/// Camera attached to a view.
///
/// Only the projection is modeled; placement in the world belongs to the engine's
/// scene graph.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Camera {
    projection: Projection,
}

impl Camera {
    pub fn new(projection: Projection) -> Self {
        Self { projection }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    /// GPU layout of the camera, uploaded once per rendered view.
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            clip_from_view: self.projection.matrix(),
        }
    }
}

/// Camera uniform block as seen by shaders (`mat4x4<f32>`, column-major).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub clip_from_view: [[f32; 4]; 4],
}
