use std::sync::Arc;

use winit::window::Window;

/// Frame currently being recorded by the wgpu engine.
///
/// Short-lived: holding the surface texture blocks acquisition of the next one.
pub(crate) struct GpuFrame {
    pub(crate) window: Arc<Window>,
    pub(crate) surface_texture: wgpu::SurfaceTexture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) encoder: wgpu::CommandEncoder,
}
