use anyhow::Result;

use crate::scene::{MaterialInfo, SceneDesc};
use crate::view::View;

use super::SurfaceErrorAction;

/// Operations the lifecycle consumes from a rendering engine.
///
/// The engine owns swap targets, GPU command submission and every resource the
/// scene needs. The lifecycle only sequences these calls; it never looks inside
/// `Surface` or `SwapTarget`.
///
/// Frame protocol: `begin_frame` → `render` (any number of times) → `end_frame`.
/// `render` and `end_frame` are only called after a successful `begin_frame`.
pub trait Engine {
    /// Native presentable window handed over by the OS.
    type Surface;

    /// Presentable resource bound to one `Surface`.
    type SwapTarget;

    /// Creates a swap target presenting into `surface`.
    fn create_swap_target(&mut self, surface: Self::Surface) -> Result<Self::SwapTarget>;

    /// Destroys `target`. Commands referencing it may still be in flight until
    /// the next `flush_and_wait`.
    fn destroy_swap_target(&mut self, target: Self::SwapTarget);

    /// Adapts `target` to a new drawable size. Never called with a zero dimension.
    fn resize_swap_target(&mut self, target: &mut Self::SwapTarget, width: u32, height: u32);

    /// Blocks until every submitted command has finished executing.
    fn flush_and_wait(&mut self);

    /// Starts a frame presenting into `target`.
    ///
    /// An error tells the caller to skip the frame (or stop, for `Fatal`).
    fn begin_frame(&mut self, target: &mut Self::SwapTarget) -> Result<(), SurfaceErrorAction>;

    /// Records the draw commands for `view` into the current frame.
    fn render(&mut self, view: &View);

    /// Submits the current frame. Execution may continue asynchronously.
    fn end_frame(&mut self);

    /// Builds the scene resources described by `scene`.
    fn build_scene(&mut self, scene: &SceneDesc) -> Result<()>;

    /// Builds a material from an opaque payload.
    fn load_material(&mut self, payload: &[u8]) -> Result<MaterialInfo>;

    /// Releases the resources backing `view` (including its scene).
    fn release_view(&mut self, view: &View);

    /// Releases the renderer and any frame state it holds.
    fn release_renderer(&mut self);
}
