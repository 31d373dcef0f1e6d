use crate::device::SurfaceErrorAction;

/// Why a frame could not be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// No swap target is bound; expected while the surface is unavailable.
    #[error("no swap target is bound")]
    NoSwapTarget,

    /// The engine declined the frame.
    #[error("engine declined the frame: {0:?}")]
    Surface(SurfaceErrorAction),
}
