use std::time::Instant;

use crossbeam_channel::Sender;

/// Inbound lifecycle notification for a surface handle of type `S`.
#[derive(Debug)]
pub enum LifecycleEvent<S> {
    /// A native surface is available for presentation.
    SurfaceAvailable(S),

    /// The native surface changed size (physical pixels).
    SurfaceResized { width: u32, height: u32 },

    /// The native surface is about to be destroyed.
    ///
    /// `ack` is signalled once the swap target is gone and the engine drained.
    SurfaceLost { ack: Option<Sender<()>> },

    /// The application became visible; start the frame loop.
    Resume,

    /// The application is no longer visible; stop the frame loop.
    Pause,

    /// One display refresh.
    Tick(Instant),
}

/// What the owner of the lifecycle should do next.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Control {
    Continue,
    Exit,
}
