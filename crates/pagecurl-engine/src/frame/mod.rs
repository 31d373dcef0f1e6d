//! Per-refresh frame scheduling.

mod scheduler;
mod vsync;

pub use scheduler::{FrameScheduler, TickOutcome};
pub use vsync::{Pacer, VsyncSource, Wake, WindowVsync};
