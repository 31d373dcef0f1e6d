//! Frame timing.
//!
//! The frame scheduler owns one `FrameClock` and ticks it once per rendered
//! frame with the timestamp delivered by the vsync source.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
