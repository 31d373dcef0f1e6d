//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window and turns their callbacks into
//! lifecycle events.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
