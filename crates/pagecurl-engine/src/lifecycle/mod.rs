//! Lifecycle owner: turns OS notifications into ordered binding, scheduling
//! and rendering operations.
//!
//! Notifications become [`LifecycleEvent`]s. The owner either dispatches them
//! inline (single-threaded platforms) or drains them from its queue with
//! `pump`, so no callback ever re-enters the render path.

mod error;
mod event;
mod handle;
#[allow(clippy::module_inception)]
mod lifecycle;

pub use error::LifecycleError;
pub use event::{Control, LifecycleEvent};
pub use handle::LifecycleHandle;
pub use lifecycle::Lifecycle;
