//! Policies reacting to surface changes.

mod viewport;

pub use viewport::{ProjectionConfig, ViewportPolicy};
