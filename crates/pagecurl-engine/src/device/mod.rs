//! Rendering engine collaborator.
//!
//! This module is responsible for:
//! - the `Engine` contract the lifecycle drives
//! - the wgpu implementation (instance/adapter/device/queue, per-window surfaces)
//! - mapping surface acquisition errors to frame-level actions

mod engine;
mod error;
mod frame;
mod init;
mod surface;
mod wgpu_engine;

pub use engine::Engine;
pub use error::SurfaceErrorAction;
pub use init::EngineInit;
pub use wgpu_engine::{WgpuEngine, WgpuSwapTarget};
