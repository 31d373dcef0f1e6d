//! Pagecurl engine crate.
//!
//! Binds a rendering engine to a native window surface and drives one render
//! pass per display refresh. The lifecycle pieces are generic over the
//! [`device::Engine`] contract; [`device::WgpuEngine`] is the wgpu backend.

pub mod assets;
pub mod coords;
pub mod device;
pub mod frame;
pub mod library;
pub mod lifecycle;
pub mod logging;
pub mod paint;
pub mod policy;
pub mod scene;
pub mod session;
pub mod surface;
pub mod time;
pub mod view;
pub mod window;

#[cfg(test)]
mod testing;
