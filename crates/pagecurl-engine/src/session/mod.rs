//! Render session: engine, view and the per-frame begin/render/end protocol.

mod config;
mod error;
#[allow(clippy::module_inception)]
mod session;

pub use config::SessionConfig;
pub use error::FrameError;
pub use session::{ActiveFrame, RenderSession, SessionState};
