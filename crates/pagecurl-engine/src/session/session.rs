use anyhow::{Context, Result};

use crate::device::Engine;
use crate::scene::MaterialInfo;
use crate::surface::SurfaceReleased;
use crate::view::{Camera, View};

use super::config::SessionConfig;
use super::error::FrameError;

/// Where a session is in its lifetime.
///
/// `Created → Bound → Rendering → Bound … → Unbound`. The terminal destroyed
/// state is the session being consumed by [`RenderSession::shutdown`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No surface has been bound yet.
    Created,
    /// A swap target is bound; frames may start.
    Bound,
    /// Between `begin_frame` and the end of the frame.
    Rendering,
    /// The surface was lost; waiting for a new one.
    Unbound,
}

/// Owns the engine and the view it renders for the whole application lifetime.
pub struct RenderSession<E: Engine> {
    engine: E,
    view: View,
    state: SessionState,
    frames_submitted: u64,
}

impl<E: Engine> RenderSession<E> {
    /// Creates the session and builds the configured scene.
    pub fn new(mut engine: E, config: &SessionConfig) -> Result<Self> {
        engine
            .build_scene(&config.scene)
            .context("failed to build scene")?;

        let camera = Camera::new(config.projection.projection(1.0));
        let view = View::new(camera, config.clear_color);

        log::debug!("render session created");

        Ok(Self {
            engine,
            view,
            state: SessionState::Created,
            frames_submitted: 0,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Frames that went through begin/render/end.
    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    pub(crate) fn mark_bound(&mut self) {
        self.transition(SessionState::Bound);
    }

    pub(crate) fn mark_unbound(&mut self) {
        if self.state != SessionState::Created {
            self.transition(SessionState::Unbound);
        }
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            log::trace!("session {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    /// Starts a frame against `target`.
    ///
    /// The returned guard is the only way to render; the frame ends when the
    /// guard is ended or dropped.
    pub fn begin_frame<'s>(
        &'s mut self,
        target: Option<&mut E::SwapTarget>,
    ) -> Result<ActiveFrame<'s, E>, FrameError> {
        let target = target.ok_or(FrameError::NoSwapTarget)?;

        self.engine.begin_frame(target).map_err(FrameError::Surface)?;
        self.transition(SessionState::Rendering);

        Ok(ActiveFrame {
            session: self,
            ended: false,
        })
    }

    /// Builds a material from an opaque payload.
    pub fn load_material(&mut self, payload: &[u8]) -> Result<MaterialInfo> {
        self.engine.load_material(payload)
    }

    /// Releases renderer and view resources and hands the engine back for
    /// final destruction.
    pub fn shutdown(self, _released: SurfaceReleased) -> E {
        let Self {
            mut engine,
            view,
            frames_submitted,
            ..
        } = self;

        engine.release_renderer();
        engine.release_view(&view);

        log::debug!("render session destroyed after {frames_submitted} frames");
        engine
    }
}

/// A frame in progress.
pub struct ActiveFrame<'s, E: Engine> {
    session: &'s mut RenderSession<E>,
    ended: bool,
}

impl<E: Engine> ActiveFrame<'_, E> {
    /// Submits the session view's draw commands for this frame.
    pub fn render(&mut self) {
        let session = &mut *self.session;
        session.engine.render(&session.view);
    }

    /// Completes the frame.
    pub fn end(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;

        let session = &mut *self.session;
        session.engine.end_frame();
        session.frames_submitted += 1;
        session.transition(SessionState::Bound);
    }
}

impl<E: Engine> Drop for ActiveFrame<'_, E> {
    fn drop(&mut self) {
        self.finish();
    }
}
