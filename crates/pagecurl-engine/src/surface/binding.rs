use crate::coords::SurfaceSize;
use crate::device::Engine;
use crate::policy::ViewportPolicy;
use crate::session::RenderSession;

/// Proof that the surface binding has been torn down.
///
/// Only `SurfaceBinding::release` creates one; `RenderSession::shutdown`
/// requires it, so a session cannot be destroyed while a swap target may still
/// call back into it.
#[derive(Debug)]
pub struct SurfaceReleased {
    _private: (),
}

/// Owns the swap target for the currently bound native surface.
///
/// Invariant: `target` is `Some` exactly while a surface is bound. The target is
/// always destroyed before a replacement is created.
pub struct SurfaceBinding<E: Engine> {
    target: Option<E::SwapTarget>,
    size: SurfaceSize,
    bind_count: u64,
}

impl<E: Engine> SurfaceBinding<E> {
    pub fn new() -> Self {
        Self {
            target: None,
            size: SurfaceSize::default(),
            bind_count: 0,
        }
    }

    /// A native surface became available (created or replaced).
    pub fn on_surface_available(&mut self, session: &mut RenderSession<E>, surface: E::Surface) {
        if let Some(previous) = self.target.take() {
            session.engine_mut().destroy_swap_target(previous);
            log::debug!("replaced swap target destroyed");
        }

        match session.engine_mut().create_swap_target(surface) {
            Ok(mut target) => {
                if self.size.is_presentable() {
                    session
                        .engine_mut()
                        .resize_swap_target(&mut target, self.size.width, self.size.height);
                }
                self.target = Some(target);
                self.bind_count += 1;
                session.mark_bound();
                log::debug!("surface bound (binding #{})", self.bind_count);
            }
            Err(e) => {
                session.mark_unbound();
                log::error!("failed to create swap target: {e:#}");
            }
        }
    }

    /// The native surface is going away.
    ///
    /// Returns only after the engine has drained every command that could still
    /// reference the destroyed target, so the OS may reclaim the surface.
    pub fn on_surface_lost(&mut self, session: &mut RenderSession<E>) {
        let Some(target) = self.target.take() else {
            return;
        };

        let engine = session.engine_mut();
        engine.destroy_swap_target(target);
        engine.flush_and_wait();

        session.mark_unbound();
        log::debug!("surface unbound");
    }

    /// The native surface changed size.
    pub fn on_surface_resized(
        &mut self,
        session: &mut RenderSession<E>,
        policy: &ViewportPolicy,
        width: u32,
        height: u32,
    ) {
        self.size = SurfaceSize::new(width, height);

        if self.size.is_presentable() {
            if let Some(target) = self.target.as_mut() {
                session.engine_mut().resize_swap_target(target, width, height);
            }
        }

        policy.on_resize(session.view_mut(), width, height);
        log::debug!("surface resized to {width}x{height}");
    }

    /// Whether a frame may be rendered: a target is bound and has a drawable size.
    pub fn is_ready(&self) -> bool {
        self.target.is_some() && self.size.is_presentable()
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn target_mut(&mut self) -> Option<&mut E::SwapTarget> {
        self.target.as_mut()
    }

    /// Last size reported for the surface.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Number of swap targets created over the binding's lifetime.
    pub fn bind_count(&self) -> u64 {
        self.bind_count
    }

    /// Tears the binding down for good.
    pub fn release(mut self, session: &mut RenderSession<E>) -> SurfaceReleased {
        self.on_surface_lost(session);
        SurfaceReleased { _private: () }
    }
}

impl<E: Engine> Default for SurfaceBinding<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionConfig, SessionState};
    use crate::testing::{Call, RecordingEngine};

    fn setup() -> (SurfaceBinding<RecordingEngine>, RenderSession<RecordingEngine>, ViewportPolicy) {
        let session = RenderSession::new(RecordingEngine::default(), &SessionConfig::default())
            .expect("session");
        (SurfaceBinding::new(), session, ViewportPolicy::default())
    }

    #[test]
    fn available_creates_target() {
        let (mut binding, mut session, _) = setup();
        binding.on_surface_available(&mut session, 1);

        assert!(binding.has_target());
        assert_eq!(session.state(), SessionState::Bound);
        assert_eq!(session.engine().live_targets(), 1);
    }

    #[test]
    fn replacement_destroys_before_creating() {
        let (mut binding, mut session, _) = setup();
        binding.on_surface_available(&mut session, 1);
        binding.on_surface_available(&mut session, 2);

        let calls = session.engine().lifecycle_calls();
        assert_eq!(calls, vec![Call::Create(1), Call::Destroy(1), Call::Create(2)]);
        assert_eq!(session.engine().live_targets(), 1);
        assert_eq!(session.engine().max_live_targets(), 1);
    }

    #[test]
    fn lost_destroys_then_drains() {
        let (mut binding, mut session, _) = setup();
        binding.on_surface_available(&mut session, 7);
        binding.on_surface_lost(&mut session);

        assert!(!binding.has_target());
        assert_eq!(session.state(), SessionState::Unbound);
        let calls = session.engine().lifecycle_calls();
        assert_eq!(calls, vec![Call::Create(7), Call::Destroy(7), Call::Drain]);
    }

    #[test]
    fn lost_without_target_is_noop() {
        let (mut binding, mut session, _) = setup();
        binding.on_surface_lost(&mut session);
        binding.on_surface_available(&mut session, 1);
        binding.on_surface_lost(&mut session);
        binding.on_surface_lost(&mut session);

        let calls = session.engine().lifecycle_calls();
        assert_eq!(calls, vec![Call::Create(1), Call::Destroy(1), Call::Drain]);
    }

    #[test]
    fn failed_creation_leaves_binding_empty() {
        let (mut binding, mut session, policy) = setup();
        session.engine_mut().fail_next_create = true;

        binding.on_surface_available(&mut session, 3);
        binding.on_surface_resized(&mut session, &policy, 640, 480);

        assert!(!binding.has_target());
        assert!(!binding.is_ready());
        assert_eq!(session.state(), SessionState::Unbound);
    }

    #[test]
    fn ready_needs_target_and_size() {
        let (mut binding, mut session, policy) = setup();
        binding.on_surface_available(&mut session, 1);
        assert!(!binding.is_ready());

        binding.on_surface_resized(&mut session, &policy, 0, 480);
        assert!(!binding.is_ready());

        binding.on_surface_resized(&mut session, &policy, 640, 480);
        assert!(binding.is_ready());
    }

    #[test]
    fn resize_is_forwarded_to_target_and_view() {
        let (mut binding, mut session, policy) = setup();
        binding.on_surface_available(&mut session, 1);
        binding.on_surface_resized(&mut session, &policy, 800, 600);

        assert_eq!(session.engine().target_size(1), Some((800, 600)));
        assert_eq!(session.view().viewport(), crate::coords::Viewport::full(800, 600));
    }

    #[test]
    fn rebind_applies_last_known_size() {
        let (mut binding, mut session, policy) = setup();
        binding.on_surface_available(&mut session, 1);
        binding.on_surface_resized(&mut session, &policy, 1024, 768);
        binding.on_surface_lost(&mut session);
        binding.on_surface_available(&mut session, 2);

        assert!(binding.is_ready());
        assert_eq!(session.engine().target_size(2), Some((1024, 768)));
        assert_eq!(binding.bind_count(), 2);
    }

    #[test]
    fn release_drains_and_returns_token() {
        let (mut binding, mut session, _) = setup();
        binding.on_surface_available(&mut session, 1);
        let _released = binding.release(&mut session);

        assert_eq!(session.engine().live_targets(), 0);
        assert_eq!(session.engine().drains(), 1);
    }
}
