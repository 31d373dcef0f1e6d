use std::time::Instant;

use crate::device::{Engine, SurfaceErrorAction};
use crate::session::{FrameError, RenderSession};
use crate::surface::SurfaceBinding;
use crate::time::{FrameClock, FrameTime};

use super::vsync::VsyncSource;

/// What a single refresh tick did.
#[derive(Debug, Copy, Clone)]
pub enum TickOutcome {
    /// The scheduler is stopped; the tick was ignored.
    Idle,
    /// No bound, sized surface; nothing was submitted.
    NotReady,
    /// One frame went through begin/render/end.
    Rendered(FrameTime),
    /// The engine declined the frame.
    Skipped(SurfaceErrorAction),
}

impl TickOutcome {
    pub fn rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

/// Drives one render pass per display refresh while running.
///
/// Ticks arrive on the owning thread one at a time, so frames are submitted in
/// refresh order and never overlap.
pub struct FrameScheduler<V: VsyncSource> {
    vsync: V,
    registered: bool,
    clock: FrameClock,
    ticks: u64,
}

impl<V: VsyncSource> FrameScheduler<V> {
    pub fn new(vsync: V) -> Self {
        Self {
            vsync,
            registered: false,
            clock: FrameClock::default(),
            ticks: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.registered
    }

    pub fn vsync(&self) -> &V {
        &self.vsync
    }

    pub fn vsync_mut(&mut self) -> &mut V {
        &mut self.vsync
    }

    /// Ticks handled while running, rendered or not.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.clock.frame_count()
    }

    /// Registers for the next refresh.
    pub fn start(&mut self) {
        if self.registered {
            return;
        }
        self.registered = true;
        self.clock.reset();
        self.vsync.request_frame();
        log::debug!("frame scheduler started");
    }

    /// Deregisters. An already submitted frame still completes inside the engine.
    pub fn stop(&mut self) {
        if !self.registered {
            return;
        }
        self.registered = false;
        self.vsync.cancel_frame();
        log::debug!("frame scheduler stopped");
    }

    /// Handles one refresh tick.
    pub fn on_tick<E: Engine>(
        &mut self,
        now: Instant,
        binding: &mut SurfaceBinding<E>,
        session: &mut RenderSession<E>,
    ) -> TickOutcome {
        if !self.registered {
            return TickOutcome::Idle;
        }

        // Re-arm first so the loop survives whatever the frame does.
        self.vsync.request_frame();
        self.ticks += 1;

        let outcome = self.render_once(now, binding, session);
        self.vsync.tick_finished(now, outcome.rendered());
        outcome
    }

    fn render_once<E: Engine>(
        &mut self,
        now: Instant,
        binding: &mut SurfaceBinding<E>,
        session: &mut RenderSession<E>,
    ) -> TickOutcome {
        if !binding.is_ready() {
            log::trace!("tick {}: surface not ready", self.ticks);
            return TickOutcome::NotReady;
        }

        match session.begin_frame(binding.target_mut()) {
            Ok(mut frame) => {
                frame.render();
                frame.end();
                let time = self.clock.tick_at(now);
                log::trace!("frame {} rendered (dt {:.4}s)", time.frame_index, time.dt);
                TickOutcome::Rendered(time)
            }
            Err(FrameError::NoSwapTarget) => TickOutcome::NotReady,
            Err(FrameError::Surface(action)) => {
                log::debug!("frame skipped: {action:?}");
                TickOutcome::Skipped(action)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ViewportPolicy;
    use crate::session::SessionConfig;
    use crate::testing::{CountingVsync, RecordingEngine};

    struct Rig {
        scheduler: FrameScheduler<CountingVsync>,
        binding: SurfaceBinding<RecordingEngine>,
        session: RenderSession<RecordingEngine>,
        policy: ViewportPolicy,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                scheduler: FrameScheduler::new(CountingVsync::default()),
                binding: SurfaceBinding::new(),
                session: RenderSession::new(RecordingEngine::default(), &SessionConfig::default())
                    .expect("session"),
                policy: ViewportPolicy::default(),
            }
        }

        fn bind(&mut self, id: u32, width: u32, height: u32) {
            self.binding.on_surface_available(&mut self.session, id);
            self.binding
                .on_surface_resized(&mut self.session, &self.policy, width, height);
        }

        fn tick(&mut self) -> TickOutcome {
            self.scheduler
                .on_tick(Instant::now(), &mut self.binding, &mut self.session)
        }
    }

    #[test]
    fn tick_before_bind_is_noop() {
        let mut rig = Rig::new();
        rig.scheduler.start();

        assert!(matches!(rig.tick(), TickOutcome::NotReady));
        assert_eq!(rig.session.engine().renders(), 0);
        // Still re-armed.
        assert_eq!(rig.scheduler.vsync().requests, 2);
    }

    #[test]
    fn bound_tick_renders_once() {
        let mut rig = Rig::new();
        rig.scheduler.start();
        rig.bind(1, 800, 600);

        assert!(rig.tick().rendered());
        assert_eq!(rig.session.engine().renders(), 1);
        assert_eq!(rig.scheduler.frames(), 1);
    }

    #[test]
    fn stop_suppresses_all_ticks() {
        let mut rig = Rig::new();
        rig.scheduler.start();
        rig.bind(1, 800, 600);
        rig.tick();
        rig.scheduler.stop();

        let requests = rig.scheduler.vsync().requests;
        for _ in 0..50 {
            assert!(matches!(rig.tick(), TickOutcome::Idle));
        }

        assert_eq!(rig.session.engine().renders(), 1);
        assert_eq!(rig.scheduler.vsync().requests, requests);
        assert_eq!(rig.scheduler.vsync().cancels, 1);

        rig.scheduler.start();
        assert!(rig.tick().rendered());
        assert_eq!(rig.session.engine().renders(), 2);
    }

    #[test]
    fn start_is_idempotent() {
        let mut rig = Rig::new();
        rig.scheduler.start();
        rig.scheduler.start();
        assert_eq!(rig.scheduler.vsync().requests, 1);
    }

    #[test]
    fn declined_frame_still_rearms() {
        let mut rig = Rig::new();
        rig.scheduler.start();
        rig.bind(1, 800, 600);
        rig.session.engine_mut().begin_error = Some(SurfaceErrorAction::Reconfigured);

        assert!(matches!(
            rig.tick(),
            TickOutcome::Skipped(SurfaceErrorAction::Reconfigured)
        ));
        assert_eq!(rig.scheduler.vsync().requests, 2);
        assert_eq!(rig.scheduler.frames(), 0);
    }

    #[test]
    fn reports_whether_each_running_tick_presented() {
        let mut rig = Rig::new();
        rig.scheduler.start();
        rig.tick();
        rig.bind(1, 800, 600);
        rig.tick();
        rig.session.engine_mut().begin_error = Some(SurfaceErrorAction::SkipFrame);
        rig.tick();
        rig.scheduler.stop();
        rig.tick();

        assert_eq!(rig.scheduler.vsync().presented, vec![false, true, false]);
    }

    #[test]
    fn ticks_after_loss_do_not_render() {
        let mut rig = Rig::new();
        rig.scheduler.start();
        rig.bind(1, 800, 600);
        rig.binding.on_surface_lost(&mut rig.session);

        for _ in 0..3 {
            assert!(matches!(rig.tick(), TickOutcome::NotReady));
        }
        assert_eq!(rig.session.engine().renders(), 0);
        assert_eq!(rig.scheduler.ticks(), 3);
    }
}
