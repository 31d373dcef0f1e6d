use anyhow::Result;
use crossbeam_channel::{Receiver, Sender};

use crate::device::Engine;
use crate::frame::{FrameScheduler, TickOutcome, VsyncSource};
use crate::policy::ViewportPolicy;
use crate::session::{RenderSession, SessionConfig};
use crate::surface::SurfaceBinding;

use super::event::{Control, LifecycleEvent};
use super::handle::LifecycleHandle;

/// Single owner of the surface binding, frame scheduler, render session and
/// viewport policy.
///
/// All mutation happens in `dispatch`, one event at a time, on the thread that
/// owns the lifecycle. Other threads reach it through [`LifecycleHandle`].
pub struct Lifecycle<E: Engine, V: VsyncSource> {
    binding: SurfaceBinding<E>,
    scheduler: FrameScheduler<V>,
    session: RenderSession<E>,
    policy: ViewportPolicy,

    inbox: Receiver<LifecycleEvent<E::Surface>>,
    outbox: Sender<LifecycleEvent<E::Surface>>,
}

impl<E: Engine, V: VsyncSource> Lifecycle<E, V> {
    pub fn new(engine: E, vsync: V, config: &SessionConfig) -> Result<Self> {
        let session = RenderSession::new(engine, config)?;
        let (outbox, inbox) = crossbeam_channel::unbounded();

        Ok(Self {
            binding: SurfaceBinding::new(),
            scheduler: FrameScheduler::new(vsync),
            session,
            policy: ViewportPolicy::new(config.projection),
            inbox,
            outbox,
        })
    }

    pub fn handle(&self) -> LifecycleHandle<E::Surface> {
        LifecycleHandle::new(self.outbox.clone())
    }

    pub fn session(&self) -> &RenderSession<E> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut RenderSession<E> {
        &mut self.session
    }

    pub fn binding(&self) -> &SurfaceBinding<E> {
        &self.binding
    }

    pub fn scheduler(&self) -> &FrameScheduler<V> {
        &self.scheduler
    }

    pub fn vsync_mut(&mut self) -> &mut V {
        self.scheduler.vsync_mut()
    }

    /// Processes one event.
    pub fn dispatch(&mut self, event: LifecycleEvent<E::Surface>) -> Control {
        match event {
            LifecycleEvent::SurfaceAvailable(surface) => {
                self.binding.on_surface_available(&mut self.session, surface);
            }
            LifecycleEvent::SurfaceResized { width, height } => {
                self.binding
                    .on_surface_resized(&mut self.session, &self.policy, width, height);
            }
            LifecycleEvent::SurfaceLost { ack } => {
                self.binding.on_surface_lost(&mut self.session);
                if let Some(ack) = ack {
                    // The poster may have given up waiting.
                    let _ = ack.send(());
                }
            }
            LifecycleEvent::Resume => self.scheduler.start(),
            LifecycleEvent::Pause => self.scheduler.stop(),
            LifecycleEvent::Tick(now) => {
                let outcome = self
                    .scheduler
                    .on_tick(now, &mut self.binding, &mut self.session);

                if let TickOutcome::Skipped(action) = outcome {
                    if action.is_fatal() {
                        log::error!("fatal surface error; stopping");
                        self.scheduler.stop();
                        return Control::Exit;
                    }
                }
            }
        }

        Control::Continue
    }

    /// Processes every queued event in arrival order.
    ///
    /// Stops early and returns `Exit` if an event asks for it; the remaining
    /// events stay queued.
    pub fn pump(&mut self) -> Control {
        while let Ok(event) = self.inbox.try_recv() {
            if self.dispatch(event) == Control::Exit {
                return Control::Exit;
            }
        }
        Control::Continue
    }

    /// Stops the frame loop, releases the surface (draining the engine), then
    /// destroys the session. Returns the engine for final destruction.
    ///
    /// Events still queued are processed first so no blocked poster is left
    /// waiting on an acknowledgement.
    pub fn shutdown(mut self) -> E {
        let _ = self.pump();

        let Self {
            binding,
            mut scheduler,
            mut session,
            ..
        } = self;

        scheduler.stop();
        let released = binding.release(&mut session);
        session.shutdown(released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::SurfaceErrorAction;
    use crate::testing::{Call, CountingVsync, RecordingEngine};
    use std::time::Instant;

    fn lifecycle() -> Lifecycle<RecordingEngine, CountingVsync> {
        Lifecycle::new(
            RecordingEngine::default(),
            CountingVsync::default(),
            &SessionConfig::default(),
        )
        .expect("lifecycle")
    }

    #[test]
    fn fatal_surface_error_exits() {
        let mut lc = lifecycle();
        lc.dispatch(LifecycleEvent::Resume);
        lc.dispatch(LifecycleEvent::SurfaceAvailable(1));
        lc.dispatch(LifecycleEvent::SurfaceResized { width: 10, height: 10 });
        lc.session_mut().engine_mut().begin_error = Some(SurfaceErrorAction::Fatal);

        assert_eq!(lc.dispatch(LifecycleEvent::Tick(Instant::now())), Control::Exit);
        assert!(!lc.scheduler().is_running());
    }

    #[test]
    fn pump_processes_in_order() {
        let mut lc = lifecycle();
        let handle = lc.handle();
        handle.surface_available(1).unwrap();
        handle.surface_available(2).unwrap();
        handle.surface_resized(320, 240).unwrap();

        assert_eq!(lc.pump(), Control::Continue);
        assert_eq!(
            lc.session().engine().lifecycle_calls(),
            vec![Call::Create(1), Call::Destroy(1), Call::Create(2)]
        );
        assert!(lc.binding().is_ready());
    }

    #[test]
    fn pump_stops_at_exit() {
        let mut lc = lifecycle();
        let handle = lc.handle();
        handle.resume().unwrap();
        handle.surface_available(1).unwrap();
        handle.surface_resized(10, 10).unwrap();
        lc.pump();

        lc.session_mut().engine_mut().begin_error = Some(SurfaceErrorAction::Fatal);
        handle.tick(Instant::now()).unwrap();
        handle.surface_available(2).unwrap();

        assert_eq!(lc.pump(), Control::Exit);
        // The event after the fatal tick is still queued.
        assert_eq!(lc.session().engine().live_targets(), 1);
        assert_eq!(lc.pump(), Control::Continue);
        assert_eq!(lc.binding().bind_count(), 2);
    }

    #[test]
    fn handle_fails_after_shutdown() {
        let lc = lifecycle();
        let handle = lc.handle();
        let _engine = lc.shutdown();
        assert!(handle.resume().is_err());
        assert!(handle.surface_lost_blocking().is_err());
    }

    #[test]
    fn shutdown_order_is_stop_release_destroy() {
        let mut lc = lifecycle();
        lc.dispatch(LifecycleEvent::Resume);
        lc.dispatch(LifecycleEvent::SurfaceAvailable(5));

        let engine = lc.shutdown();
        let tail: Vec<Call> = engine.calls().iter().rev().take(4).rev().copied().collect();
        assert_eq!(
            tail,
            vec![Call::Destroy(5), Call::Drain, Call::ReleaseRenderer, Call::ReleaseView]
        );
        assert_eq!(engine.live_targets(), 0);
    }
}
