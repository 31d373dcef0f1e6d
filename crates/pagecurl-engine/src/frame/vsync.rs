use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::window::Window;

/// Source of display-refresh callbacks.
///
/// `request_frame` asks for exactly one tick at the next refresh; the scheduler
/// calls it again from every tick to keep the loop going.
pub trait VsyncSource {
    fn request_frame(&mut self);

    /// Withdraws a pending request, when the platform supports it.
    fn cancel_frame(&mut self) {}

    /// Reports how a running tick ended. `presented` is false when nothing
    /// reached the display, so nothing paced the loop.
    fn tick_finished(&mut self, now: Instant, presented: bool) {
        let _ = (now, presented);
    }
}

/// When the next redraw should be issued.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Wake {
    /// No frame requested.
    Idle,
    /// Issue the redraw now.
    Now,
    /// Sleep until the deadline, then issue it.
    At(Instant),
}

/// Paces redraw requests.
///
/// After a presented frame the present itself blocks on the display, so the
/// next redraw is issued right away. After a tick that presented nothing the
/// next redraw waits one refresh interval.
#[derive(Debug, Clone)]
pub struct Pacer {
    interval: Duration,
    pending: bool,
    last_idle_tick: Option<Instant>,
}

impl Pacer {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_micros(16_667);

    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: false,
            last_idle_tick: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn request(&mut self) {
        self.pending = true;
    }

    pub fn cancel(&mut self) {
        self.pending = false;
        self.last_idle_tick = None;
    }

    pub fn tick_finished(&mut self, now: Instant, presented: bool) {
        self.last_idle_tick = (!presented).then_some(now);
    }

    /// Decides what to do at `now`. Returning `Now` consumes the request.
    pub fn poll(&mut self, now: Instant) -> Wake {
        if !self.pending {
            return Wake::Idle;
        }

        if let Some(last) = self.last_idle_tick {
            let deadline = last + self.interval;
            if now < deadline {
                return Wake::At(deadline);
            }
        }

        self.pending = false;
        Wake::Now
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

/// Vsync source backed by winit redraw requests.
///
/// The owner of the event loop calls [`WindowVsync::poll`] from
/// `about_to_wait` and sleeps until the returned deadline.
#[derive(Debug, Default)]
pub struct WindowVsync {
    window: Option<Arc<Window>>,
    pacer: Pacer,
}

impl WindowVsync {
    pub fn attach(&mut self, window: Arc<Window>) {
        let interval = window
            .current_monitor()
            .and_then(|m| m.refresh_rate_millihertz())
            .filter(|mhz| *mhz > 0)
            .map(|mhz| Duration::from_secs_f64(1000.0 / f64::from(mhz)))
            .unwrap_or(Pacer::DEFAULT_INTERVAL);

        log::debug!("refresh interval {interval:?}");
        self.pacer.set_interval(interval);
        self.window = Some(window);
    }

    pub fn detach(&mut self) {
        self.window = None;
        self.pacer.cancel();
    }

    /// Issues a due redraw. Returns the deadline to sleep until, if any.
    pub fn poll(&mut self, now: Instant) -> Option<Instant> {
        let Some(window) = &self.window else {
            return None;
        };

        match self.pacer.poll(now) {
            Wake::Idle => None,
            Wake::Now => {
                window.request_redraw();
                None
            }
            Wake::At(deadline) => Some(deadline),
        }
    }
}

impl VsyncSource for WindowVsync {
    fn request_frame(&mut self) {
        self.pacer.request();
    }

    fn cancel_frame(&mut self) {
        self.pacer.cancel();
    }

    fn tick_finished(&mut self, now: Instant, presented: bool) {
        self.pacer.tick_finished(now, presented);
    }
}
