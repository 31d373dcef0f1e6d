use std::time::{Duration, Instant};

/// Timing snapshot for one rendered frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous rendered frame, in seconds.
    pub dt: f32,

    /// Timestamp of the refresh tick that produced the frame.
    pub now: Instant,

    /// Monotonic rendered-frame counter.
    pub frame_index: u64,
}

/// Turns vsync tick timestamps into `FrameTime` snapshots.
///
/// Delta time is clamped so that a long pause (app in background, surface lost,
/// debugger break) does not hand a huge step to whatever consumes the frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: None,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Forgets the previous tick.
    ///
    /// Called when the scheduler is (re)started so the first frame after a pause
    /// reports the minimum delta instead of the pause length.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Number of frames produced so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock using the current time.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to the tick timestamp `now`.
    ///
    /// Timestamps that go backwards yield the minimum delta.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => self.dt_min,
        }
        .clamp(self.dt_min, self.dt_max);

        self.last = Some(now);

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_reports_minimum_delta() {
        let mut clock = FrameClock::new();
        let ft = clock.tick_at(Instant::now());
        assert_eq!(ft.frame_index, 0);
        assert!((ft.dt - 0.0001).abs() < 1e-6);
    }

    #[test]
    fn delta_follows_timestamps() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        let ft = clock.tick_at(t0 + Duration::from_millis(16));
        assert_eq!(ft.frame_index, 1);
        assert!((ft.dt - 0.016).abs() < 1e-4);
    }

    #[test]
    fn long_pause_is_clamped() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        let ft = clock.tick_at(t0 + Duration::from_secs(5));
        assert!((ft.dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn reset_keeps_frame_index() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        clock.reset();
        let ft = clock.tick_at(t0 + Duration::from_secs(3));
        assert_eq!(ft.frame_index, 1);
        assert!((ft.dt - 0.0001).abs() < 1e-6);
        assert_eq!(clock.frame_count(), 2);
    }
}
