use std::time::{Duration, Instant};

/// Timing for one update/draw cycle.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Seconds since the clock was created.
    pub elapsed: f32,

    /// Number of ticks before this one.
    pub frame_index: u64,
}

/// Produces [`FrameTime`] values, one per `tick`.
///
/// Delta time is clamped to `[min_dt, max_dt]` so a stall (debugger pause,
/// window drag on some platforms) does not turn into one huge movement step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    min_dt: Duration,
    max_dt: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clamps(min_dt: Duration, max_dt: Duration) -> Self {
        debug_assert!(min_dt <= max_dt);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            min_dt,
            max_dt,
        }
    }

    /// Restarts delta measurement from now, e.g. after the window was hidden.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.min_dt, self.max_dt);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}
