use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTick {
    /// Milliseconds since the first tick after `new`/`reset`.
    pub elapsed_msec: f64,

    /// Time since the previous tick, in seconds, clamped. `0` on the first tick.
    pub interval_sec: f32,

    /// Frames per second derived from the raw interval. Holds the previous value
    /// when two ticks share a timestamp; `0` until a second tick.
    pub fps: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing [`FrameTick`] snapshots.
///
/// Driven either by host timestamps ([`tick_at`](Self::tick_at), e.g. from an
/// animation-frame callback) or by the monotonic clock ([`tick`](Self::tick)).
/// One clock per loop; never share delta-time state between loops.
///
/// Intervals are clamped to keep pathological values (debugger pauses,
/// minimized windows, stalls) away from simulation code.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    start_msec: Option<f64>,
    last_msec: f64,
    fps: f32,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps.
    ///
    /// Clamp rationale:
    /// - minimum prevents zero-dt behavior from tight loops on some platforms
    /// - maximum prevents simulation explosions after long stalls
    pub fn new() -> Self {
        Self::with_clamps(
            Duration::from_micros(100), // 0.0001s
            Duration::from_millis(250), // 0.25s
        )
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            origin: Instant::now(),
            start_msec: None,
            last_msec: 0.0,
            fps: 0.0,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the clock baseline; the next tick is treated as the first.
    ///
    /// Useful when resuming from suspension.
    pub fn reset(&mut self) {
        self.origin = Instant::now();
        self.start_msec = None;
        self.fps = 0.0;
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock using the monotonic clock.
    pub fn tick(&mut self) -> FrameTick {
        let now_msec = self.origin.elapsed().as_secs_f64() * 1000.0;
        self.tick_at(now_msec)
    }

    /// Advances the clock to a host timestamp in milliseconds.
    ///
    /// Timestamps going backwards are treated as a zero interval.
    pub fn tick_at(&mut self, timestamp_msec: f64) -> FrameTick {
        let Some(start) = self.start_msec else {
            self.start_msec = Some(timestamp_msec);
            self.last_msec = timestamp_msec;
            return self.advance(0.0, 0.0);
        };

        let raw_msec = (timestamp_msec - self.last_msec).max(0.0);
        self.last_msec = timestamp_msec;

        if raw_msec > 0.0 {
            self.fps = (1000.0 / raw_msec) as f32;
        }

        // Clamp delta time to keep downstream systems stable. Intervals too
        // large for a Duration count as the maximum.
        let dt = Duration::try_from_secs_f64(raw_msec / 1000.0)
            .map_or(self.dt_max, |dt| dt.clamp(self.dt_min, self.dt_max));

        self.advance(timestamp_msec - start, dt.as_secs_f32())
    }

    fn advance(&mut self, elapsed_msec: f64, interval_sec: f32) -> FrameTick {
        let tick = FrameTick {
            elapsed_msec,
            interval_sec,
            fps: self.fps,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        tick
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
