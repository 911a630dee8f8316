//! Wall-clock handling for the render tick.
//!
//! Hosts feed the player from different clocks (requestAnimationFrame, a native
//! frame loop, a test harness), so the source of "now" sits behind [`Clock`].

/// Largest frame delta handed to playback, in seconds.
pub const DEFAULT_MAX_DELTA: f32 = 0.064;

/// Source of wall-clock time in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Monotonic clock measured from the moment it was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: instant::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: instant::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Frame delta accumulator with clamping and FPS measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeKeeper {
    last_time: f64,
    delta: f32,
    max_delta: f32,
    total_time: f64,
    frame_count: u32,
    frame_time: f32,
    frames_per_second: f32,
}

impl TimeKeeper {
    /// Start measuring from `now`.
    pub fn new(now: f64, max_delta: f32) -> Self {
        Self {
            last_time: now,
            delta: 0.0,
            max_delta,
            total_time: 0.0,
            frame_count: 0,
            frame_time: 0.0,
            frames_per_second: 0.0,
        }
    }

    /// Record a new frame at `now`.
    ///
    /// Accumulators see the true gap; only the reported [`delta`](Self::delta) is
    /// clamped, so a stall (backgrounded tab, debugger) does not fling the pose forward.
    pub fn update(&mut self, now: f64) {
        // A clock that stepped backwards counts as no time passing.
        let elapsed = (now - self.last_time).max(0.0);
        self.last_time = now;

        self.total_time += elapsed;
        self.frame_time += elapsed as f32;
        self.delta = (elapsed as f32).min(self.max_delta);

        self.frame_count += 1;
        if self.frame_time > 1.0 {
            self.frames_per_second = self.frame_count as f32 / self.frame_time;
            self.frame_time = 0.0;
            self.frame_count = 0;
        }
    }

    /// Clamped time since the previous update.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    #[inline]
    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Unclamped time accumulated over every update.
    #[inline]
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Last measured frame rate; 0 until a full second has been observed.
    #[inline]
    pub fn frames_per_second(&self) -> f32 {
        self.frames_per_second
    }
}
