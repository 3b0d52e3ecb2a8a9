use std::time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds. Zero on the first tick.
    pub dt: f32,

    /// Timestamp the frame was drawn at.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock for the shared render loop.
///
/// Timestamps are supplied by the caller (normally from the engine's
/// [`TimeSource`](super::TimeSource)) so the loop can be driven deterministically.
/// Per-surface shader time is not derived from this clock: each instance measures
/// elapsed time from its own activation timestamp.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks recorded so far.
    pub fn frames(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock to `now` and returns a new `FrameTime`.
    pub fn tick(&mut self, now: Instant) -> FrameTime {
        let dt = self
            .last
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32());

        self.last = Some(now);

        let ft = FrameTime {
            dt,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_tick_has_zero_dt() {
        let mut clock = FrameClock::new();
        let ft = clock.tick(Instant::now());
        assert_eq!(ft.dt, 0.0);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn dt_measures_gap_between_ticks() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick(t0);
        let ft = clock.tick(t0 + Duration::from_millis(16));
        assert!((ft.dt - 0.016).abs() < 1e-4);
        assert_eq!(ft.frame_index, 1);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn backwards_timestamp_saturates() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now() + Duration::from_secs(1);
        clock.tick(t0);
        let ft = clock.tick(t0 - Duration::from_millis(500));
        assert_eq!(ft.dt, 0.0);
    }
}
