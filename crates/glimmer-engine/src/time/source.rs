use std::time::Instant;

/// Supplies timestamps for activation origins and frame ticks.
pub trait TimeSource {
    fn now(&self) -> Instant;
}

/// Wall-clock time source backed by [`Instant::now`].
#[derive(Debug, Copy, Clone, Default)]
pub struct MonotonicClock;

impl TimeSource for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}
