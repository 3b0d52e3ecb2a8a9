//! Time subsystem.
//!
//! - `TimeSource` abstracts where timestamps come from (injectable in tests)
//! - `FrameClock` counts ticks of the shared frame loop

mod frame_clock;
mod source;

pub use frame_clock::{FrameClock, FrameTime};
pub use source::{MonotonicClock, TimeSource};
