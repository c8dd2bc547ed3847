//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the host loop.
//! Intended usage:
//! - one `FrameClock` per loop; call `tick_at()` with the host timestamp (or
//!   `tick()`) once per frame to obtain a `FrameTick`
//! - a `TimerQueue` advanced by each tick's interval

mod frame_clock;
mod timers;

pub use frame_clock::{FrameClock, FrameTick};
pub use timers::{TimerCallback, TimerId, TimerQueue};
