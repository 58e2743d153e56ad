// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Paces the 60Hz timers against wall-clock time, independent of the instruction rate

use std::time::Duration;

/// The rate at which the delay and sound timers count down
pub const TIMER_HZ: u32 = 60;

/// Accumulates elapsed wall time, and tells the driver how many timer ticks are due.
///
/// # Examples
/// ```rust
/// # use chip8_vm::*;
/// # use std::time::Duration;
/// let mut clock = TimerClock::default();
/// assert_eq!(0, clock.advance(Duration::from_millis(10)));
/// assert_eq!(1, clock.advance(Duration::from_millis(10)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerClock {
    period: Duration,
    pending: Duration,
}

impl Default for TimerClock {
    fn default() -> Self {
        Self::new(TIMER_HZ)
    }
}

impl TimerClock {
    /// Creates a clock which ticks `hz` times per second
    pub fn new(hz: u32) -> Self {
        TimerClock {
            period: Duration::from_nanos(1_000_000_000 / hz.max(1) as u64),
            pending: Duration::ZERO,
        }
    }

    /// Gets the time between ticks
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Feeds `elapsed` wall time into the clock, and returns the number of ticks now due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.pending += elapsed;
        let mut ticks = 0;
        while self.pending >= self.period {
            self.pending -= self.period;
            ticks += 1;
        }
        ticks
    }
}
