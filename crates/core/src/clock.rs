//! Clock module - elapsed-time sources for the game loop
//!
//! The game state never reads wall time itself. A frame scheduler owns a [`Clock`] and
//! feeds its deltas to [`GameState::advance`](crate::GameState::advance).

use std::time::{Duration, Instant};

/// Source of elapsed milliseconds since the previous call.
pub trait Clock {
    fn delta_ms(&mut self) -> u32;
}

/// Wall-clock time based on [`Instant`].
///
/// Sub-millisecond remainders carry over to the next call, so frames of ~16.7ms add up
/// without drift.
#[derive(Debug, Clone)]
pub struct SystemClock {
    last: Instant,
    carry: Duration,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            carry: Duration::ZERO,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn delta_ms(&mut self) -> u32 {
        let now = Instant::now();
        let total = self.carry + now.duration_since(self.last);
        self.last = now;

        let ms = total.as_millis().min(u32::MAX as u128) as u32;
        self.carry = total.saturating_sub(Duration::from_millis(ms as u64));
        ms
    }
}

/// Scripted clock: time only passes when [`ManualClock::advance`] is called.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    pending_ms: u32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: u32) {
        self.pending_ms = self.pending_ms.saturating_add(ms);
    }
}

impl Clock for ManualClock {
    fn delta_ms(&mut self) -> u32 {
        std::mem::take(&mut self.pending_ms)
    }
}
