//! IntervalTimer - a millisecond-accumulator timer.
//!
//! Replaces engine timer callbacks with an explicit per-tick abstraction
//! so the supply state machine is testable without wall-clock waits. A
//! repeating timer restarts itself on expiry; a one-shot timer stops.

/// A tick-driven countdown timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    interval_ms: u32,
    elapsed_ms: u32,
    running: bool,
    one_shot: bool,
}

impl IntervalTimer {
    /// A stopped repeating timer with the given expiry interval.
    pub fn repeating(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
            running: false,
            one_shot: false,
        }
    }

    /// A stopped one-shot timer with the given expiry interval.
    pub fn one_shot(interval_ms: u32) -> Self {
        Self {
            one_shot: true,
            ..Self::repeating(interval_ms)
        }
    }

    /// (Re)start counting from zero with the configured interval.
    pub fn start(&mut self) {
        self.elapsed_ms = 0;
        self.running = true;
    }

    /// Restart with a new interval.
    pub fn start_with(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
        self.start();
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
    }

    pub fn is_stopped(&self) -> bool {
        !self.running
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Advance by `elapsed_ms`; returns true when the timer expired during
    /// this tick. A repeating timer carries the overshoot into its next
    /// period; a one-shot timer stops.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_ms += elapsed_ms;
        if self.elapsed_ms < self.interval_ms {
            return false;
        }
        if self.one_shot {
            self.stop();
        } else {
            self.elapsed_ms -= self.interval_ms;
        }
        true
    }
}
