// src/runtime/timer.rs

/// One-second-resolution countdown driving forced finalization.
///
/// The countdown itself is plain data; the owner advances it once per
/// second while the attempt is in the ready phase. Expiry is reported
/// exactly once so the finalize path cannot be triggered twice by the
/// clock.
#[derive(Debug)]
pub struct Countdown {
    remaining: u64,
    fired: bool,
}

impl Countdown {
    pub fn new(seconds: u64) -> Self {
        Self {
            remaining: seconds,
            fired: false,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Advances the clock by one second. Returns `true` only on the tick
    /// that reaches zero; the count never goes negative and expiry never
    /// re-fires.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 && !self.fired {
            self.fired = true;
            return true;
        }
        false
    }
}
