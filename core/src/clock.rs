//! Virtual clock for deterministic sequencing
//!
//! Hosts that don't own a real timer source (tests, replays, headless
//! previews) advance this clock by hand and feed `now()` to the sequencer.

use birthday_types::Millis;

/// Manually advanced clock, in milliseconds since mount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VirtualClock {
    now: Millis,
}

impl VirtualClock {
    /// Create a clock at t = 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock at a given offset
    pub fn starting_at(now: Millis) -> Self {
        Self { now }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Move forward by `delta` and return the new time
    pub fn advance_by(&mut self, delta: Millis) -> Millis {
        self.now += delta;
        self.now
    }

    /// Move to `time`. Never moves backwards.
    pub fn advance_to(&mut self, time: Millis) -> Millis {
        self.now = self.now.max(time);
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance() {
        let mut clock = VirtualClock::new();
        assert_eq!(clock.now(), 0);

        assert_eq!(clock.advance_by(500), 500);
        assert_eq!(clock.advance_to(1200), 1200);
    }

    #[test]
    fn test_never_moves_backwards() {
        let mut clock = VirtualClock::starting_at(2500);
        assert_eq!(clock.advance_to(1000), 2500);
    }
}
