//! Countdown timers shared by the bridge state machines.

use crate::config::Ticks;

/// Named timers held by the [`TimeoutBank`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Timeout {
    /// Volume key and CEC user-control repeat cadence.
    Repeat,
    /// TV power query interval.
    TvQuery,
    /// Discovery probe window and background ping interval.
    Discovery,
    /// Routing broadcast debounce window.
    Routing,
    /// Gap allowed between inbound serial bytes.
    SerialRx,
    /// Pause after an outbound serial message.
    SerialTxPause,
}

impl Timeout {
    pub const ALL: [Timeout; 6] = [
        Timeout::Repeat,
        Timeout::TvQuery,
        Timeout::Discovery,
        Timeout::Routing,
        Timeout::SerialRx,
        Timeout::SerialTxPause,
    ];

    const fn index(self) -> usize {
        match self {
            Timeout::Repeat => 0,
            Timeout::TvQuery => 1,
            Timeout::Discovery => 2,
            Timeout::Routing => 3,
            Timeout::SerialRx => 4,
            Timeout::SerialTxPause => 5,
        }
    }
}

/// Signed countdown counters.
///
/// A timer is expired once its value drops below zero. Expired timers stop
/// counting and keep their value until they are armed again.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeoutBank {
    counters: [i16; Timeout::ALL.len()],
}

impl TimeoutBank {
    /// Creates a bank with every timer at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counters: [0; Timeout::ALL.len()],
        }
    }

    /// Subtracts `elapsed` from every timer that has not yet expired.
    pub fn tick(&mut self, elapsed: Ticks) {
        for counter in &mut self.counters {
            if *counter >= 0 {
                *counter = counter.saturating_sub(elapsed.get());
            }
        }
    }

    /// Sets `timer` to `ticks`.
    pub fn arm(&mut self, timer: Timeout, ticks: Ticks) {
        self.counters[timer.index()] = ticks.get();
    }

    /// Returns the raw value of `timer`.
    #[must_use]
    pub fn remaining(&self, timer: Timeout) -> i16 {
        self.counters[timer.index()]
    }

    /// Returns `true` once `timer` has counted below zero.
    #[must_use]
    pub fn is_expired(&self, timer: Timeout) -> bool {
        self.remaining(timer) < 0
    }

    /// Returns `true` once `timer` has reached zero.
    #[must_use]
    pub fn is_due(&self, timer: Timeout) -> bool {
        self.remaining(timer) <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_timers_hold_their_value() {
        let mut bank = TimeoutBank::new();
        bank.arm(Timeout::Routing, Ticks::new(3));

        bank.tick(Ticks::new(2));
        assert_eq!(bank.remaining(Timeout::Routing), 1);
        assert!(!bank.is_expired(Timeout::Routing));

        bank.tick(Ticks::new(4));
        assert_eq!(bank.remaining(Timeout::Routing), -3);
        assert!(bank.is_expired(Timeout::Routing));

        bank.tick(Ticks::new(10));
        assert_eq!(bank.remaining(Timeout::Routing), -3);
    }

    #[test]
    fn due_includes_zero_but_expired_does_not() {
        let mut bank = TimeoutBank::new();
        bank.arm(Timeout::Repeat, Ticks::new(1));
        bank.tick(Ticks::new(1));
        assert!(bank.is_due(Timeout::Repeat));
        assert!(!bank.is_expired(Timeout::Repeat));
    }

    #[test]
    fn timers_count_independently() {
        let mut bank = TimeoutBank::new();
        bank.arm(Timeout::TvQuery, Ticks::new(100));
        bank.arm(Timeout::SerialTxPause, Ticks::new(5));
        bank.tick(Ticks::new(6));

        assert!(bank.is_expired(Timeout::SerialTxPause));
        assert_eq!(bank.remaining(Timeout::TvQuery), 94);
    }
}
