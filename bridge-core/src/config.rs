//! Timing and protocol constants for the bridge.
//!
//! All timings are expressed as [`Duration`]s and converted once into the
//! signed tick counts the [`TimeoutBank`](crate::timeouts::TimeoutBank) works
//! with. The defaults match an LG set driven over RS-232 at 9600 baud.

use core::fmt;
use core::time::Duration;

/// Signed tick count used by the timeout bank.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticks(i16);

impl Ticks {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(value: i16) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> i16 {
        self.0
    }

    /// Converts `duration` into ticks of length `tick`, rounding up.
    ///
    /// Saturates at `i16::MAX`; [`BridgeConfig::validate`] reports timings that
    /// would saturate.
    #[must_use]
    pub fn from_duration(duration: Duration, tick: Duration) -> Self {
        let tick_us = tick.as_micros();
        if tick_us == 0 {
            return Self(i16::MAX);
        }

        let ticks = duration.as_micros().div_ceil(tick_us);
        Self(i16::try_from(ticks).unwrap_or(i16::MAX))
    }
}

/// Vendor command signature that makes the bridge restart into its bootloader.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RecoveryTrigger {
    /// Exact frame length (header included) the vendor command must have.
    pub frame_len: u8,
    /// Value of the final byte of the frame.
    pub magic: u8,
}

impl RecoveryTrigger {
    #[must_use]
    pub const fn new(frame_len: u8, magic: u8) -> Self {
        Self { frame_len, magic }
    }

    /// Returns `true` when `frame` (header first) carries the trigger.
    #[must_use]
    pub fn matches(&self, frame: &[u8]) -> bool {
        frame.len() == usize::from(self.frame_len) && frame.last() == Some(&self.magic)
    }
}

impl Default for RecoveryTrigger {
    fn default() -> Self {
        Self::new(16, 0xb1)
    }
}

/// Serial command used to poll the television's power state.
///
/// Some sets answer the power query with `OK` even in standby; those report
/// standby as `NG` to the remote-lock query instead.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StatusQuery {
    #[default]
    Power,
    RemoteLock,
}

impl StatusQuery {
    /// Two-letter serial command for the query.
    #[must_use]
    pub const fn command(self) -> [u8; 2] {
        match self {
            StatusQuery::Power => *b"ka",
            StatusQuery::RemoteLock => *b"km",
        }
    }
}

/// Errors reported by [`BridgeConfig::validate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The tick period is zero.
    ZeroTick,
    /// The named timing does not fit in a signed 16-bit tick counter.
    TimingOverflow(&'static str),
    /// The set ID must render as two decimal digits.
    SetIdOutOfRange(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroTick => f.write_str("tick period must be non-zero"),
            ConfigError::TimingOverflow(name) => write!(f, "{name} overflows the tick counter"),
            ConfigError::SetIdOutOfRange(id) => write!(f, "set id {id} is outside 0..=99"),
        }
    }
}

/// Runtime configuration for the coordinator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Period between successive `periodic` ticks of one unit.
    pub tick: Duration,
    /// Delay before a held volume key starts repeating.
    pub key_repeat_delay: Duration,
    /// Cadence of repeated serial volume keys.
    pub key_repeat_interval: Duration,
    /// Cadence of repeated CEC user-control presses.
    pub ui_repeat_interval: Duration,
    /// Interval between TV power queries.
    pub tv_query_interval: Duration,
    /// Interval between background presence pings.
    pub discovery_interval: Duration,
    /// Window for a probed device to report its physical address.
    pub probe_window: Duration,
    /// Quiet period that settles a burst of routing broadcasts.
    pub routing_debounce: Duration,
    /// Maximum gap between bytes of one serial reply.
    pub serial_rx_timeout: Duration,
    /// Pause after each outbound serial message.
    pub serial_tx_pause: Duration,
    /// LG set ID addressed by outbound serial commands.
    pub set_id: u8,
    pub status_query: StatusQuery,
    /// ISO 639-2 code returned for menu language queries.
    pub menu_language: [u8; 3],
    pub recovery: RecoveryTrigger,
}

impl BridgeConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tick: Duration::from_millis(1),
            key_repeat_delay: Duration::from_millis(500),
            key_repeat_interval: Duration::from_millis(100),
            ui_repeat_interval: Duration::from_millis(400),
            tv_query_interval: Duration::from_millis(1000),
            discovery_interval: Duration::from_millis(1000),
            probe_window: Duration::from_millis(300),
            routing_debounce: Duration::from_millis(200),
            serial_rx_timeout: Duration::from_millis(100),
            serial_tx_pause: Duration::from_millis(5),
            set_id: 1,
            status_query: StatusQuery::Power,
            menu_language: *b"eng",
            recovery: RecoveryTrigger::new(16, 0xb1),
        }
    }

    /// Overrides the tick period.
    #[must_use]
    pub const fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Overrides the routing debounce window.
    #[must_use]
    pub const fn with_routing_debounce(mut self, window: Duration) -> Self {
        self.routing_debounce = window;
        self
    }

    /// Overrides the TV power query interval.
    #[must_use]
    pub const fn with_tv_query_interval(mut self, interval: Duration) -> Self {
        self.tv_query_interval = interval;
        self
    }

    /// Overrides the set ID used in outbound serial commands.
    #[must_use]
    pub const fn with_set_id(mut self, set_id: u8) -> Self {
        self.set_id = set_id;
        self
    }

    /// Overrides the serial power status query.
    #[must_use]
    pub const fn with_status_query(mut self, query: StatusQuery) -> Self {
        self.status_query = query;
        self
    }

    /// Overrides the vendor recovery trigger.
    #[must_use]
    pub const fn with_recovery(mut self, recovery: RecoveryTrigger) -> Self {
        self.recovery = recovery;
        self
    }

    /// Checks that every timing fits the tick counters.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }
        if self.set_id > 99 {
            return Err(ConfigError::SetIdOutOfRange(self.set_id));
        }

        let limit = self.tick.saturating_mul(u32::from(i16::MAX.unsigned_abs()));
        for (name, value) in self.named_timings() {
            if value > limit {
                return Err(ConfigError::TimingOverflow(name));
            }
        }

        Ok(())
    }

    /// Converts every timing into ticks.
    #[must_use]
    pub fn timings(&self) -> Timings {
        let ticks = |duration| Ticks::from_duration(duration, self.tick);
        Timings {
            key_repeat_delay: ticks(self.key_repeat_delay),
            key_repeat_interval: ticks(self.key_repeat_interval),
            ui_repeat_interval: ticks(self.ui_repeat_interval),
            tv_query_interval: ticks(self.tv_query_interval),
            discovery_interval: ticks(self.discovery_interval),
            probe_window: ticks(self.probe_window),
            routing_debounce: ticks(self.routing_debounce),
            serial_rx_timeout: ticks(self.serial_rx_timeout),
            serial_tx_pause: ticks(self.serial_tx_pause),
        }
    }

    fn named_timings(&self) -> [(&'static str, Duration); 9] {
        [
            ("key_repeat_delay", self.key_repeat_delay),
            ("key_repeat_interval", self.key_repeat_interval),
            ("ui_repeat_interval", self.ui_repeat_interval),
            ("tv_query_interval", self.tv_query_interval),
            ("discovery_interval", self.discovery_interval),
            ("probe_window", self.probe_window),
            ("routing_debounce", self.routing_debounce),
            ("serial_rx_timeout", self.serial_rx_timeout),
            ("serial_tx_pause", self.serial_tx_pause),
        ]
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Tick-denominated copy of the [`BridgeConfig`] timings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Timings {
    pub key_repeat_delay: Ticks,
    pub key_repeat_interval: Ticks,
    pub ui_repeat_interval: Ticks,
    pub tv_query_interval: Ticks,
    pub discovery_interval: Ticks,
    pub probe_window: Ticks,
    pub routing_debounce: Ticks,
    pub serial_rx_timeout: Ticks,
    pub serial_tx_pause: Ticks,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_round_up_to_whole_ticks() {
        let tick = Duration::from_millis(4);
        assert_eq!(Ticks::from_duration(Duration::from_millis(8), tick), Ticks::new(2));
        assert_eq!(Ticks::from_duration(Duration::from_millis(9), tick), Ticks::new(3));
        assert_eq!(Ticks::from_duration(Duration::ZERO, tick), Ticks::ZERO);
    }

    #[test]
    fn default_timings_use_millisecond_ticks() {
        let timings = BridgeConfig::default().timings();
        assert_eq!(timings.routing_debounce, Ticks::new(200));
        assert_eq!(timings.tv_query_interval, Ticks::new(1000));
        assert_eq!(timings.serial_tx_pause, Ticks::new(5));
    }

    #[test]
    fn validate_rejects_overflowing_timings() {
        let config = BridgeConfig::new().with_tv_query_interval(Duration::from_secs(60));
        assert_eq!(
            config.validate(),
            Err(ConfigError::TimingOverflow("tv_query_interval"))
        );
        assert_eq!(BridgeConfig::new().validate(), Ok(()));
        assert_eq!(
            BridgeConfig::new().with_tick(Duration::ZERO).validate(),
            Err(ConfigError::ZeroTick)
        );
    }

    #[test]
    fn recovery_trigger_checks_length_and_last_byte() {
        let trigger = RecoveryTrigger::default();
        let mut frame = [0u8; 16];
        frame[15] = 0xb1;
        assert!(trigger.matches(&frame));
        assert!(!trigger.matches(&frame[..15]));
        frame[15] = 0xb0;
        assert!(!trigger.matches(&frame));
    }
}
