//! Shared coordinator state threaded through every subsystem.

use crate::cec::operand::DeckCommand;
use crate::cec::ui::UiCommand;
use crate::cec::{LogicalAddress, PhysicalAddress, PresenceMap};
use crate::config::Timings;
use crate::discovery::{Discovery, DiscoveryState};
use crate::routing::RoutingDebouncer;
use crate::serial::TvPower;
use crate::telemetry::{TelemetryEventKind, TelemetryRecorder};
use crate::timeouts::TimeoutBank;

/// Deferred outbound work, drained by the serial and CEC transmit steps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkFlags(u8);

impl WorkFlags {
    pub const NONE: Self = Self(0);
    /// Send the pending serial key once.
    pub const KEY_ONCE: Self = Self(1 << 0);
    /// Keep re-sending the pending serial key at the repeat cadence.
    pub const KEY_REPEAT: Self = Self(1 << 1);
    /// Send the right-arrow key that follows a mute.
    pub const KEY_FOLLOW_UP: Self = Self(1 << 2);
    /// Send `<User Control Released>` to the active source.
    pub const CEC_RELEASE: Self = Self(1 << 3);
    /// Broadcast `<Active Source>` for the TV itself.
    pub const ACTIVE_SOURCE: Self = Self(1 << 4);
    /// Select the source's HDMI input over serial.
    pub const PHYS_SOURCE_SERIAL: Self = Self(1 << 5);
    /// Broadcast `<Set Stream Path>` for the source.
    pub const PHYS_SOURCE_CEC: Self = Self(1 << 6);
    /// Announce the physical source on both links.
    pub const PHYS_SOURCE: Self = Self(Self::PHYS_SOURCE_SERIAL.0 | Self::PHYS_SOURCE_CEC.0);

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Clears `flag`, returning whether it was set.
    pub fn take(&mut self, flag: Self) -> bool {
        let set = self.contains(flag);
        self.remove(flag);
        set
    }
}

/// Remote input waiting to go out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingInput {
    /// LG key code sent by the serial key commands.
    pub key: u8,
    /// CEC user-control code being held down.
    pub ui: Option<UiCommand>,
    /// Transport command for the active source.
    pub deck: Option<DeckCommand>,
}

/// Point-in-time view of the coordinator state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub tv: TvPower,
    pub logical_source: Option<LogicalAddress>,
    pub physical_source: PhysicalAddress,
    pub presence: PresenceMap,
    pub discovery: DiscoveryState,
}

/// State shared by the bridge subsystems.
pub struct BridgeState {
    pub timeouts: TimeoutBank,
    pub timings: Timings,
    pub work: WorkFlags,
    pub tv: TvPower,
    pub logical_source: Option<LogicalAddress>,
    pub physical_source: PhysicalAddress,
    pub presence: PresenceMap,
    pub discovery: Discovery,
    pub routing: RoutingDebouncer,
    pub input: PendingInput,
    pub telemetry: TelemetryRecorder,
}

impl BridgeState {
    #[must_use]
    pub fn new(timings: Timings) -> Self {
        Self {
            timeouts: TimeoutBank::new(),
            timings,
            work: WorkFlags::NONE,
            tv: TvPower::Off,
            logical_source: None,
            physical_source: PhysicalAddress::ROOT,
            presence: PresenceMap::new(),
            discovery: Discovery::new(),
            routing: RoutingDebouncer::new(),
            input: PendingInput::default(),
            telemetry: TelemetryRecorder::new(),
        }
    }

    /// Moves the TV power state machine, recording changes.
    pub fn set_tv(&mut self, next: TvPower) {
        if self.tv != next {
            self.tv = next;
            self.telemetry.record(TelemetryEventKind::TvPower(next));
        }
    }

    /// Raises the TV to `PowerUp` unless it is already on its way up.
    pub fn request_power_up(&mut self) {
        if self.tv < TvPower::PowerUp {
            self.set_tv(TvPower::PowerUp);
        }
    }

    /// Adopts `logical` at `physical` as the active source.
    pub fn adopt_source(&mut self, logical: LogicalAddress, physical: PhysicalAddress) {
        self.logical_source = Some(logical);
        self.physical_source = physical;
        self.routing.cancel();
        self.discovery.settle();
        self.telemetry
            .record(TelemetryEventKind::SourceSelected { logical, physical });
    }

    #[must_use]
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            tv: self.tv,
            logical_source: self.logical_source,
            physical_source: self.physical_source,
            presence: self.presence,
            discovery: self.discovery.state(),
        }
    }

    /// Overwrites the tracked TV and source state.
    pub fn restore(&mut self, snapshot: &StatusSnapshot) {
        self.tv = snapshot.tv;
        self.logical_source = snapshot.logical_source;
        self.physical_source = snapshot.physical_source;
        self.presence = snapshot.presence;
        self.discovery.force(snapshot.discovery);
    }
}
