//! Telemetry event catalog recorded by the coordinator.
//!
//! Records land in a fixed-size ring so the firmware can mirror them to defmt
//! and the emulator can print them, without either side reaching into the
//! coordinator's private state.

use core::fmt;

use heapless::{HistoryBuf, OldestOrdered};

use crate::cec::{FrameError, LogicalAddress, Opcode, PhysicalAddress};
use crate::serial::TvPower;

/// Monotonic identifier assigned to each record.
pub type EventId = u32;

/// Cumulative tick count at which a record was captured.
pub type TickStamp = u32;

/// Total number of telemetry entries retained in memory.
pub const TELEMETRY_RING_CAPACITY: usize = 32;

/// Discriminated telemetry events.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TelemetryEventKind {
    /// The TV power state machine moved to a new state.
    TvPower(TvPower),
    /// A logical/physical source pair was adopted.
    SourceSelected {
        logical: LogicalAddress,
        physical: PhysicalAddress,
    },
    /// The active source stopped acknowledging.
    SourceLost(LogicalAddress),
    /// A probed device never reported its physical address.
    ProbeTimeout(LogicalAddress),
    /// A settled routing change moved the physical source.
    RoutingApplied(PhysicalAddress),
    /// An inbound frame was unusable.
    FrameDiscarded(FrameError),
    /// A reply was dropped because the reply queue was full.
    ReplyDropped(Opcode),
    /// An unsupported opcode was answered with a feature abort.
    FeatureAbort {
        initiator: LogicalAddress,
        opcode: Opcode,
    },
    /// A serial reply stalled mid-frame and was discarded.
    SerialTimeout,
    /// The vendor recovery command arrived.
    RecoveryRequested,
}

impl fmt::Display for TelemetryEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryEventKind::TvPower(state) => write!(f, "tv-power {state}"),
            TelemetryEventKind::SourceSelected { logical, physical } => {
                write!(f, "source-selected {logical} @ {physical}")
            }
            TelemetryEventKind::SourceLost(address) => write!(f, "source-lost {address}"),
            TelemetryEventKind::ProbeTimeout(address) => write!(f, "probe-timeout {address}"),
            TelemetryEventKind::RoutingApplied(physical) => {
                write!(f, "routing-applied {physical}")
            }
            TelemetryEventKind::FrameDiscarded(error) => write!(f, "frame-discarded: {error}"),
            TelemetryEventKind::ReplyDropped(opcode) => write!(f, "reply-dropped {opcode}"),
            TelemetryEventKind::FeatureAbort { initiator, opcode } => {
                write!(f, "feature-abort {opcode} from {initiator}")
            }
            TelemetryEventKind::SerialTimeout => f.write_str("serial-timeout"),
            TelemetryEventKind::RecoveryRequested => f.write_str("recovery-requested"),
        }
    }
}

/// Telemetry record stored in the ring buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TelemetryRecord {
    pub id: EventId,
    pub tick: TickStamp,
    pub event: TelemetryEventKind,
}

/// Records telemetry events into a fixed-size ring buffer.
pub struct TelemetryRecorder<const CAPACITY: usize = TELEMETRY_RING_CAPACITY> {
    ring: HistoryBuf<TelemetryRecord, CAPACITY>,
    now: TickStamp,
    next_event_id: EventId,
}

impl<const CAPACITY: usize> TelemetryRecorder<CAPACITY> {
    /// Creates a new telemetry recorder with an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ring: HistoryBuf::new(),
            now: 0,
            next_event_id: 0,
        }
    }

    /// Advances the recorder clock.
    pub fn advance(&mut self, elapsed: u16) {
        self.now = self.now.wrapping_add(u32::from(elapsed));
    }

    /// Returns an iterator over the recorded telemetry in chronological order.
    pub fn oldest_first(&self) -> OldestOrdered<'_, TelemetryRecord> {
        self.ring.oldest_ordered()
    }

    /// Returns the records with an id at or after `first`.
    pub fn since(&self, first: EventId) -> impl Iterator<Item = &TelemetryRecord> + '_ {
        self.oldest_first()
            .filter(move |record| record.id.wrapping_sub(first) < (1 << 31))
    }

    /// Returns the most recent telemetry record, if available.
    pub fn latest(&self) -> Option<&TelemetryRecord> {
        self.ring.recent()
    }

    /// Returns the id the next record will receive.
    #[must_use]
    pub const fn next_id(&self) -> EventId {
        self.next_event_id
    }

    /// Returns the number of records currently stored.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Returns `true` when no telemetry records are stored.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Records `event` at the current tick.
    pub fn record(&mut self, event: TelemetryEventKind) -> EventId {
        let id = self.next_event_id;
        self.next_event_id = self.next_event_id.wrapping_add(1);

        self.ring.write(TelemetryRecord {
            id,
            tick: self.now,
            event,
        });

        id
    }
}

impl<const CAPACITY: usize> Default for TelemetryRecorder<CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_carry_the_current_tick() {
        let mut recorder: TelemetryRecorder<4> = TelemetryRecorder::new();
        recorder.advance(10);
        let id = recorder.record(TelemetryEventKind::SerialTimeout);

        let latest = recorder.latest().copied().expect("record stored");
        assert_eq!(id, 0);
        assert_eq!(latest.tick, 10);
        assert_eq!(latest.event, TelemetryEventKind::SerialTimeout);
    }

    #[test]
    fn since_skips_already_seen_records() {
        let mut recorder: TelemetryRecorder<4> = TelemetryRecorder::new();
        recorder.record(TelemetryEventKind::SerialTimeout);
        let cursor = recorder.next_id();
        recorder.record(TelemetryEventKind::RecoveryRequested);

        let fresh: heapless::Vec<_, 4> = recorder.since(cursor).map(|record| record.event).collect();
        assert_eq!(fresh.as_slice(), &[TelemetryEventKind::RecoveryRequested]);
    }

    #[test]
    fn ring_keeps_only_the_newest_records() {
        let mut recorder: TelemetryRecorder<2> = TelemetryRecorder::new();
        for _ in 0..3 {
            recorder.record(TelemetryEventKind::SerialTimeout);
        }
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.oldest_first().next().map(|record| record.id), Some(1));
    }
}
