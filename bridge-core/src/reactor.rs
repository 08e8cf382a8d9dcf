//! Classifies inbound CEC frames and queues the replies they require.
//!
//! The reactor never transmits directly. Replies are queued in arrival order
//! and drained by the coordinator's CEC transmit step ahead of any other
//! traffic, so a mandatory answer is never stuck behind discovery.

use core::fmt;

use heapless::Deque;

use crate::cec::operand::{
    ABORT_UNRECOGNIZED_OPCODE, CEC_VERSION_1_3A, DEVICE_TYPE_TV, PowerStatus,
};
use crate::cec::{LogicalAddress, Opcode, OutboundFrame, PhysicalAddress, ReceivedFrame};
use crate::config::BridgeConfig;
use crate::discovery;
use crate::routing;
use crate::serial::TvPower;
use crate::state::{BridgeState, WorkFlags};
use crate::telemetry::TelemetryEventKind;

/// Number of replies that can wait for the transmit slot.
pub const REPLY_QUEUE_DEPTH: usize = 8;

/// A vendor command asked the bridge to restart into its bootloader.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RecoveryRequested {
    /// Device that sent the command.
    pub initiator: LogicalAddress,
}

impl fmt::Display for RecoveryRequested {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "firmware recovery requested by {}", self.initiator)
    }
}

/// Returned when the reply queue has no room left.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReplyQueueFull(pub PendingReply);

impl fmt::Display for ReplyQueueFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A reply owed to a peer, identified by the request that caused it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingReply {
    pub initiator: LogicalAddress,
    pub request: Opcode,
}

impl PendingReply {
    #[must_use]
    pub const fn new(initiator: LogicalAddress, request: Opcode) -> Self {
        Self { initiator, request }
    }

    /// Builds the reply frame. Power status is sampled at send time.
    #[must_use]
    pub fn to_frame(&self, tv: TvPower, config: &BridgeConfig) -> OutboundFrame {
        match self.request {
            Opcode::GET_MENU_LANGUAGE => {
                OutboundFrame::broadcast(Opcode::SET_MENU_LANGUAGE, config.menu_language)
            }
            Opcode::GIVE_PHYSICAL_ADDRESS => {
                let [high, low] = PhysicalAddress::ROOT.to_bytes();
                OutboundFrame::broadcast(
                    Opcode::REPORT_PHYSICAL_ADDRESS,
                    [high, low, DEVICE_TYPE_TV],
                )
            }
            Opcode::GET_CEC_VERSION => {
                OutboundFrame::new(self.initiator, Opcode::CEC_VERSION, [CEC_VERSION_1_3A])
            }
            Opcode::GIVE_DEVICE_POWER_STATUS => OutboundFrame::new(
                self.initiator,
                Opcode::REPORT_POWER_STATUS,
                [power_status(tv) as u8],
            ),
            other => OutboundFrame::new(
                self.initiator,
                Opcode::FEATURE_ABORT,
                [other.raw(), ABORT_UNRECOGNIZED_OPCODE],
            ),
        }
    }
}

/// Maps the TV state onto the CEC power status operand.
#[must_use]
pub fn power_status(tv: TvPower) -> PowerStatus {
    match tv {
        TvPower::On => PowerStatus::On,
        TvPower::Off => PowerStatus::Standby,
        TvPower::PowerUp | TvPower::PoweringUp => PowerStatus::TransitionToOn,
        TvPower::PowerOff | TvPower::PoweringOff => PowerStatus::TransitionToStandby,
    }
}

/// FIFO of replies awaiting the transmit slot.
#[derive(Clone, Debug, Default)]
pub struct ReplyQueue {
    entries: Deque<PendingReply, REPLY_QUEUE_DEPTH>,
}

impl ReplyQueue {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Deque::new(),
        }
    }

    /// Queues `reply` behind any earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyQueueFull`] with the rejected reply when no room is left.
    pub fn push(&mut self, reply: PendingReply) -> Result<(), ReplyQueueFull> {
        self.entries.push_back(reply).map_err(ReplyQueueFull)
    }

    pub fn pop(&mut self) -> Option<PendingReply> {
        self.entries.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reacts to one validated frame.
///
/// `is_own` reports whether an address belongs to this device.
///
/// # Errors
///
/// Returns [`RecoveryRequested`] when the frame is the vendor recovery command.
pub fn react(
    frame: &ReceivedFrame,
    is_own: impl Fn(LogicalAddress) -> bool,
    state: &mut BridgeState,
    replies: &mut ReplyQueue,
    config: &BridgeConfig,
) -> Result<(), RecoveryRequested> {
    let initiator = frame.initiator();
    state.presence.mark_present(initiator);

    let Some(opcode) = frame.opcode() else {
        return Ok(());
    };
    if is_own(initiator) {
        return Ok(());
    }

    let destination = frame.destination();
    if destination.is_broadcast() {
        react_broadcast(frame, opcode, state);
        Ok(())
    } else if is_own(destination) {
        react_direct(frame, opcode, state, replies, config)
    } else {
        Ok(())
    }
}

fn react_broadcast(frame: &ReceivedFrame, opcode: Opcode, state: &mut BridgeState) {
    let operands = frame.operands();
    match opcode {
        Opcode::ROUTING_CHANGE | Opcode::ROUTING_INFORMATION => routing::observe(state, frame),
        Opcode::REPORT_PHYSICAL_ADDRESS => {
            if let [high, low, _device_type, ..] = *operands {
                let physical = PhysicalAddress::from_bytes(high, low);
                discovery::confirm(state, frame.initiator(), physical);
            }
        }
        Opcode::ACTIVE_SOURCE => {
            if let [high, low, ..] = *operands {
                // The source announced itself on the bus already; only the
                // television needs switching.
                state.adopt_source(frame.initiator(), PhysicalAddress::from_bytes(high, low));
                state.work.insert(WorkFlags::PHYS_SOURCE_SERIAL);
                state.request_power_up();
            }
        }
        _ => {}
    }
}

fn react_direct(
    frame: &ReceivedFrame,
    opcode: Opcode,
    state: &mut BridgeState,
    replies: &mut ReplyQueue,
    config: &BridgeConfig,
) -> Result<(), RecoveryRequested> {
    let initiator = frame.initiator();

    match opcode {
        Opcode::IMAGE_VIEW_ON | Opcode::TEXT_VIEW_ON => {
            state.request_power_up();
            return Ok(());
        }
        Opcode::INACTIVE_SOURCE => {
            if state.logical_source == Some(initiator) {
                state.discovery.pick();
            }
            return Ok(());
        }
        Opcode::REPORT_POWER_STATUS | Opcode::FEATURE_ABORT => return Ok(()),
        Opcode::GET_MENU_LANGUAGE | Opcode::GIVE_PHYSICAL_ADDRESS => {}
        _ if initiator == LogicalAddress::UNREGISTERED => return Ok(()),
        Opcode::GET_CEC_VERSION | Opcode::GIVE_DEVICE_POWER_STATUS => {}
        Opcode::VENDOR_COMMAND if config.recovery.matches(frame.as_bytes()) => {
            state
                .telemetry
                .record(TelemetryEventKind::RecoveryRequested);
            return Err(RecoveryRequested { initiator });
        }
        unsupported => {
            state.telemetry.record(TelemetryEventKind::FeatureAbort {
                initiator,
                opcode: unsupported,
            });
        }
    }

    if let Err(ReplyQueueFull(dropped)) = replies.push(PendingReply::new(initiator, opcode)) {
        state
            .telemetry
            .record(TelemetryEventKind::ReplyDropped(dropped.request));
    }
    Ok(())
}
