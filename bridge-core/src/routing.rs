//! Debounces routing broadcasts from CEC switches.
//!
//! Switches emit several `<Routing Change>` / `<Routing Information>`
//! messages while they settle. Only the last address seen before the window
//! goes quiet is acted on.

use crate::cec::{Opcode, PhysicalAddress, ReceivedFrame};
use crate::state::{BridgeState, WorkFlags};
use crate::telemetry::TelemetryEventKind;
use crate::timeouts::Timeout;

/// Candidate physical address awaiting the end of the debounce window.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RoutingDebouncer {
    candidate: Option<PhysicalAddress>,
}

impl RoutingDebouncer {
    #[must_use]
    pub const fn new() -> Self {
        Self { candidate: None }
    }

    #[must_use]
    pub const fn candidate(&self) -> Option<PhysicalAddress> {
        self.candidate
    }

    /// Forgets any pending change.
    pub fn cancel(&mut self) {
        self.candidate = None;
    }
}

/// Extracts the new path from a routing broadcast.
#[must_use]
pub fn routed_address(frame: &ReceivedFrame) -> Option<PhysicalAddress> {
    let operands = frame.operands();
    let new_path = match frame.opcode()? {
        // Original address followed by the new one.
        Opcode::ROUTING_CHANGE => operands.get(2..4)?,
        Opcode::ROUTING_INFORMATION => operands.get(0..2)?,
        _ => return None,
    };
    Some(PhysicalAddress::from_bytes(new_path[0], new_path[1]))
}

/// Records a routing broadcast and restarts the debounce window.
pub fn observe(state: &mut BridgeState, frame: &ReceivedFrame) {
    let Some(address) = routed_address(frame) else {
        return;
    };

    state.routing.candidate = Some(address);
    state
        .timeouts
        .arm(Timeout::Routing, state.timings.routing_debounce);
}

/// Applies a settled routing change.
///
/// Returns `true` when a change was pending and the window has lapsed.
pub fn settle(state: &mut BridgeState) -> bool {
    if !state.timeouts.is_expired(Timeout::Routing) {
        return false;
    }
    let Some(candidate) = state.routing.candidate.take() else {
        return false;
    };

    if candidate != state.physical_source {
        state.physical_source = candidate;
        state.logical_source = None;
        state.work.insert(WorkFlags::PHYS_SOURCE);
        state
            .telemetry
            .record(TelemetryEventKind::RoutingApplied(candidate));
    }
    state.discovery.settle();
    true
}
