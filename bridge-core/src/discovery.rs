//! Active-source discovery.
//!
//! Discovery never waits on the bus. Each step fires at most one probe, arms
//! the discovery timer and returns; the coordinator resumes it on a later
//! tick. A background ping keeps the presence map fresh while idle.

use core::fmt;

use crate::cec::{LogicalAddress, Opcode, OutboundFrame, PhysicalAddress};
use crate::state::{BridgeState, WorkFlags};
use crate::telemetry::TelemetryEventKind;
use crate::timeouts::Timeout;

/// Number of addresses a PICK may probe before giving up.
pub const PROBE_BUDGET: u8 = 14;

/// Discovery state machine states.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DiscoveryState {
    /// Waiting for the next background ping.
    #[default]
    Idle,
    /// A background ping is due.
    Ping,
    /// The active source must be replaced.
    Pick,
    /// Looking for the next present address to probe.
    Logical,
    /// Waiting for a probed address to report its physical address.
    Phys,
}

impl fmt::Display for DiscoveryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiscoveryState::Idle => "idle",
            DiscoveryState::Ping => "ping",
            DiscoveryState::Pick => "pick",
            DiscoveryState::Logical => "logical",
            DiscoveryState::Phys => "phys",
        })
    }
}

/// Discovery progress.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Discovery {
    state: DiscoveryState,
    next_source: LogicalAddress,
    budget: u8,
}

impl Discovery {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DiscoveryState::Idle,
            next_source: LogicalAddress::TV,
            budget: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> DiscoveryState {
        self.state
    }

    /// Address most recently probed or pinged.
    #[must_use]
    pub const fn next_source(&self) -> LogicalAddress {
        self.next_source
    }

    /// Requests a replacement for the active source.
    pub fn pick(&mut self) {
        self.state = DiscoveryState::Pick;
    }

    /// Abandons any search in progress.
    pub fn settle(&mut self) {
        self.state = DiscoveryState::Idle;
    }

    pub(crate) fn force(&mut self, state: DiscoveryState) {
        self.state = state;
    }
}

impl Default for Discovery {
    fn default() -> Self {
        Self::new()
    }
}

/// Advances discovery on timer expiry and starts a requested PICK.
pub fn housekeeping(state: &mut BridgeState) {
    if state.timeouts.is_expired(Timeout::Discovery) {
        let discovery = &mut state.discovery;
        match discovery.state {
            DiscoveryState::Phys => {
                let probed = discovery.next_source;
                discovery.state = DiscoveryState::Logical;
                state.presence.mark_absent(probed);
                state
                    .telemetry
                    .record(TelemetryEventKind::ProbeTimeout(probed));
            }
            DiscoveryState::Idle => {
                discovery.next_source = discovery.next_source.next_probe();
                discovery.state = DiscoveryState::Ping;
            }
            _ => {}
        }
    }

    if state.discovery.state == DiscoveryState::Pick {
        let discovery = &mut state.discovery;
        discovery.next_source = state.logical_source.take().unwrap_or(LogicalAddress::TV);
        discovery.budget = PROBE_BUDGET;
        discovery.state = DiscoveryState::Logical;
    }
}

/// Produces the next probe or ping, if discovery has one to send.
///
/// Returns `None` when the step only advanced the search.
pub fn next_frame(state: &mut BridgeState) -> Option<OutboundFrame> {
    match state.discovery.state {
        DiscoveryState::Logical => {
            let discovery = &mut state.discovery;
            if discovery.budget == 0 {
                discovery.state = DiscoveryState::Idle;
                state
                    .timeouts
                    .arm(Timeout::Discovery, state.timings.discovery_interval);
                return None;
            }

            discovery.budget -= 1;
            discovery.next_source = discovery.next_source.next_probe();
            let candidate = discovery.next_source;
            if !state.presence.is_present(candidate) {
                return None;
            }

            discovery.state = DiscoveryState::Phys;
            state
                .timeouts
                .arm(Timeout::Discovery, state.timings.probe_window);
            Some(OutboundFrame::new(candidate, Opcode::GIVE_PHYSICAL_ADDRESS, []))
        }
        DiscoveryState::Ping => {
            state.discovery.state = DiscoveryState::Idle;
            state
                .timeouts
                .arm(Timeout::Discovery, state.timings.discovery_interval);
            Some(OutboundFrame::poll(state.discovery.next_source))
        }
        _ => None,
    }
}

/// Completes a probe when `initiator` is the address awaiting confirmation.
///
/// The first matching report wins; later reports find discovery idle.
pub fn confirm(state: &mut BridgeState, initiator: LogicalAddress, physical: PhysicalAddress) {
    let discovery = &state.discovery;
    if discovery.state != DiscoveryState::Phys || discovery.next_source != initiator {
        return;
    }

    state.adopt_source(initiator, physical);
    state.work.insert(WorkFlags::PHYS_SOURCE);
    state
        .timeouts
        .arm(Timeout::Discovery, state.timings.discovery_interval);
}
