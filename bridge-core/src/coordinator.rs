//! Tick-driven coordinator tying the bridge subsystems together.
//!
//! [`Bridge::periodic`] is the only entry point. Each call first settles
//! bookkeeping (timers, the outcome of the last CEC transmission, routing and
//! discovery timeouts) and then lets exactly one subsystem perform one unit
//! of work, which bounds the time spent in any single tick.

use crate::cec::operand::DeckCommand;
use crate::cec::{LogicalAddress, Opcode, OutboundFrame, PresenceMap};
use crate::config::{BridgeConfig, Ticks};
use crate::discovery::{self, DiscoveryState};
use crate::reactor::{self, ReplyQueue};
use crate::remote;
use crate::routing;
use crate::serial::{self, SerialClient, TvPower};
use crate::state::{BridgeState, StatusSnapshot, WorkFlags};
use crate::telemetry::{TelemetryEventKind, TelemetryRecorder};
use crate::timeouts::Timeout;
use crate::transport::{CecTransport, RemoteReceiver, SerialPort, TransmitState};

pub use crate::reactor::RecoveryRequested;

/// Outcome of a single work step: `Ok(true)` when it did something.
type StepResult = Result<bool, RecoveryRequested>;

/// The bridge coordinator and the transports it drives.
pub struct Bridge<C, S, R> {
    config: BridgeConfig,
    state: BridgeState,
    serial: SerialClient,
    replies: ReplyQueue,
    in_flight: Option<LogicalAddress>,
    cec: C,
    port: S,
    remote: R,
}

impl<C, S, R> Bridge<C, S, R>
where
    C: CecTransport,
    S: SerialPort,
    R: RemoteReceiver,
{
    /// Creates a coordinator with the TV assumed off and no source selected.
    pub fn new(config: BridgeConfig, cec: C, port: S, remote: R) -> Self {
        Self {
            state: BridgeState::new(config.timings()),
            config,
            serial: SerialClient::new(),
            replies: ReplyQueue::new(),
            in_flight: None,
            cec,
            port,
            remote,
        }
    }

    /// Runs one coordinator tick after `elapsed` ticks have passed.
    ///
    /// # Errors
    ///
    /// Returns [`RecoveryRequested`] when a vendor command asks the device to
    /// restart into its bootloader. The caller is expected not to return.
    pub fn periodic(&mut self, elapsed: Ticks) -> Result<(), RecoveryRequested> {
        self.state.timeouts.tick(elapsed);
        self.state
            .telemetry
            .advance(u16::try_from(elapsed.get()).unwrap_or(0));

        if self.resolve_transmit() {
            return Ok(());
        }

        if routing::settle(&mut self.state) {
            return Ok(());
        }

        discovery::housekeeping(&mut self.state);

        let steps: [fn(&mut Self) -> StepResult; 6] = [
            Self::serial_response,
            Self::serial_byte,
            Self::remote_event,
            Self::cec_receive,
            Self::serial_transmit,
            Self::cec_transmit,
        ];
        for step in steps {
            if step(self)? {
                break;
            }
        }

        Ok(())
    }

    /// Releases any held remote key, as signalled by the IR decoder timeout.
    pub fn release_remote(&mut self) {
        remote::release(&mut self.state);
    }

    #[must_use]
    pub fn status(&self) -> StatusSnapshot {
        self.state.snapshot()
    }

    /// Overwrites the tracked TV and source state.
    pub fn restore(&mut self, snapshot: &StatusSnapshot) {
        self.state.restore(snapshot);
    }

    #[must_use]
    pub fn tv_power(&self) -> TvPower {
        self.state.tv
    }

    #[must_use]
    pub fn logical_source(&self) -> Option<LogicalAddress> {
        self.state.logical_source
    }

    #[must_use]
    pub fn presence(&self) -> PresenceMap {
        self.state.presence
    }

    #[must_use]
    pub fn discovery_state(&self) -> DiscoveryState {
        self.state.discovery.state()
    }

    /// Number of replies waiting for the transmit slot.
    #[must_use]
    pub fn pending_replies(&self) -> usize {
        self.replies.len()
    }

    #[must_use]
    pub fn telemetry(&self) -> &TelemetryRecorder {
        &self.state.telemetry
    }

    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    #[must_use]
    pub fn cec(&self) -> &C {
        &self.cec
    }

    pub fn cec_mut(&mut self) -> &mut C {
        &mut self.cec
    }

    #[must_use]
    pub fn serial_port(&self) -> &S {
        &self.port
    }

    pub fn serial_port_mut(&mut self) -> &mut S {
        &mut self.port
    }

    pub fn remote_mut(&mut self) -> &mut R {
        &mut self.remote
    }

    /// Consumes the outcome of the last staged frame.
    fn resolve_transmit(&mut self) -> bool {
        let Some(target) = self.in_flight else {
            return false;
        };

        match self.cec.transmit_state() {
            TransmitState::Pending => return false,
            _ if target.is_broadcast() => {}
            TransmitState::Failed => {
                self.state.presence.mark_absent(target);
                if self.state.logical_source == Some(target) {
                    self.state.discovery.pick();
                    self.state
                        .telemetry
                        .record(TelemetryEventKind::SourceLost(target));
                }
            }
            TransmitState::Done | TransmitState::Idle => self.state.presence.mark_present(target),
        }

        self.in_flight = None;
        true
    }

    fn serial_response(&mut self) -> StepResult {
        let Some(response) = self.serial.take_response() else {
            return Ok(false);
        };
        serial::handle_response(response, &mut self.state);
        Ok(true)
    }

    fn serial_byte(&mut self) -> StepResult {
        let Some(byte) = self.port.take_received() else {
            return Ok(false);
        };
        self.serial.receive_byte(byte, &mut self.state);
        Ok(true)
    }

    fn remote_event(&mut self) -> StepResult {
        let Some(event) = self.remote.poll_event() else {
            return Ok(false);
        };
        remote::handle_event(&mut self.state, event);
        Ok(true)
    }

    fn cec_receive(&mut self) -> StepResult {
        let Some(raw) = self.cec.poll_receive() else {
            return Ok(false);
        };

        match raw.parse() {
            Ok(frame) => {
                let cec = &self.cec;
                reactor::react(
                    &frame,
                    |address| cec.address_match(address),
                    &mut self.state,
                    &mut self.replies,
                    &self.config,
                )?;
            }
            Err(error) => {
                self.state
                    .telemetry
                    .record(TelemetryEventKind::FrameDiscarded(error));
            }
        }

        Ok(true)
    }

    fn serial_transmit(&mut self) -> StepResult {
        Ok(self
            .serial
            .transmit(&mut self.port, &mut self.state, &self.config))
    }

    fn cec_transmit(&mut self) -> StepResult {
        if self.cec.transmit_state().is_pending() {
            return Ok(false);
        }

        if let Some(frame) = self.next_cec_frame() {
            self.in_flight = Some(frame.destination());
            self.cec.start_transmit(&frame);
        }
        Ok(true)
    }

    fn next_cec_frame(&mut self) -> Option<OutboundFrame> {
        if let Some(reply) = self.replies.pop() {
            return Some(reply.to_frame(self.state.tv, &self.config));
        }

        let state = &mut self.state;
        let source = state.logical_source;

        if state.work.take(WorkFlags::CEC_RELEASE)
            && let Some(source) = source
        {
            return Some(OutboundFrame::new(
                source,
                Opcode::USER_CONTROL_RELEASED,
                [],
            ));
        }

        if let Some(command) = state.input.ui
            && state.timeouts.is_due(Timeout::Repeat)
        {
            let Some(source) = source else {
                state.input.ui = None;
                return discovery::next_frame(state);
            };
            state
                .timeouts
                .arm(Timeout::Repeat, state.timings.ui_repeat_interval);
            return Some(OutboundFrame::new(
                source,
                Opcode::USER_CONTROL_PRESSED,
                [command.raw()],
            ));
        }

        if let Some(command) = state.input.deck.take()
            && let Some(source) = source
        {
            return Some(deck_frame(source, command));
        }

        if state.work.take(WorkFlags::ACTIVE_SOURCE) {
            return Some(OutboundFrame::broadcast(Opcode::ACTIVE_SOURCE, [0x00, 0x00]));
        }

        if state.work.take(WorkFlags::PHYS_SOURCE_CEC) {
            return Some(OutboundFrame::broadcast(
                Opcode::SET_STREAM_PATH,
                state.physical_source.to_bytes(),
            ));
        }

        discovery::next_frame(state)
    }
}

fn deck_frame(source: LogicalAddress, command: DeckCommand) -> OutboundFrame {
    OutboundFrame::new(source, command.opcode(), [command.operand()])
}
