//! LG RS-232 control protocol and the TV power state machine.
//!
//! Outbound commands take the form `<cmd1><cmd2> <set id> <data>\r`, with
//! `data` rendered as two lowercase hex digits. Replies are assembled by
//! [`ResponseAssembler`] and fed back into the power state machine.

pub mod response;

use core::fmt;

use crate::config::BridgeConfig;
use crate::remote::keys;
use crate::state::{BridgeState, WorkFlags};
use crate::telemetry::TelemetryEventKind;
use crate::timeouts::Timeout;
use crate::transport::SerialPort;

pub use response::{Ack, ResponseAssembler, SerialResponse};

/// Television power lifecycle, ordered from fully off to fully on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TvPower {
    /// Confirmed off.
    Off,
    /// Power-off requested, command not yet sent.
    PowerOff,
    /// Power-off command sent, awaiting confirmation.
    PoweringOff,
    /// Power-on requested, command not yet sent.
    PowerUp,
    /// Power-on command sent, awaiting confirmation.
    PoweringUp,
    /// Confirmed on.
    On,
}

impl fmt::Display for TvPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TvPower::Off => "off",
            TvPower::PowerOff => "power-off",
            TvPower::PoweringOff => "powering-off",
            TvPower::PowerUp => "power-up",
            TvPower::PoweringUp => "powering-up",
            TvPower::On => "on",
        })
    }
}

const CARRIAGE_RETURN: u8 = b'\r';
const POWER_ON: u8 = 0x01;
const POWER_OFF: u8 = 0x00;
const QUERY: u8 = 0xff;
const INPUT_HDMI_BASE: u8 = 0x90;

/// One outbound serial command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SerialCommand {
    pub command: [u8; 2],
    pub data: u8,
}

impl SerialCommand {
    pub const POWER: [u8; 2] = *b"ka";
    pub const REMOTE_KEY: [u8; 2] = *b"mc";
    pub const INPUT_SELECT: [u8; 2] = *b"xb";

    #[must_use]
    pub const fn new(command: [u8; 2], data: u8) -> Self {
        Self { command, data }
    }

    /// Emulates a remote-control key press.
    #[must_use]
    pub const fn key(code: u8) -> Self {
        Self::new(Self::REMOTE_KEY, code)
    }

    /// Switches to the HDMI input `port` (1-based). Port 0 has no input.
    #[must_use]
    pub const fn input_select(port: u8) -> Option<Self> {
        if port == 0 {
            None
        } else {
            Some(Self::new(
                Self::INPUT_SELECT,
                INPUT_HDMI_BASE.wrapping_add(port).wrapping_sub(1),
            ))
        }
    }

    /// Writes the command addressed to `set_id`.
    pub fn write_to<S: SerialPort + ?Sized>(&self, port: &mut S, set_id: u8) {
        port.put(self.command[0]);
        port.put(self.command[1]);
        port.put(b' ');
        port.put_numeral(set_id / 10);
        port.put_numeral(set_id % 10);
        port.put(b' ');
        port.put_numeral(self.data >> 4);
        port.put_numeral(self.data & 0x0f);
        port.put(CARRIAGE_RETURN);
    }
}

/// Drives the serial link: reply assembly, reply handling and command output.
#[derive(Clone, Debug, Default)]
pub struct SerialClient {
    assembler: ResponseAssembler,
    pending: Option<SerialResponse>,
}

impl SerialClient {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            assembler: ResponseAssembler::new(),
            pending: None,
        }
    }

    /// Takes the reply completed by the last received byte.
    pub fn take_response(&mut self) -> Option<SerialResponse> {
        self.pending.take()
    }

    /// Assembles one received byte.
    pub fn receive_byte(&mut self, byte: u8, state: &mut BridgeState) {
        if state.timeouts.is_expired(Timeout::SerialRx) && self.assembler.position() > 0 {
            self.assembler.reset();
            state.telemetry.record(TelemetryEventKind::SerialTimeout);
        }
        state
            .timeouts
            .arm(Timeout::SerialRx, state.timings.serial_rx_timeout);

        if let Some(response) = self.assembler.push(byte) {
            self.pending = Some(response);
        }
    }

    /// Writes the highest priority pending command, if the link is free.
    ///
    /// Returns `true` when a command was written.
    pub fn transmit<S: SerialPort>(
        &mut self,
        port: &mut S,
        state: &mut BridgeState,
        config: &BridgeConfig,
    ) -> bool {
        if !port.write_empty() || !state.timeouts.is_due(Timeout::SerialTxPause) {
            return false;
        }

        let Some(command) = next_command(state, config) else {
            return false;
        };

        command.write_to(port, config.set_id);
        state
            .timeouts
            .arm(Timeout::SerialTxPause, state.timings.serial_tx_pause);
        true
    }
}

/// Applies a reply to the power state machine.
///
/// Power and remote-lock replies are treated alike: `OK` means on, `NG`
/// means off. A reply never undoes a transition the user just requested.
pub fn handle_response(response: SerialResponse, state: &mut BridgeState) {
    if !matches!(response.command, b'a' | b'm') {
        return;
    }

    match response.ack {
        Ack::Ok => {
            if !matches!(state.tv, TvPower::PoweringOff | TvPower::PowerOff) {
                if state.tv == TvPower::Off && state.logical_source.is_some() {
                    state.work.insert(WorkFlags::PHYS_SOURCE);
                }
                state.set_tv(TvPower::On);
            }
        }
        Ack::Ng => {
            if !matches!(state.tv, TvPower::PoweringUp | TvPower::PowerUp) {
                if state.tv == TvPower::On {
                    state.work.insert(WorkFlags::ACTIVE_SOURCE);
                }
                state.set_tv(TvPower::Off);
            }
        }
        Ack::Unknown(_) => {}
    }
}

fn next_command(state: &mut BridgeState, config: &BridgeConfig) -> Option<SerialCommand> {
    if state.work.take(WorkFlags::KEY_ONCE) {
        if state.input.key == keys::MUTE {
            state.work.insert(WorkFlags::KEY_FOLLOW_UP);
        }
        return Some(SerialCommand::key(state.input.key));
    }

    if state.work.take(WorkFlags::KEY_FOLLOW_UP) {
        return Some(SerialCommand::key(keys::RIGHT));
    }

    if state.work.contains(WorkFlags::KEY_REPEAT) && state.timeouts.is_expired(Timeout::Repeat) {
        state
            .timeouts
            .arm(Timeout::Repeat, state.timings.key_repeat_interval);
        return Some(SerialCommand::key(state.input.key));
    }

    if state.work.contains(WorkFlags::PHYS_SOURCE_SERIAL) && state.tv == TvPower::On {
        state.work.remove(WorkFlags::PHYS_SOURCE_SERIAL);
        if let Some(command) = SerialCommand::input_select(state.physical_source.input_port()) {
            return Some(command);
        }
    }

    if !state.timeouts.is_due(Timeout::TvQuery) {
        return None;
    }
    state
        .timeouts
        .arm(Timeout::TvQuery, state.timings.tv_query_interval);

    let command = match state.tv {
        TvPower::PowerUp => {
            state.set_tv(TvPower::PoweringUp);
            SerialCommand::new(SerialCommand::POWER, POWER_ON)
        }
        TvPower::PowerOff => {
            state.set_tv(TvPower::PoweringOff);
            SerialCommand::new(SerialCommand::POWER, POWER_OFF)
        }
        unconfirmed => {
            // No reply arrived within a query interval; send the request again
            // on the next round.
            match unconfirmed {
                TvPower::PoweringUp => state.set_tv(TvPower::PowerUp),
                TvPower::PoweringOff => state.set_tv(TvPower::PowerOff),
                _ => {}
            }
            SerialCommand::new(config.status_query.command(), QUERY)
        }
    };

    Some(command)
}
