use std::collections::VecDeque;
use std::fmt::Write as _;

use bridge_core::Bridge;
use bridge_core::cec::{LogicalAddress, OutboundFrame, RawFrame};
use bridge_core::config::{BridgeConfig, Ticks};
use bridge_core::telemetry::EventId;
use bridge_core::transport::{
    CecTransport, RawIrCode, RemoteEvent, RemoteReceiver, SerialPort, TransmitState,
};

use crate::grammar::{self, Command};

pub const HELP_TOPICS: &[&str] = &[
    "tick [count]          - advance the bridge by count 1ms ticks",
    "ir <code>             - press an LG remote key (hex)",
    "release               - release the held remote key",
    "cec <byte>...         - receive a CEC frame, header first (hex)",
    "serial <text>         - receive bytes from the TV serial port",
    "ack <addr> / nack <addr> - make a device (n)acknowledge CEC frames",
    "status                - show the bridge state",
];

/// Host stand-in for the CEC line driver. Frames complete immediately.
#[derive(Debug, Default)]
struct HostCec {
    inbound: VecDeque<RawFrame>,
    sent: Vec<Vec<u8>>,
    state: TransmitState,
    acknowledging: u16,
}

impl CecTransport for HostCec {
    fn poll_receive(&mut self) -> Option<RawFrame> {
        self.inbound.pop_front()
    }

    fn transmit_state(&self) -> TransmitState {
        self.state
    }

    fn start_transmit(&mut self, frame: &OutboundFrame) {
        let destination = frame.destination();
        self.sent
            .push(frame.encode(LogicalAddress::TV).as_slice().to_vec());
        self.state = if destination.is_broadcast()
            || self.acknowledging & (1 << destination.get()) != 0
        {
            TransmitState::Done
        } else {
            TransmitState::Failed
        };
    }

    fn address_match(&self, address: LogicalAddress) -> bool {
        address == LogicalAddress::TV
    }
}

#[derive(Debug, Default)]
struct HostSerial {
    written: Vec<u8>,
    inbound: VecDeque<u8>,
}

impl SerialPort for HostSerial {
    fn put(&mut self, byte: u8) {
        self.written.push(byte);
    }

    fn write_empty(&self) -> bool {
        true
    }

    fn take_received(&mut self) -> Option<u8> {
        self.inbound.pop_front()
    }
}

#[derive(Debug, Default)]
struct HostRemote {
    events: VecDeque<RemoteEvent>,
}

impl RemoteReceiver for HostRemote {
    fn poll_event(&mut self) -> Option<RemoteEvent> {
        self.events.pop_front()
    }
}

pub struct Session {
    bridge: Bridge<HostCec, HostSerial, HostRemote>,
    next_event: EventId,
    halted: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            bridge: Bridge::new(
                BridgeConfig::default(),
                HostCec::default(),
                HostSerial::default(),
                HostRemote::default(),
            ),
            next_event: 0,
            halted: false,
        }
    }

    pub fn handle_command(&mut self, line: &str) -> Vec<String> {
        let command = match grammar::parse(line) {
            Ok(command) => command,
            Err(error) => return vec![format!("error: {error}")],
        };

        let mut output = Vec::new();
        match command {
            Command::Tick(count) => self.run(count, &mut output),
            Command::Press(code) => self
                .bridge
                .remote_mut()
                .events
                .push_back(RemoteEvent::Press(RawIrCode::nec(code))),
            Command::Release => self.bridge.remote_mut().events.push_back(RemoteEvent::Release),
            Command::Cec(bytes) => {
                if bytes.len() > bridge_core::cec::MAX_FRAME_LEN {
                    output.push(format!(
                        "error: frames carry at most {} bytes",
                        bridge_core::cec::MAX_FRAME_LEN
                    ));
                } else {
                    self.bridge
                        .cec_mut()
                        .inbound
                        .push_back(RawFrame::from_bytes(&bytes));
                }
            }
            Command::Serial(text) => self.bridge.serial_port_mut().inbound.extend(text.bytes()),
            Command::Ack(address) | Command::Nack(address) if address > 14 => {
                output.push(format!("error: logical address {address} out of range"));
            }
            Command::Ack(address) => self.bridge.cec_mut().acknowledging |= 1 << address,
            Command::Nack(address) => self.bridge.cec_mut().acknowledging &= !(1 << address),
            Command::Status => output.extend(self.status_lines()),
            Command::Help => output.extend(HELP_TOPICS.iter().map(|line| (*line).to_owned())),
        }

        output
    }

    fn run(&mut self, count: u32, output: &mut Vec<String>) {
        if self.halted {
            output.push("bridge halted after recovery request".to_owned());
            return;
        }

        for _ in 0..count {
            let outcome = self.bridge.periodic(Ticks::new(1));
            self.collect_traffic(output);
            if let Err(request) = outcome {
                output.push(format!("halt: {request}"));
                self.halted = true;
                break;
            }
        }
    }

    fn collect_traffic(&mut self, output: &mut Vec<String>) {
        for frame in self.bridge.cec_mut().sent.drain(..) {
            let mut line = String::from("cec >");
            for byte in frame {
                let _ = write!(line, " {byte:02x}");
            }
            output.push(line);
        }

        let written = std::mem::take(&mut self.bridge.serial_port_mut().written);
        for command in String::from_utf8_lossy(&written).split_terminator('\r') {
            output.push(format!("tv  > {command}"));
        }

        let telemetry = self.bridge.telemetry();
        output.extend(
            telemetry
                .since(self.next_event)
                .map(|record| format!("event #{} t={}ms {}", record.id, record.tick, record.event)),
        );
        self.next_event = telemetry.next_id();
    }

    fn status_lines(&self) -> Vec<String> {
        let status = self.bridge.status();
        let logical = status
            .logical_source
            .map_or_else(|| "none".to_owned(), |address| address.to_string());
        vec![
            format!("tv: {}", status.tv),
            format!("source: {logical} @ {}", status.physical_source),
            format!("presence: {:#06x}", status.presence.bits()),
            format!("discovery: {}", status.discovery),
            format!("pending replies: {}", self.bridge.pending_replies()),
        ]
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
