#![allow(dead_code)]

use std::collections::VecDeque;

use bridge_core::Bridge;
use bridge_core::cec::{LogicalAddress, OutboundFrame, RawFrame};
use bridge_core::config::{BridgeConfig, Ticks};
use bridge_core::transport::{
    CecTransport, RawIrCode, RemoteEvent, RemoteReceiver, SerialPort, TransmitState,
};

pub type TestBridge = Bridge<MockCec, MockSerial, MockRemote>;

/// CEC line driver whose peers acknowledge according to `acknowledging`.
#[derive(Debug, Default)]
pub struct MockCec {
    pub inbound: VecDeque<RawFrame>,
    pub sent: Vec<Vec<u8>>,
    pub state: TransmitState,
    /// Logical addresses that acknowledge directly addressed frames.
    pub acknowledging: u16,
    /// Leaves staged frames pending until [`MockCec::finish`] is called.
    pub hold: bool,
    /// Number of `start_transmit` calls made while a frame was pending.
    pub overlapping_starts: usize,
}

impl MockCec {
    pub fn acknowledge(&mut self, address: u8) {
        self.acknowledging |= 1 << address;
    }

    pub fn ignore(&mut self, address: u8) {
        self.acknowledging &= !(1 << address);
    }

    pub fn receive(&mut self, bytes: &[u8]) {
        self.inbound.push_back(RawFrame::from_bytes(bytes));
    }

    pub fn receive_raw(&mut self, frame: RawFrame) {
        self.inbound.push_back(frame);
    }

    /// Completes a held transmission.
    pub fn finish(&mut self, acknowledged: bool) {
        self.state = if acknowledged {
            TransmitState::Done
        } else {
            TransmitState::Failed
        };
    }

    /// Drains the frames sent so far.
    pub fn take_sent(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.sent)
    }

    fn outcome(&self, destination: LogicalAddress) -> TransmitState {
        if destination.is_broadcast() || self.acknowledging & (1 << destination.get()) != 0 {
            TransmitState::Done
        } else {
            TransmitState::Failed
        }
    }
}

impl CecTransport for MockCec {
    fn poll_receive(&mut self) -> Option<RawFrame> {
        self.inbound.pop_front()
    }

    fn transmit_state(&self) -> TransmitState {
        self.state
    }

    fn start_transmit(&mut self, frame: &OutboundFrame) {
        if self.state.is_pending() {
            self.overlapping_starts += 1;
        }
        self.sent
            .push(frame.encode(LogicalAddress::TV).as_slice().to_vec());
        self.state = if self.hold {
            TransmitState::Pending
        } else {
            self.outcome(frame.destination())
        };
    }

    fn address_match(&self, address: LogicalAddress) -> bool {
        address == LogicalAddress::TV
    }
}

/// Serial link that records writes and replays scripted replies.
#[derive(Debug, Default)]
pub struct MockSerial {
    pub written: Vec<u8>,
    pub inbound: VecDeque<u8>,
    pub busy: bool,
}

impl MockSerial {
    pub fn feed(&mut self, reply: &str) {
        self.inbound.extend(reply.bytes());
    }

    /// Drains the commands written so far, without their carriage returns.
    pub fn take_commands(&mut self) -> Vec<String> {
        let written = std::mem::take(&mut self.written);
        String::from_utf8(written)
            .expect("commands are ascii")
            .split_terminator('\r')
            .map(String::from)
            .collect()
    }
}

impl SerialPort for MockSerial {
    fn put(&mut self, byte: u8) {
        self.written.push(byte);
    }

    fn write_empty(&self) -> bool {
        !self.busy
    }

    fn take_received(&mut self) -> Option<u8> {
        self.inbound.pop_front()
    }
}

/// IR decoder fed from a script.
#[derive(Debug, Default)]
pub struct MockRemote {
    pub events: VecDeque<RemoteEvent>,
}

impl MockRemote {
    pub fn press(&mut self, code: u8) {
        self.events.push_back(RemoteEvent::Press(RawIrCode::nec(code)));
    }

    pub fn release(&mut self) {
        self.events.push_back(RemoteEvent::Release);
    }
}

impl RemoteReceiver for MockRemote {
    fn poll_event(&mut self) -> Option<RemoteEvent> {
        self.events.pop_front()
    }
}

pub fn bridge() -> TestBridge {
    bridge_with(BridgeConfig::default())
}

pub fn bridge_with(config: BridgeConfig) -> TestBridge {
    Bridge::new(
        config,
        MockCec::default(),
        MockSerial::default(),
        MockRemote::default(),
    )
}

/// Runs `ticks` one-millisecond ticks.
pub fn run(bridge: &mut TestBridge, ticks: usize) {
    for _ in 0..ticks {
        bridge
            .periodic(Ticks::new(1))
            .expect("no recovery request expected");
    }
}

/// Runs until `done` holds, failing after `limit` ticks.
pub fn run_until(bridge: &mut TestBridge, limit: usize, mut done: impl FnMut(&TestBridge) -> bool) {
    for _ in 0..limit {
        if done(bridge) {
            return;
        }
        run(bridge, 1);
    }
    assert!(done(bridge), "condition not reached within {limit} ticks");
}

/// Brings the bridge to a confirmed-on TV with no outstanding serial traffic.
pub fn powered_on() -> TestBridge {
    let mut bridge = bridge();
    run(&mut bridge, 1);
    bridge.serial_port_mut().feed("a 01 OK01x");
    run_until(&mut bridge, 50, |bridge| {
        bridge.tv_power() == bridge_core::serial::TvPower::On
    });
    bridge.serial_port_mut().take_commands();
    bridge.cec_mut().take_sent();
    bridge
}
