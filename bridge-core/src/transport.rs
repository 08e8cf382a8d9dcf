//! Interfaces to the hardware collaborators driven by the coordinator.
//!
//! Each trait is deliberately narrow: the implementations live next to the
//! interrupt handlers or async tasks that own the peripherals and only expose
//! the non-blocking primitives the coordinator polls once per tick.

use crate::cec::{LogicalAddress, OutboundFrame, RawFrame};

/// State of the single CEC transmit slot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TransmitState {
    /// Nothing has been staged since the last outcome was consumed.
    #[default]
    Idle,
    /// The line driver is still sending (or arbitrating for) the frame.
    Pending,
    /// The frame was acknowledged.
    Done,
    /// The frame was not acknowledged.
    Failed,
}

impl TransmitState {
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, TransmitState::Pending)
    }
}

/// CEC line driver.
pub trait CecTransport {
    /// Takes the next received buffer, if any.
    fn poll_receive(&mut self) -> Option<RawFrame>;

    /// Reports the outcome of the most recently staged frame.
    fn transmit_state(&self) -> TransmitState;

    /// Stages `frame`. Only called while [`transmit_state`](Self::transmit_state)
    /// is not [`TransmitState::Pending`].
    fn start_transmit(&mut self, frame: &OutboundFrame);

    /// Returns `true` when `address` is one this device answers to.
    fn address_match(&self, address: LogicalAddress) -> bool;
}

/// Byte-level serial link to the television.
pub trait SerialPort {
    /// Queues one byte for transmission.
    fn put(&mut self, byte: u8);

    /// Queues the lowercase hex digit for `value & 0x0f`.
    fn put_numeral(&mut self, value: u8) {
        let nibble = value & 0x0f;
        let digit = if nibble < 10 {
            b'0' + nibble
        } else {
            b'a' + nibble - 10
        };
        self.put(digit);
    }

    /// Returns `true` once every queued byte has been shifted out.
    fn write_empty(&self) -> bool;

    /// Takes the next received byte, if any.
    fn take_received(&mut self) -> Option<u8>;
}

/// Decoded output of the IR receiver.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawIrCode {
    /// Number of bytes the decoder assembled; 4 for a complete NEC frame.
    pub len: u8,
    /// Command byte of the frame.
    pub code: u8,
}

impl RawIrCode {
    /// Length of a complete NEC frame.
    pub const NEC_FRAME_LEN: u8 = 4;

    #[must_use]
    pub const fn new(len: u8, code: u8) -> Self {
        Self { len, code }
    }

    /// Complete NEC frame carrying `code`.
    #[must_use]
    pub const fn nec(code: u8) -> Self {
        Self::new(Self::NEC_FRAME_LEN, code)
    }

    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.len == Self::NEC_FRAME_LEN
    }
}

/// Event produced by the IR decoder.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RemoteEvent {
    /// A new button code is ready.
    Press(RawIrCode),
    /// The held button went quiet for longer than the repeat window.
    Release,
}

/// IR remote decoder.
pub trait RemoteReceiver {
    /// Takes the next decoder event, if any.
    fn poll_event(&mut self) -> Option<RemoteEvent>;
}
