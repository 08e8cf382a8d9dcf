//! CEC bus vocabulary: addresses, opcodes, operands and frames.
//!
//! Only the subset of CEC 1.3a that a television endpoint needs is modelled.
//! Values match the HDMI 1.3a supplement 1 tables.

mod frame;
pub mod opcode;
pub mod operand;
pub mod ui;

use core::fmt;

pub use frame::{FrameError, MAX_FRAME_LEN, MAX_OPERANDS, OutboundFrame, RawFrame, ReceivedFrame};
pub use opcode::Opcode;

/// 4-bit CEC logical address.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalAddress(u8);

impl LogicalAddress {
    /// The television. Doubles as the "no source" sentinel.
    pub const TV: Self = Self(0);
    /// Unregistered devices when used as initiator, broadcast as destination.
    pub const BROADCAST: Self = Self(15);
    pub const UNREGISTERED: Self = Self::BROADCAST;

    /// Creates an address from the low nibble of `value`.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value & 0x0f)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_broadcast(self) -> bool {
        self.0 == Self::BROADCAST.0
    }

    /// Returns the next address probed by discovery, wrapping 15 back to 1.
    #[must_use]
    pub const fn next_probe(self) -> Self {
        if self.0 >= 14 { Self(1) } else { Self(self.0 + 1) }
    }
}

impl fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

/// HDMI physical address, four nibbles `a.b.c.d`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PhysicalAddress(u16);

impl PhysicalAddress {
    pub const ROOT: Self = Self(0x0000);

    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Reads a big-endian address from two operand bytes.
    #[must_use]
    pub const fn from_bytes(high: u8, low: u8) -> Self {
        Self(u16::from_be_bytes([high, low]))
    }

    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Returns the TV input the address hangs off, 1 for `1.x.x.x`.
    #[must_use]
    pub const fn input_port(self) -> u8 {
        // A u16 shifted right by 12 always fits in a u8.
        #[allow(clippy::cast_possible_truncation)]
        let port = (self.0 >> 12) as u8;
        port
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [high, low] = self.to_bytes();
        write!(f, "{:x}.{:x}.{:x}.{:x}", high >> 4, high & 0x0f, low >> 4, low & 0x0f)
    }
}

/// Liveness of each logical address.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PresenceMap(u16);

impl PresenceMap {
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    pub fn mark_present(&mut self, address: LogicalAddress) {
        self.0 |= 1 << address.get();
    }

    pub fn mark_absent(&mut self, address: LogicalAddress) {
        self.0 &= !(1 << address.get());
    }

    #[must_use]
    pub const fn is_present(&self, address: LogicalAddress) -> bool {
        self.0 & (1 << address.get()) != 0
    }

    #[must_use]
    pub const fn bits(&self) -> u16 {
        self.0
    }
}
