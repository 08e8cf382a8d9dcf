use core::fmt;

use heapless::Vec;

use super::{LogicalAddress, Opcode};

/// Maximum bytes in one CEC frame, header included.
pub const MAX_FRAME_LEN: usize = 16;
/// Maximum operand bytes following the opcode.
pub const MAX_OPERANDS: usize = MAX_FRAME_LEN - 2;

const STATUS_ERROR_MASK: u8 = 0xc0;
const STATUS_LENGTH_MASK: u8 = 0x1f;

/// Reasons a received buffer is not a usable frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// The buffer holds no bytes.
    Empty,
    /// The line driver flagged the reception; carries the error bits.
    Corrupted(u8),
    /// The status byte claims more bytes than a frame can hold.
    Overlong(u8),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Empty => f.write_str("empty frame"),
            FrameError::Corrupted(flags) => write!(f, "corrupted frame (flags {flags:#04x})"),
            FrameError::Overlong(len) => write!(f, "overlong frame ({len} bytes)"),
        }
    }
}

/// Receive buffer as handed over by the CEC line driver.
///
/// The status byte carries the byte count in its low bits and error flags in
/// bits 6 and 7. Byte 0 of the frame is the `initiator << 4 | destination`
/// header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawFrame {
    status: u8,
    bytes: [u8; MAX_FRAME_LEN],
}

impl RawFrame {
    #[must_use]
    pub const fn new(status: u8, bytes: [u8; MAX_FRAME_LEN]) -> Self {
        Self { status, bytes }
    }

    /// Builds a clean buffer from `frame`, dropping bytes past the frame limit.
    #[must_use]
    pub fn from_bytes(frame: &[u8]) -> Self {
        let len = frame.len().min(MAX_FRAME_LEN);
        let mut bytes = [0; MAX_FRAME_LEN];
        bytes[..len].copy_from_slice(&frame[..len]);
        // len is at most MAX_FRAME_LEN.
        #[allow(clippy::cast_possible_truncation)]
        let status = len as u8;
        Self { status, bytes }
    }

    /// Sets error flags on the status byte.
    #[must_use]
    pub const fn with_error_flags(mut self, flags: u8) -> Self {
        self.status |= flags & STATUS_ERROR_MASK;
        self
    }

    #[must_use]
    pub const fn status(&self) -> u8 {
        self.status
    }

    /// Validates the buffer and copies the frame out.
    ///
    /// # Errors
    ///
    /// Returns a [`FrameError`] for empty, flagged, or overlong buffers.
    pub fn parse(&self) -> Result<ReceivedFrame, FrameError> {
        let flags = self.status & STATUS_ERROR_MASK;
        if flags != 0 {
            return Err(FrameError::Corrupted(flags));
        }

        let len = self.status & STATUS_LENGTH_MASK;
        if len == 0 {
            return Err(FrameError::Empty);
        }

        let bytes = self
            .bytes
            .get(..usize::from(len))
            .and_then(|slice| Vec::from_slice(slice).ok())
            .ok_or(FrameError::Overlong(len))?;

        Ok(ReceivedFrame { bytes })
    }
}

/// A validated inbound frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceivedFrame {
    bytes: Vec<u8, MAX_FRAME_LEN>,
}

impl ReceivedFrame {
    #[must_use]
    pub fn initiator(&self) -> LogicalAddress {
        LogicalAddress::new(self.bytes[0] >> 4)
    }

    #[must_use]
    pub fn destination(&self) -> LogicalAddress {
        LogicalAddress::new(self.bytes[0])
    }

    /// Returns `None` for header-only polling frames.
    #[must_use]
    pub fn opcode(&self) -> Option<Opcode> {
        self.bytes.get(1).copied().map(Opcode::new)
    }

    #[must_use]
    pub fn operands(&self) -> &[u8] {
        self.bytes.get(2..).unwrap_or(&[])
    }

    /// Frame length in bytes, header included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// A frame staged for transmission.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OutboundFrame {
    destination: LogicalAddress,
    opcode: Option<Opcode>,
    operands: [u8; MAX_OPERANDS],
    operand_len: u8,
}

impl OutboundFrame {
    /// Header-only frame used to check whether `destination` acknowledges.
    #[must_use]
    pub const fn poll(destination: LogicalAddress) -> Self {
        Self {
            destination,
            opcode: None,
            operands: [0; MAX_OPERANDS],
            operand_len: 0,
        }
    }

    #[must_use]
    pub fn new<const N: usize>(
        destination: LogicalAddress,
        opcode: Opcode,
        operands: [u8; N],
    ) -> Self {
        const { assert!(N <= MAX_OPERANDS) };

        let mut frame = Self::poll(destination);
        frame.opcode = Some(opcode);
        frame.operands[..N].copy_from_slice(&operands);
        // N is bounded by MAX_OPERANDS above.
        #[allow(clippy::cast_possible_truncation)]
        let operand_len = N as u8;
        frame.operand_len = operand_len;
        frame
    }

    /// Frame addressed to every device.
    #[must_use]
    pub fn broadcast<const N: usize>(opcode: Opcode, operands: [u8; N]) -> Self {
        Self::new(LogicalAddress::BROADCAST, opcode, operands)
    }

    #[must_use]
    pub const fn destination(&self) -> LogicalAddress {
        self.destination
    }

    #[must_use]
    pub const fn opcode(&self) -> Option<Opcode> {
        self.opcode
    }

    #[must_use]
    pub fn operands(&self) -> &[u8] {
        &self.operands[..usize::from(self.operand_len)]
    }

    /// Serialises the frame with `initiator` in the header.
    #[must_use]
    pub fn encode(&self, initiator: LogicalAddress) -> Vec<u8, MAX_FRAME_LEN> {
        let header = (initiator.get() << 4) | self.destination.get();
        let mut bytes = Vec::new();
        bytes.extend(
            core::iter::once(header)
                .chain(self.opcode.map(Opcode::raw))
                .chain(self.operands().iter().copied()),
        );
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_flagged_buffers() {
        let raw = RawFrame::from_bytes(&[0x40, 0x04]).with_error_flags(0x80);
        assert_eq!(raw.parse(), Err(FrameError::Corrupted(0x80)));
        assert_eq!(RawFrame::from_bytes(&[]).parse(), Err(FrameError::Empty));
        assert_eq!(
            RawFrame::new(0x11, [0; MAX_FRAME_LEN]).parse(),
            Err(FrameError::Overlong(0x11))
        );
    }

    #[test]
    fn parse_splits_header_and_operands() {
        let frame = RawFrame::from_bytes(&[0x4f, 0x84, 0x10, 0x00, 0x04])
            .parse()
            .expect("valid frame");

        assert_eq!(frame.initiator(), LogicalAddress::new(4));
        assert!(frame.destination().is_broadcast());
        assert_eq!(frame.opcode(), Some(Opcode::REPORT_PHYSICAL_ADDRESS));
        assert_eq!(frame.operands(), &[0x10, 0x00, 0x04]);
        assert_eq!(frame.len(), 5);
    }

    #[test]
    fn polling_frame_has_no_opcode() {
        let frame = RawFrame::from_bytes(&[0x30]).parse().expect("poll frame");
        assert_eq!(frame.opcode(), None);
        assert!(frame.operands().is_empty());
    }

    #[test]
    fn encode_places_initiator_in_high_nibble() {
        let frame = OutboundFrame::broadcast(Opcode::ACTIVE_SOURCE, [0x00, 0x00]);
        assert_eq!(
            frame.encode(LogicalAddress::TV).as_slice(),
            &[0x0f, 0x82, 0x00, 0x00]
        );

        let poll = OutboundFrame::poll(LogicalAddress::new(4));
        assert_eq!(poll.encode(LogicalAddress::TV).as_slice(), &[0x04]);
    }
}
