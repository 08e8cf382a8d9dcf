//! Positional assembler for replies from the television.
//!
//! Replies look like `a 01 OK01x`:
//!
//! ```text
//! a 01 OK01x
//! 0123456789
//! ```
//!
//! Position 0 is the command letter, 5 and 6 the acknowledgement, 8 the
//! response digit. `x` terminates the frame.

/// Terminator closing every reply.
pub const TERMINATOR: u8 = b'x';

const COMMAND_POS: u8 = 0;
const ACK_POS: u8 = 5;
const ACK_SECOND_POS: u8 = 6;
const DIGITLESS_TERMINATOR_POS: u8 = 7;
const DIGIT_POS: u8 = 8;

/// Acknowledgement carried by a reply.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ack {
    Ok,
    Ng,
    /// Anything other than `OK` or `NG`.
    Unknown([u8; 2]),
}

impl Ack {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        match bytes {
            [b'O', b'K'] => Ack::Ok,
            [b'N', b'G'] => Ack::Ng,
            other => Ack::Unknown(other),
        }
    }
}

/// A complete reply.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SerialResponse {
    /// Second letter of the command being answered.
    pub command: u8,
    pub ack: Ack,
    /// Response digit, `'0'` when the reply carried none.
    pub digit: u8,
}

/// Accumulates reply bytes by position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseAssembler {
    position: u8,
    command: u8,
    ack: [u8; 2],
    digit: Option<u8>,
}

impl ResponseAssembler {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: 0,
            command: 0,
            ack: [0; 2],
            digit: None,
        }
    }

    /// Number of bytes accepted since the last reset.
    #[must_use]
    pub const fn position(&self) -> u8 {
        self.position
    }

    /// Drops any partially assembled reply.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Feeds one byte, returning the reply once its terminator arrives.
    ///
    /// Terminators seen before the acknowledgement is complete discard the
    /// partial frame.
    pub fn push(&mut self, byte: u8) -> Option<SerialResponse> {
        let position = self.position;

        if byte == TERMINATOR {
            let response = (position >= DIGITLESS_TERMINATOR_POS).then(|| SerialResponse {
                command: self.command,
                ack: Ack::from_bytes(self.ack),
                digit: self.digit.unwrap_or(b'0'),
            });
            self.reset();
            return response;
        }

        match position {
            COMMAND_POS => self.command = byte,
            ACK_POS => self.ack[0] = byte,
            ACK_SECOND_POS => self.ack[1] = byte,
            DIGIT_POS => self.digit = Some(byte),
            _ => {}
        }
        self.position = position.saturating_add(1);

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(assembler: &mut ResponseAssembler, bytes: &[u8]) -> Option<SerialResponse> {
        let mut last = None;
        for &byte in bytes {
            last = assembler.push(byte);
        }
        last
    }

    #[test]
    fn ok_reply_carries_the_digit() {
        let mut assembler = ResponseAssembler::new();
        let response = feed(&mut assembler, b"a 01 OK01x").expect("complete reply");

        assert_eq!(response.command, b'a');
        assert_eq!(response.ack, Ack::Ok);
        assert_eq!(response.digit, b'1');
        assert_eq!(assembler.position(), 0);
    }

    #[test]
    fn terminator_at_seven_synthesises_zero() {
        let mut assembler = ResponseAssembler::new();
        let response = feed(&mut assembler, b"m 01 NGx").expect("complete reply");

        assert_eq!(response.command, b'm');
        assert_eq!(response.ack, Ack::Ng);
        assert_eq!(response.digit, b'0');
    }

    #[test]
    fn early_terminator_discards_partial_reply() {
        let mut assembler = ResponseAssembler::new();
        assert_eq!(feed(&mut assembler, b"a 01x"), None);
        assert_eq!(assembler.position(), 0);

        let response = feed(&mut assembler, b"a 01 OK00x").expect("reply after reset");
        assert_eq!(response.ack, Ack::Ok);
    }

    #[test]
    fn unknown_acknowledgement_is_preserved() {
        let mut assembler = ResponseAssembler::new();
        let response = feed(&mut assembler, b"a 01 ??00x").expect("complete reply");
        assert_eq!(response.ack, Ack::Unknown(*b"??"));
    }
}
