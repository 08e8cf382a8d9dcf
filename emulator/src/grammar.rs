//! Parser for emulator commands.
//!
//! Each line is one command. Byte values are hexadecimal with an optional
//! `0x` prefix, counts and addresses are decimal.

use winnow::ascii::{dec_uint, hex_uint, space0, space1};
use winnow::combinator::{alt, opt, preceded, separated};
use winnow::prelude::*;
use winnow::token::rest;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advance the coordinator by this many ticks.
    Tick(u32),
    /// Queue an IR press with this LG key code.
    Press(u8),
    /// Queue an IR release.
    Release,
    /// Queue a received CEC frame, header first.
    Cec(Vec<u8>),
    /// Queue bytes arriving from the TV's serial port.
    Serial(String),
    /// Make a logical address acknowledge directly addressed frames.
    Ack(u8),
    /// Stop a logical address from acknowledging.
    Nack(u8),
    Status,
    Help,
}

/// Parses one trimmed command line.
///
/// # Errors
///
/// Returns the rendered parse error when the line is not a command.
pub fn parse(line: &str) -> Result<Command, String> {
    command.parse(line.trim()).map_err(|error| error.to_string())
}

fn command(input: &mut &str) -> ModalResult<Command> {
    alt((
        preceded(("tick", space0), opt(dec_uint))
            .map(|count: Option<u32>| Command::Tick(count.unwrap_or(1))),
        preceded(("ir", space1), byte).map(Command::Press),
        "release".value(Command::Release),
        preceded(("cec", space1), separated(1.., byte, space1)).map(Command::Cec),
        preceded(("serial", space1), rest).map(|text: &str| Command::Serial(text.to_owned())),
        preceded(("ack", space1), dec_uint).map(Command::Ack),
        preceded(("nack", space1), dec_uint).map(Command::Nack),
        "status".value(Command::Status),
        "help".value(Command::Help),
    ))
    .parse_next(input)
}

fn byte(input: &mut &str) -> ModalResult<u8> {
    preceded(opt("0x"), hex_uint).parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_count_defaults_to_one() {
        assert_eq!(parse("tick"), Ok(Command::Tick(1)));
        assert_eq!(parse("tick 250"), Ok(Command::Tick(250)));
    }

    #[test]
    fn cec_frames_are_hex_bytes() {
        assert_eq!(parse("cec 40 9f"), Ok(Command::Cec(vec![0x40, 0x9f])));
        assert_eq!(
            parse("cec 0x4f 0x82 10 00"),
            Ok(Command::Cec(vec![0x4f, 0x82, 0x10, 0x00]))
        );
    }

    #[test]
    fn serial_keeps_the_rest_of_the_line() {
        assert_eq!(
            parse("serial a 01 OK01x"),
            Ok(Command::Serial("a 01 OK01x".to_owned()))
        );
    }

    #[test]
    fn ir_codes_and_addresses() {
        assert_eq!(parse("ir 0x09"), Ok(Command::Press(0x09)));
        assert_eq!(parse("ack 4"), Ok(Command::Ack(4)));
        assert_eq!(parse("nack 12"), Ok(Command::Nack(12)));
    }

    #[test]
    fn rejects_unknown_commands() {
        assert!(parse("reboot now").is_err());
        assert!(parse("cec").is_err());
        assert!(parse("tick soon").is_err());
    }
}
