//! Operand values carried by the messages the bridge sends.

/// Device type reported alongside a physical address.
pub const DEVICE_TYPE_TV: u8 = 0x00;

/// CEC version 1.3a.
pub const CEC_VERSION_1_3A: u8 = 0x04;

/// Feature-abort reason: unrecognized opcode.
pub const ABORT_UNRECOGNIZED_OPCODE: u8 = 0x00;

/// `<Report Power Status>` operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PowerStatus {
    On = 0x00,
    Standby = 0x01,
    TransitionToOn = 0x02,
    TransitionToStandby = 0x03,
}

/// `<Deck Control>` modes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeckControlMode {
    SkipForward = 0x01,
    SkipReverse = 0x02,
    Stop = 0x03,
    Eject = 0x04,
}

/// `<Play>` modes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayMode {
    FastForwardMedium = 0x06,
    FastReverseMedium = 0x0a,
    Forward = 0x24,
    Still = 0x25,
}

/// Transport command forwarded to the active source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeckCommand {
    Play(PlayMode),
    Deck(DeckControlMode),
}

impl DeckCommand {
    /// Opcode the command is carried by.
    #[must_use]
    pub const fn opcode(self) -> super::Opcode {
        match self {
            DeckCommand::Play(_) => super::Opcode::PLAY,
            DeckCommand::Deck(_) => super::Opcode::DECK_CONTROL,
        }
    }

    /// Single operand byte of the command.
    #[must_use]
    pub const fn operand(self) -> u8 {
        match self {
            DeckCommand::Play(mode) => mode as u8,
            DeckCommand::Deck(mode) => mode as u8,
        }
    }
}
