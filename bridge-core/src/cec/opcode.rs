//! CEC opcodes understood or produced by the bridge.

use core::fmt;

/// CEC message opcode.
///
/// Kept as an open newtype so unknown opcodes can be echoed back in a
/// feature-abort reply.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Opcode(u8);

impl Opcode {
    pub const FEATURE_ABORT: Self = Self(0x00);
    pub const IMAGE_VIEW_ON: Self = Self(0x04);
    pub const TEXT_VIEW_ON: Self = Self(0x0d);
    pub const SET_MENU_LANGUAGE: Self = Self(0x32);
    pub const PLAY: Self = Self(0x41);
    pub const DECK_CONTROL: Self = Self(0x42);
    pub const USER_CONTROL_PRESSED: Self = Self(0x44);
    pub const USER_CONTROL_RELEASED: Self = Self(0x45);
    pub const ROUTING_CHANGE: Self = Self(0x80);
    pub const ROUTING_INFORMATION: Self = Self(0x81);
    pub const ACTIVE_SOURCE: Self = Self(0x82);
    pub const GIVE_PHYSICAL_ADDRESS: Self = Self(0x83);
    pub const REPORT_PHYSICAL_ADDRESS: Self = Self(0x84);
    pub const SET_STREAM_PATH: Self = Self(0x86);
    pub const GIVE_DEVICE_POWER_STATUS: Self = Self(0x8f);
    pub const REPORT_POWER_STATUS: Self = Self(0x90);
    pub const GET_MENU_LANGUAGE: Self = Self(0x91);
    pub const VENDOR_COMMAND: Self = Self(0x89);
    pub const INACTIVE_SOURCE: Self = Self(0x9d);
    pub const CEC_VERSION: Self = Self(0x9e);
    pub const GET_CEC_VERSION: Self = Self(0x9f);

    #[must_use]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    const fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::FEATURE_ABORT => "feature-abort",
            Self::IMAGE_VIEW_ON => "image-view-on",
            Self::TEXT_VIEW_ON => "text-view-on",
            Self::SET_MENU_LANGUAGE => "set-menu-language",
            Self::PLAY => "play",
            Self::DECK_CONTROL => "deck-control",
            Self::USER_CONTROL_PRESSED => "user-control-pressed",
            Self::USER_CONTROL_RELEASED => "user-control-released",
            Self::ROUTING_CHANGE => "routing-change",
            Self::ROUTING_INFORMATION => "routing-information",
            Self::ACTIVE_SOURCE => "active-source",
            Self::GIVE_PHYSICAL_ADDRESS => "give-physical-address",
            Self::REPORT_PHYSICAL_ADDRESS => "report-physical-address",
            Self::SET_STREAM_PATH => "set-stream-path",
            Self::GIVE_DEVICE_POWER_STATUS => "give-device-power-status",
            Self::REPORT_POWER_STATUS => "report-power-status",
            Self::GET_MENU_LANGUAGE => "get-menu-language",
            Self::VENDOR_COMMAND => "vendor-command",
            Self::INACTIVE_SOURCE => "inactive-source",
            Self::CEC_VERSION => "cec-version",
            Self::GET_CEC_VERSION => "get-cec-version",
            _ => return None,
        })
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "opcode({:#04x})", self.0),
        }
    }
}
