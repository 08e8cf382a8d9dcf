//! `<User Control Pressed>` operand codes.

/// CEC user-control code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct UiCommand(u8);

impl UiCommand {
    pub const SELECT: Self = Self(0x00);
    pub const UP: Self = Self(0x01);
    pub const DOWN: Self = Self(0x02);
    pub const LEFT: Self = Self(0x03);
    pub const RIGHT: Self = Self(0x04);
    pub const ROOT_MENU: Self = Self(0x09);
    pub const SETUP_MENU: Self = Self(0x0a);
    pub const CONTENTS_MENU: Self = Self(0x0b);
    pub const FAVORITE_MENU: Self = Self(0x0c);
    pub const EXIT: Self = Self(0x0d);
    pub const MEDIA_CONTEXT_SENSITIVE_MENU: Self = Self(0x11);
    pub const NUMBER_0: Self = Self(0x20);
    pub const NUMBER_1: Self = Self(0x21);
    pub const NUMBER_2: Self = Self(0x22);
    pub const NUMBER_3: Self = Self(0x23);
    pub const NUMBER_4: Self = Self(0x24);
    pub const NUMBER_5: Self = Self(0x25);
    pub const NUMBER_6: Self = Self(0x26);
    pub const NUMBER_7: Self = Self(0x27);
    pub const NUMBER_8: Self = Self(0x28);
    pub const NUMBER_9: Self = Self(0x29);
    pub const DOT: Self = Self(0x2a);
    pub const CLEAR: Self = Self(0x2c);
    pub const NEXT_FAVORITE: Self = Self(0x2f);
    pub const CHANNEL_UP: Self = Self(0x30);
    pub const CHANNEL_DOWN: Self = Self(0x31);
    pub const PREVIOUS_CHANNEL: Self = Self(0x32);
    pub const INPUT_SELECT: Self = Self(0x34);
    pub const DISPLAY_INFORMATION: Self = Self(0x35);
    pub const HELP: Self = Self(0x36);
    pub const POWER: Self = Self(0x40);
    pub const VOLUME_UP: Self = Self(0x41);
    pub const VOLUME_DOWN: Self = Self(0x42);
    pub const MUTE: Self = Self(0x43);
    pub const PLAY: Self = Self(0x44);
    pub const STOP: Self = Self(0x45);
    pub const PAUSE: Self = Self(0x46);
    pub const RECORD: Self = Self(0x47);
    pub const REWIND: Self = Self(0x48);
    pub const FAST_FORWARD: Self = Self(0x49);
    pub const EJECT: Self = Self(0x4a);
    pub const FORWARD: Self = Self(0x4b);
    pub const BACKWARD: Self = Self(0x4c);
    pub const ANGLE: Self = Self(0x50);
    pub const SUB_PICTURE: Self = Self(0x51);
    pub const VIDEO_ON_DEMAND: Self = Self(0x52);
    pub const ELECTRONIC_PROGRAM_GUIDE: Self = Self(0x53);
    pub const TIMER_PROGRAMMING: Self = Self(0x54);
    pub const INITIAL_CONFIGURATION: Self = Self(0x55);
    pub const SELECT_SOUND_PRESENTATION: Self = Self(0x57);
    pub const TUNE_FUNCTION: Self = Self(0x67);
    pub const SELECT_MEDIA_FUNCTION: Self = Self(0x68);
    pub const SELECT_AV_INPUT_FUNCTION: Self = Self(0x69);
    pub const SELECT_AUDIO_INPUT_FUNCTION: Self = Self(0x6a);
    pub const F1: Self = Self(0x71);
    pub const F2: Self = Self(0x72);
    pub const F3: Self = Self(0x73);
    pub const F4: Self = Self(0x74);
    pub const DATA: Self = Self(0x76);

    #[must_use]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}
