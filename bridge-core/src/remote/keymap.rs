//! LG key code to CEC user-control translation table.

use super::keys;
use crate::cec::ui::UiCommand;

/// Number of LG key codes covered by the table.
pub const KEYMAP_LEN: usize = 0xf0;

/// Table entry for keys with no CEC equivalent.
pub const UNMAPPED: u8 = 0xff;

static KEYMAP: [u8; KEYMAP_LEN] = build(&ENTRIES);

const ENTRIES: [(u8, UiCommand); 97] = [
    (keys::CH_UP, UiCommand::CHANNEL_UP),
    (keys::CH_DOWN, UiCommand::CHANNEL_DOWN),
    (keys::VOL_UP, UiCommand::VOLUME_UP),
    (keys::VOL_DOWN, UiCommand::VOLUME_DOWN),
    (keys::MUTE, UiCommand::MUTE),
    (keys::POWER, UiCommand::POWER),
    (keys::INPUT, UiCommand::INPUT_SELECT),
    (keys::TV, UiCommand::TUNE_FUNCTION),
    (keys::LIVE_TV, UiCommand::TUNE_FUNCTION),
    (keys::NUM_0, UiCommand::NUMBER_0),
    (keys::NUM_1, UiCommand::NUMBER_1),
    (keys::NUM_2, UiCommand::NUMBER_2),
    (keys::NUM_3, UiCommand::NUMBER_3),
    (keys::NUM_4, UiCommand::NUMBER_4),
    (keys::NUM_5, UiCommand::NUMBER_5),
    (keys::NUM_6, UiCommand::NUMBER_6),
    (keys::NUM_7, UiCommand::NUMBER_7),
    (keys::NUM_8, UiCommand::NUMBER_8),
    (keys::NUM_9, UiCommand::NUMBER_9),
    (keys::FLASHBACK, UiCommand::PREVIOUS_CHANNEL),
    (keys::FAV, UiCommand::NEXT_FAVORITE),
    // Menus and apps
    (keys::SMART_HOME, UiCommand::ROOT_MENU),
    (keys::AUTO_CONFIG, UiCommand::INITIAL_CONFIGURATION),
    (keys::USER_GUIDE, UiCommand::HELP),
    (keys::MY_APPS, UiCommand::CONTENTS_MENU),
    (keys::APP, UiCommand::CONTENTS_MENU),
    (keys::PREMIUM, UiCommand::VIDEO_ON_DEMAND),
    (keys::SOCCER, UiCommand::FAVORITE_MENU),
    (keys::XSTUDIO, UiCommand::DATA),
    // Discrete input codes
    (keys::INPUT_SVIDEO, UiCommand::INPUT_SELECT),
    (keys::INPUT_SVIDEO1, UiCommand::INPUT_SELECT),
    (keys::INPUT_SVIDEO2, UiCommand::INPUT_SELECT),
    (keys::INPUT_AV1, UiCommand::INPUT_SELECT),
    (keys::INPUT_AV2, UiCommand::INPUT_SELECT),
    (keys::INPUT_RGB1, UiCommand::INPUT_SELECT),
    (keys::INPUT_RGB2, UiCommand::INPUT_SELECT),
    (keys::INPUT_RGB_PC, UiCommand::INPUT_SELECT),
    (keys::INPUT_RGB_DTV, UiCommand::INPUT_SELECT),
    (keys::INPUT_COMPONENT1, UiCommand::INPUT_SELECT),
    (keys::INPUT_COMPONENT2, UiCommand::INPUT_SELECT),
    (keys::INPUT_COMPONENT3, UiCommand::INPUT_SELECT),
    (keys::INPUT_DVI, UiCommand::INPUT_SELECT),
    (keys::INPUT_HDMI1, UiCommand::INPUT_SELECT),
    (keys::INPUT_HDMI2, UiCommand::INPUT_SELECT),
    (keys::INPUT_HDMI3, UiCommand::INPUT_SELECT),
    (keys::INPUT_HDMI4, UiCommand::INPUT_SELECT),
    (keys::INPUT_VIDEO3, UiCommand::INPUT_SELECT),
    (keys::INPUT_VIDEO4, UiCommand::INPUT_SELECT),
    (keys::INPUT_TV, UiCommand::INPUT_SELECT),
    // Navigation
    (keys::RIGHT, UiCommand::RIGHT),
    (keys::LEFT, UiCommand::LEFT),
    (keys::DOWN, UiCommand::DOWN),
    (keys::UP, UiCommand::UP),
    (keys::BACK, UiCommand::EXIT),
    (keys::EXIT, UiCommand::CLEAR),
    (keys::OK, UiCommand::SELECT),
    (keys::INFO, UiCommand::DISPLAY_INFORMATION),
    // Picture and sound
    (keys::TEXT, UiCommand::SUB_PICTURE),
    (keys::TOPT, UiCommand::SUB_PICTURE),
    (keys::SUBTITLE, UiCommand::SUB_PICTURE),
    (keys::AV_MODE, UiCommand::SELECT_AV_INPUT_FUNCTION),
    (keys::AUDIO, UiCommand::SELECT_AUDIO_INPUT_FUNCTION),
    (keys::SOUND, UiCommand::SELECT_SOUND_PRESENTATION),
    (keys::PICTURE, UiCommand::SELECT_MEDIA_FUNCTION),
    (keys::RATIO, UiCommand::ANGLE),
    (keys::RATIO_ZOOM, UiCommand::ANGLE),
    (keys::RATIO_4_3, UiCommand::ANGLE),
    (keys::RATIO_16_9, UiCommand::ANGLE),
    (keys::THREE_D, UiCommand::ANGLE),
    (keys::PIP, UiCommand::ANGLE),
    (keys::SLEEP, UiCommand::TIMER_PROGRAMMING),
    (keys::ENERGY, UiCommand::TIMER_PROGRAMMING),
    // Colour keys
    (keys::F1, UiCommand::F1),
    (keys::RED2, UiCommand::F1),
    (keys::F2, UiCommand::F2),
    (keys::GREEN2, UiCommand::F2),
    (keys::F3, UiCommand::F3),
    (keys::YELLOW2, UiCommand::F3),
    (keys::F4, UiCommand::F4),
    (keys::BLUE2, UiCommand::F4),
    (keys::Q_MENU, UiCommand::MEDIA_CONTEXT_SENSITIVE_MENU),
    (keys::HOME, UiCommand::SETUP_MENU),
    (keys::POP, UiCommand::SETUP_MENU),
    (keys::SIMPLINK, UiCommand::SETUP_MENU),
    (keys::LIST_ATSC, UiCommand::ELECTRONIC_PROGRAM_GUIDE),
    (keys::LIST, UiCommand::ELECTRONIC_PROGRAM_GUIDE),
    (keys::GUIDE, UiCommand::ELECTRONIC_PROGRAM_GUIDE),
    // Transport
    (keys::FAST_FORWARD, UiCommand::FAST_FORWARD),
    (keys::REWIND, UiCommand::REWIND),
    (keys::PLAY, UiCommand::PLAY),
    (keys::PAUSE, UiCommand::PAUSE),
    (keys::STOP, UiCommand::STOP),
    (keys::GOTO_PREV, UiCommand::BACKWARD),
    (keys::GOTO_NEXT, UiCommand::FORWARD),
    (keys::RECORD, UiCommand::RECORD),
    (keys::EJECT, UiCommand::EJECT),
    (keys::SAP, UiCommand::DOT),
];

const fn build(entries: &[(u8, UiCommand)]) -> [u8; KEYMAP_LEN] {
    let mut table = [UNMAPPED; KEYMAP_LEN];
    let mut index = 0;
    while index < entries.len() {
        let (key, command) = entries[index];
        table[key as usize] = command.raw();
        index += 1;
    }
    table
}

/// Translates an LG key code into a CEC user-control code.
#[must_use]
pub fn lookup(key: u8) -> Option<UiCommand> {
    match KEYMAP.get(usize::from(key)).copied() {
        None | Some(UNMAPPED) => None,
        Some(raw) => Some(UiCommand::new(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_keys_translate() {
        assert_eq!(lookup(keys::OK), Some(UiCommand::SELECT));
        assert_eq!(lookup(keys::UP), Some(UiCommand::UP));
        assert_eq!(lookup(keys::BACK), Some(UiCommand::EXIT));
        assert_eq!(lookup(keys::NUM_7), Some(UiCommand::NUMBER_7));
    }

    #[test]
    fn aliased_keys_share_a_command() {
        assert_eq!(lookup(keys::RED2), lookup(keys::F1));
        assert_eq!(lookup(keys::INPUT_HDMI3), Some(UiCommand::INPUT_SELECT));
    }

    #[test]
    fn unmapped_and_out_of_range_keys_miss() {
        assert_eq!(lookup(0x04), None);
        assert_eq!(lookup(0xfa), None);
        assert_eq!(lookup(0xff), None);
    }
}
