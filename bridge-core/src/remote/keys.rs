//! LG remote key codes, as carried in NEC frames and in `mc` serial commands.

pub const CH_UP: u8 = 0x00;
pub const CH_DOWN: u8 = 0x01;
pub const VOL_UP: u8 = 0x02;
pub const VOL_DOWN: u8 = 0x03;
pub const RIGHT: u8 = 0x06;
pub const LEFT: u8 = 0x07;
pub const POWER: u8 = 0x08;
pub const MUTE: u8 = 0x09;
pub const AUDIO: u8 = 0x0a;
pub const INPUT: u8 = 0x0b;
pub const SLEEP: u8 = 0x0e;
pub const TV: u8 = 0x0f;
pub const NUM_0: u8 = 0x10;
pub const NUM_1: u8 = 0x11;
pub const NUM_2: u8 = 0x12;
pub const NUM_3: u8 = 0x13;
pub const NUM_4: u8 = 0x14;
pub const NUM_5: u8 = 0x15;
pub const NUM_6: u8 = 0x16;
pub const NUM_7: u8 = 0x17;
pub const NUM_8: u8 = 0x18;
pub const NUM_9: u8 = 0x19;
pub const FLASHBACK: u8 = 0x1a;
pub const FAV: u8 = 0x1e;
/// Teletext.
pub const TEXT: u8 = 0x20;
/// Teletext options.
pub const TOPT: u8 = 0x21;
pub const BACK: u8 = 0x28;
pub const AV_MODE: u8 = 0x30;
pub const SUBTITLE: u8 = 0x39;
pub const UP: u8 = 0x40;
pub const DOWN: u8 = 0x41;
pub const MY_APPS: u8 = 0x42;
pub const HOME: u8 = 0x43;
pub const OK: u8 = 0x44;
pub const Q_MENU: u8 = 0x45;
pub const LIST_ATSC: u8 = 0x4c;
pub const PICTURE: u8 = 0x4d;
pub const INPUT_SVIDEO: u8 = 0x51;
pub const SOUND: u8 = 0x52;
pub const LIST: u8 = 0x53;
pub const PREMIUM: u8 = 0x59;
pub const INPUT_AV1: u8 = 0x5a;
pub const EXIT: u8 = 0x5b;
pub const PIP: u8 = 0x60;
/// Blue, also F4.
pub const F4: u8 = 0x61;
/// Yellow, also F3.
pub const F3: u8 = 0x63;
/// Channel search.
pub const POP: u8 = 0x70;
/// Green, also F2.
pub const F2: u8 = 0x71;
/// Red, also F1.
pub const F1: u8 = 0x72;
pub const RATIO_4_3: u8 = 0x76;
pub const RATIO_16_9: u8 = 0x77;
pub const RATIO: u8 = 0x79;
pub const USER_GUIDE: u8 = 0x7a;
pub const SMART_HOME: u8 = 0x7c;
pub const SIMPLINK: u8 = 0x7e;
pub const FAST_FORWARD: u8 = 0x8e;
pub const REWIND: u8 = 0x8f;
/// Audio description / SAP / `*`.
pub const SAP: u8 = 0x91;
pub const ENERGY: u8 = 0x95;
pub const INPUT_RGB1: u8 = 0x98;
pub const AUTO_CONFIG: u8 = 0x99;
pub const LIVE_TV: u8 = 0x9e;
pub const APP: u8 = 0x9f;
pub const INFO: u8 = 0xaa;
pub const GUIDE: u8 = 0xab;
pub const RATIO_ZOOM: u8 = 0xaf;
pub const PLAY: u8 = 0xb0;
pub const STOP: u8 = 0xb1;
pub const GOTO_PREV: u8 = 0xb2;
pub const GOTO_NEXT: u8 = 0xb3;
pub const PAUSE: u8 = 0xba;
pub const SOCCER: u8 = 0xbb;
pub const RECORD: u8 = 0xbd;
pub const INPUT_COMPONENT1: u8 = 0xbf;
pub const RED2: u8 = 0xc0;
pub const YELLOW2: u8 = 0xc1;
pub const BLUE2: u8 = 0xc2;
pub const GREEN2: u8 = 0xc3;
pub const INPUT_RGB2: u8 = 0xc6;
pub const INPUT_DVI: u8 = 0xc7;
pub const XSTUDIO: u8 = 0xc8;
pub const EJECT: u8 = 0xca;
pub const INPUT_HDMI2: u8 = 0xcc;
pub const INPUT_HDMI1: u8 = 0xce;
pub const INPUT_AV2: u8 = 0xd0;
pub const INPUT_VIDEO3: u8 = 0xd1;
pub const INPUT_VIDEO4: u8 = 0xd2;
pub const INPUT_SVIDEO2: u8 = 0xd3;
pub const INPUT_COMPONENT2: u8 = 0xd4;
pub const INPUT_RGB_PC: u8 = 0xd5;
pub const INPUT_TV: u8 = 0xd6;
pub const INPUT_RGB_DTV: u8 = 0xd7;
pub const INPUT_SVIDEO1: u8 = 0xd8;
pub const INPUT_COMPONENT3: u8 = 0xd9;
pub const INPUT_HDMI4: u8 = 0xda;
pub const THREE_D: u8 = 0xdc;
pub const INPUT_HDMI3: u8 = 0xe9;
