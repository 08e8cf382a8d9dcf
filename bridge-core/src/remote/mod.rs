//! Translates IR remote presses into serial keys, CEC presses and deck
//! commands.
//!
//! Volume and mute stay on the serial link so the television's own speakers
//! react. Transport keys become `<Play>` / `<Deck Control>` for the active
//! source, and everything else is forwarded as a CEC user-control press
//! when the key has a CEC equivalent.

pub mod keymap;
pub mod keys;

use crate::cec::operand::{DeckCommand, DeckControlMode, PlayMode};
use crate::config::Ticks;
use crate::discovery::DiscoveryState;
use crate::serial::TvPower;
use crate::state::{BridgeState, WorkFlags};
use crate::timeouts::Timeout;
use crate::transport::{RawIrCode, RemoteEvent};

/// Ends any held key.
///
/// A held CEC press becomes a pending `<User Control Released>`; serial key
/// repeats stop.
pub fn release(state: &mut BridgeState) {
    if state.input.ui.take().is_some() {
        state.work.insert(WorkFlags::CEC_RELEASE);
    }
    state.work.remove(WorkFlags::KEY_ONCE);
    state.work.remove(WorkFlags::KEY_REPEAT);
}

/// Handles one decoder event.
pub fn handle_event(state: &mut BridgeState, event: RemoteEvent) {
    match event {
        RemoteEvent::Release => release(state),
        RemoteEvent::Press(code) => press(state, code),
    }
}

/// Maps transport keys onto deck commands.
#[must_use]
pub const fn deck_command(key: u8) -> Option<DeckCommand> {
    Some(match key {
        keys::PLAY => DeckCommand::Play(PlayMode::Forward),
        keys::PAUSE => DeckCommand::Play(PlayMode::Still),
        keys::FAST_FORWARD => DeckCommand::Play(PlayMode::FastForwardMedium),
        keys::REWIND => DeckCommand::Play(PlayMode::FastReverseMedium),
        keys::STOP => DeckCommand::Deck(DeckControlMode::Stop),
        keys::GOTO_PREV => DeckCommand::Deck(DeckControlMode::SkipReverse),
        keys::GOTO_NEXT => DeckCommand::Deck(DeckControlMode::SkipForward),
        keys::EJECT => DeckCommand::Deck(DeckControlMode::Eject),
        _ => return None,
    })
}

fn press(state: &mut BridgeState, code: RawIrCode) {
    if !code.is_complete() {
        return;
    }
    let key = code.code;

    release(state);

    if key == keys::POWER {
        toggle_power(state);
        return;
    }

    if state.tv != TvPower::On {
        return;
    }

    state.input.key = key;

    match key {
        keys::INPUT => {
            if state.discovery.state() == DiscoveryState::Idle {
                state.discovery.pick();
            }
        }
        keys::VOL_UP | keys::VOL_DOWN => {
            state
                .timeouts
                .arm(Timeout::Repeat, state.timings.key_repeat_delay);
            state.work.insert(WorkFlags::KEY_ONCE);
            state.work.insert(WorkFlags::KEY_REPEAT);
        }
        keys::MUTE => state.work.insert(WorkFlags::KEY_ONCE),
        _ => {
            if let Some(command) = deck_command(key) {
                state.input.deck = Some(command);
            } else if let (Some(_), Some(command)) = (state.logical_source, keymap::lookup(key)) {
                state.input.ui = Some(command);
                state.timeouts.arm(Timeout::Repeat, Ticks::ZERO);
            }
        }
    }
}

fn toggle_power(state: &mut BridgeState) {
    match state.tv {
        TvPower::On => {
            state.set_tv(TvPower::PowerOff);
            state.work.insert(WorkFlags::ACTIVE_SOURCE);
        }
        TvPower::Off => {
            state.set_tv(TvPower::PowerUp);
            if state.logical_source.is_some() {
                state.work.insert(WorkFlags::PHYS_SOURCE);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_keys_pick_play_or_deck_control() {
        assert_eq!(
            deck_command(keys::PAUSE),
            Some(DeckCommand::Play(PlayMode::Still))
        );
        assert_eq!(
            deck_command(keys::GOTO_NEXT),
            Some(DeckCommand::Deck(DeckControlMode::SkipForward))
        );
        assert_eq!(deck_command(keys::OK), None);
    }
}
