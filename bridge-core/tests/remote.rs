mod support;

use bridge_core::cec::{LogicalAddress, PhysicalAddress, PresenceMap};
use bridge_core::discovery::DiscoveryState;
use bridge_core::remote::keys;
use bridge_core::transport::{RawIrCode, RemoteEvent};

use support::{TestBridge, bridge, powered_on, run, run_until};

fn with_source(bridge: &mut TestBridge, logical: u8) {
    let mut snapshot = bridge.status();
    snapshot.logical_source = Some(LogicalAddress::new(logical));
    snapshot.physical_source = PhysicalAddress::new(0x1000);
    snapshot.presence = PresenceMap::new();
    bridge.restore(&snapshot);
    bridge.cec_mut().acknowledge(logical);
}

fn key_commands(bridge: &mut TestBridge) -> Vec<String> {
    bridge
        .serial_port_mut()
        .take_commands()
        .into_iter()
        .filter(|command| command.starts_with("mc"))
        .collect()
}

fn user_control(bridge: &mut TestBridge) -> Vec<Vec<u8>> {
    bridge
        .cec_mut()
        .take_sent()
        .into_iter()
        .filter(|frame| matches!(frame.get(1), Some(0x41 | 0x42 | 0x44 | 0x45)))
        .collect()
}

#[test]
fn mute_is_followed_by_right_arrow_each_time() {
    let mut bridge = powered_on();

    bridge.remote_mut().press(keys::MUTE);
    run(&mut bridge, 20);
    bridge.remote_mut().release();
    bridge.remote_mut().press(keys::MUTE);
    run(&mut bridge, 20);

    assert_eq!(
        key_commands(&mut bridge),
        ["mc 01 09", "mc 01 06", "mc 01 09", "mc 01 06"]
    );
}

#[test]
fn held_volume_repeats_until_released() {
    let mut bridge = powered_on();

    bridge.remote_mut().press(keys::VOL_UP);
    run(&mut bridge, 10);
    assert_eq!(key_commands(&mut bridge), ["mc 01 02"]);

    run(&mut bridge, 480);
    assert!(key_commands(&mut bridge).is_empty(), "repeat waits for the delay");

    run(&mut bridge, 320);
    let repeats = key_commands(&mut bridge);
    assert!(
        (3..=4).contains(&repeats.len()),
        "unexpected repeats {repeats:?}"
    );
    assert!(repeats.iter().all(|command| command == "mc 01 02"));

    bridge.remote_mut().release();
    run(&mut bridge, 300);
    assert!(key_commands(&mut bridge).is_empty());
}

#[test]
fn keys_are_ignored_while_the_tv_is_off() {
    let mut bridge = bridge();
    bridge.remote_mut().press(keys::VOL_UP);
    bridge.remote_mut().press(keys::OK);
    run(&mut bridge, 20);

    assert!(key_commands(&mut bridge).is_empty());
    assert!(user_control(&mut bridge).is_empty());
}

#[test]
fn incomplete_codes_are_dropped() {
    let mut bridge = powered_on();
    bridge
        .remote_mut()
        .events
        .push_back(RemoteEvent::Press(RawIrCode::new(2, keys::MUTE)));
    run(&mut bridge, 20);

    assert!(key_commands(&mut bridge).is_empty());
}

#[test]
fn navigation_keys_are_forwarded_over_cec() {
    let mut bridge = powered_on();
    with_source(&mut bridge, 4);

    bridge.remote_mut().press(keys::OK);
    run(&mut bridge, 10);
    assert_eq!(user_control(&mut bridge), [vec![0x04, 0x44, 0x00]]);

    run(&mut bridge, 400);
    assert_eq!(user_control(&mut bridge), [vec![0x04, 0x44, 0x00]]);

    bridge.remote_mut().release();
    run(&mut bridge, 10);
    assert_eq!(user_control(&mut bridge), [vec![0x04, 0x45]]);
    assert!(key_commands(&mut bridge).is_empty());
}

#[test]
fn navigation_keys_need_a_source() {
    let mut bridge = powered_on();
    bridge.remote_mut().press(keys::OK);
    run(&mut bridge, 10);
    bridge.remote_mut().release();
    run(&mut bridge, 10);

    assert!(user_control(&mut bridge).is_empty());
}

#[test]
fn transport_keys_use_play_or_deck_control() {
    let mut bridge = powered_on();
    with_source(&mut bridge, 4);

    bridge.remote_mut().press(keys::PLAY);
    run(&mut bridge, 10);
    bridge.remote_mut().press(keys::PAUSE);
    run(&mut bridge, 10);
    bridge.remote_mut().press(keys::STOP);
    run(&mut bridge, 10);
    bridge.remote_mut().press(keys::GOTO_NEXT);
    run(&mut bridge, 10);

    assert_eq!(
        user_control(&mut bridge),
        [
            vec![0x04, 0x41, 0x24],
            vec![0x04, 0x41, 0x25],
            vec![0x04, 0x42, 0x03],
            vec![0x04, 0x42, 0x01],
        ]
    );
}

#[test]
fn input_key_searches_for_a_new_source() {
    let mut bridge = powered_on();
    with_source(&mut bridge, 4);
    run(&mut bridge, 5);
    assert_eq!(bridge.discovery_state(), DiscoveryState::Idle);

    bridge.remote_mut().press(keys::INPUT);
    run_until(&mut bridge, 5, |bridge| bridge.logical_source().is_none());

    assert_eq!(bridge.discovery_state(), DiscoveryState::Logical);
}
