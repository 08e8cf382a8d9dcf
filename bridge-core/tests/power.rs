mod support;

use bridge_core::cec::{LogicalAddress, PhysicalAddress};
use bridge_core::config::{BridgeConfig, StatusQuery};
use bridge_core::remote::keys;
use bridge_core::serial::TvPower;
use bridge_core::telemetry::TelemetryEventKind;

use support::{bridge, bridge_with, powered_on, run, run_until};

fn recorded(bridge: &support::TestBridge, event: TelemetryEventKind) -> bool {
    bridge
        .telemetry()
        .oldest_first()
        .any(|record| record.event == event)
}

#[test]
fn first_tick_queries_power_state() {
    let mut bridge = bridge();
    run(&mut bridge, 1);

    assert_eq!(bridge.serial_port_mut().take_commands(), ["ka 01 ff"]);
    assert_eq!(bridge.tv_power(), TvPower::Off);
}

#[test]
fn ok_reply_marks_the_tv_on() {
    let mut bridge = bridge();
    run(&mut bridge, 1);

    bridge.serial_port_mut().feed("a 01 OK00x");
    run_until(&mut bridge, 50, |bridge| bridge.tv_power() == TvPower::On);

    assert!(recorded(&bridge, TelemetryEventKind::TvPower(TvPower::On)));
}

#[test]
fn remote_lock_query_is_configurable() {
    let config = BridgeConfig::default().with_status_query(StatusQuery::RemoteLock);
    let mut bridge = bridge_with(config);
    run(&mut bridge, 1);
    assert_eq!(bridge.serial_port_mut().take_commands(), ["km 01 ff"]);

    bridge.serial_port_mut().feed("m 01 OK00x");
    run_until(&mut bridge, 50, |bridge| bridge.tv_power() == TvPower::On);
}

#[test]
fn set_id_is_rendered_in_decimal() {
    let mut bridge = bridge_with(BridgeConfig::default().with_set_id(12));
    run(&mut bridge, 1);

    assert_eq!(bridge.serial_port_mut().take_commands(), ["ka 12 ff"]);
}

#[test]
fn power_key_restores_the_remembered_source() {
    let mut bridge = bridge();
    let mut snapshot = bridge.status();
    snapshot.logical_source = Some(LogicalAddress::new(5));
    snapshot.physical_source = PhysicalAddress::new(0x1000);
    bridge.restore(&snapshot);

    bridge.remote_mut().press(keys::POWER);
    run(&mut bridge, 3);

    assert_eq!(bridge.tv_power(), TvPower::PoweringUp);
    assert_eq!(bridge.serial_port_mut().take_commands(), ["ka 01 01"]);

    bridge.serial_port_mut().feed("a 01 OK01x");
    run_until(&mut bridge, 50, |bridge| bridge.tv_power() == TvPower::On);
    run(&mut bridge, 10);

    assert_eq!(bridge.serial_port_mut().take_commands(), ["xb 01 90"]);
    assert!(
        bridge
            .cec()
            .sent
            .iter()
            .any(|frame| frame.as_slice() == [0x0f, 0x86, 0x10, 0x00]),
        "set stream path should name the remembered source"
    );
}

#[test]
fn unconfirmed_power_up_is_retried() {
    let mut bridge = bridge();
    bridge.remote_mut().press(keys::POWER);
    run(&mut bridge, 2);
    assert_eq!(bridge.serial_port_mut().take_commands(), ["ka 01 01"]);

    run(&mut bridge, 1005);
    assert_eq!(bridge.serial_port_mut().take_commands(), ["ka 01 ff"]);
    assert_eq!(bridge.tv_power(), TvPower::PowerUp);

    run(&mut bridge, 1005);
    assert_eq!(bridge.serial_port_mut().take_commands(), ["ka 01 01"]);
    assert_eq!(bridge.tv_power(), TvPower::PoweringUp);
}

#[test]
fn replies_never_undo_a_requested_transition() {
    let mut bridge = bridge();
    bridge.remote_mut().press(keys::POWER);
    run(&mut bridge, 3);
    assert_eq!(bridge.tv_power(), TvPower::PoweringUp);

    bridge.serial_port_mut().feed("a 01 NG00x");
    run(&mut bridge, 30);

    assert_eq!(bridge.tv_power(), TvPower::PoweringUp);
}

#[test]
fn power_key_turns_the_tv_off() {
    let mut bridge = powered_on();
    bridge.remote_mut().press(keys::POWER);
    run(&mut bridge, 5);

    assert_eq!(bridge.tv_power(), TvPower::PowerOff);
    assert!(
        bridge
            .cec()
            .sent
            .iter()
            .any(|frame| frame.as_slice() == [0x0f, 0x82, 0x00, 0x00]),
        "the TV should reclaim the active source"
    );

    run(&mut bridge, 1100);
    let commands = bridge.serial_port_mut().take_commands();
    assert!(commands.iter().any(|command| command == "ka 01 00"));
    assert_eq!(bridge.tv_power(), TvPower::PoweringOff);

    bridge.serial_port_mut().feed("a 01 NG00x");
    run_until(&mut bridge, 50, |bridge| bridge.tv_power() == TvPower::Off);
}

#[test]
fn tv_switched_off_externally_reclaims_active_source() {
    let mut bridge = powered_on();
    bridge.serial_port_mut().feed("a 01 NG00x");
    run_until(&mut bridge, 50, |bridge| bridge.tv_power() == TvPower::Off);
    run(&mut bridge, 10);

    assert!(
        bridge
            .cec()
            .sent
            .iter()
            .any(|frame| frame.as_slice() == [0x0f, 0x82, 0x00, 0x00])
    );
}

#[test]
fn stalled_reply_is_discarded() {
    let mut bridge = bridge();
    run(&mut bridge, 1);

    bridge.serial_port_mut().feed("a 01 O");
    run(&mut bridge, 150);
    assert_eq!(bridge.tv_power(), TvPower::Off);

    bridge.serial_port_mut().feed("a 01 OK01x");
    run_until(&mut bridge, 50, |bridge| bridge.tv_power() == TvPower::On);

    assert!(recorded(&bridge, TelemetryEventKind::SerialTimeout));
}

#[test]
fn image_view_on_requests_power_up() {
    let mut bridge = bridge();
    bridge.cec_mut().receive(&[0x40, 0x04]);
    run(&mut bridge, 3);

    assert!(bridge.tv_power() >= TvPower::PowerUp);
}
