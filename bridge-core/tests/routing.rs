mod support;

use bridge_core::cec::{LogicalAddress, PhysicalAddress};
use bridge_core::serial::TvPower;
use bridge_core::telemetry::TelemetryEventKind;

use support::{TestBridge, bridge, powered_on, run, run_until};

fn stream_paths(bridge: &TestBridge) -> Vec<Vec<u8>> {
    bridge
        .cec()
        .sent
        .iter()
        .filter(|frame| frame.get(1) == Some(&0x86))
        .cloned()
        .collect()
}

fn routing_applied(bridge: &TestBridge) -> usize {
    bridge
        .telemetry()
        .oldest_first()
        .filter(|record| matches!(record.event, TelemetryEventKind::RoutingApplied(_)))
        .count()
}

#[test]
fn routing_burst_settles_on_the_last_address() {
    let mut bridge = powered_on();
    bridge
        .cec_mut()
        .receive(&[0x5f, 0x80, 0x10, 0x00, 0x20, 0x00]);
    bridge
        .cec_mut()
        .receive(&[0x5f, 0x80, 0x20, 0x00, 0x30, 0x00]);
    bridge.cec_mut().receive(&[0x5f, 0x81, 0x40, 0x00]);

    run(&mut bridge, 100);
    assert_eq!(bridge.status().physical_source, PhysicalAddress::ROOT);

    run(&mut bridge, 150);
    let status = bridge.status();
    assert_eq!(status.physical_source, PhysicalAddress::new(0x4000));
    assert_eq!(status.logical_source, None);
    assert_eq!(stream_paths(&bridge), [vec![0x0f, 0x86, 0x40, 0x00]]);
    assert_eq!(routing_applied(&bridge), 1);
    assert_eq!(bridge.serial_port_mut().take_commands(), ["xb 01 93"]);
}

#[test]
fn late_routing_message_restarts_the_window() {
    let mut bridge = powered_on();
    bridge
        .cec_mut()
        .receive(&[0x5f, 0x80, 0x10, 0x00, 0x20, 0x00]);
    run(&mut bridge, 150);

    bridge.cec_mut().receive(&[0x5f, 0x81, 0x30, 0x00]);
    run(&mut bridge, 150);
    assert_eq!(routing_applied(&bridge), 0);

    run(&mut bridge, 100);
    assert_eq!(
        bridge.status().physical_source,
        PhysicalAddress::new(0x3000)
    );
    assert_eq!(routing_applied(&bridge), 1);
}

#[test]
fn routing_to_the_current_path_keeps_the_source() {
    let mut bridge = powered_on();
    let mut snapshot = bridge.status();
    snapshot.logical_source = Some(LogicalAddress::new(4));
    snapshot.physical_source = PhysicalAddress::new(0x2000);
    bridge.restore(&snapshot);

    bridge.cec_mut().receive(&[0x5f, 0x81, 0x20, 0x00]);
    run(&mut bridge, 300);

    assert_eq!(bridge.logical_source(), Some(LogicalAddress::new(4)));
    assert_eq!(routing_applied(&bridge), 0);
    assert!(stream_paths(&bridge).is_empty());
}

#[test]
fn active_source_switches_input_without_stream_path() {
    let mut bridge = bridge();
    bridge.cec_mut().receive(&[0x4f, 0x82, 0x10, 0x00]);
    run(&mut bridge, 3);

    assert_eq!(bridge.logical_source(), Some(LogicalAddress::new(4)));
    assert_eq!(
        bridge.status().physical_source,
        PhysicalAddress::new(0x1000)
    );
    assert_eq!(bridge.tv_power(), TvPower::PoweringUp);
    assert_eq!(bridge.serial_port_mut().take_commands(), ["ka 01 01"]);

    bridge.serial_port_mut().feed("a 01 OK01x");
    run_until(&mut bridge, 50, |bridge| bridge.tv_power() == TvPower::On);
    run(&mut bridge, 10);

    assert_eq!(bridge.serial_port_mut().take_commands(), ["xb 01 90"]);
    assert!(stream_paths(&bridge).is_empty());
}
