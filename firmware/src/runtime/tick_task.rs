use bridge_core::config::{BridgeConfig, Ticks};
use bridge_core::{Bridge, RecoveryRequested};
use cortex_m::peripheral::SCB;
use embassy_time::{Duration, Ticker};

use crate::mailbox::{CecMailbox, RemoteChannel, RemoteMailbox, SerialMailbox};
use crate::telemetry::TelemetryDrain;

const TICK: Ticks = Ticks::new(1);

#[embassy_executor::task]
pub async fn run(
    config: BridgeConfig,
    cec: &'static CecMailbox,
    serial: &'static SerialMailbox,
    remote: &'static RemoteChannel,
) -> ! {
    let period = Duration::from_micros(
        u64::try_from(config.tick.as_micros()).unwrap_or(u64::MAX),
    );
    let mut bridge = Bridge::new(config, cec, serial, RemoteMailbox::new(remote));
    let mut drain = TelemetryDrain::new();
    let mut ticker = Ticker::every(period);

    loop {
        ticker.next().await;

        let outcome = bridge.periodic(TICK);
        drain.forward(bridge.telemetry());

        if let Err(RecoveryRequested { initiator }) = outcome {
            defmt::warn!("tick: recovery requested by {}, resetting", initiator.get());
            SCB::sys_reset();
        }
    }
}
