use bridge_core::transport::{RawIrCode, RemoteEvent};
use embassy_futures::select::{Either, select};
use embassy_stm32::exti::ExtiInput;
use embassy_time::{Duration, Instant, Timer};
use infrared::receiver;

use crate::mailbox::RemoteChannel;

/// Edge timestamps are fed to the decoder in microseconds.
const IR_RESOLUTION_HZ: u32 = 1_000_000;

/// Silence after which a held button counts as released.
const RELEASE_TIMEOUT: Duration = Duration::from_millis(270);

#[embassy_executor::task]
pub async fn run(events: &'static RemoteChannel, mut input: ExtiInput<'static>) -> ! {
    let mut decoder = receiver::Builder::default()
        .nec()
        .frequency(IR_RESOLUTION_HZ)
        .build();

    let mut last_edge = Instant::now();
    let mut held = false;

    loop {
        match select(input.wait_for_any_edge(), Timer::after(RELEASE_TIMEOUT)).await {
            Either::First(()) => {
                let now = Instant::now();
                let dt = u32::try_from(now.duration_since(last_edge).as_micros())
                    .unwrap_or(u32::MAX);
                last_edge = now;

                // The receiver output is active low.
                match decoder.event(dt, input.is_low()) {
                    Ok(Some(command)) if command.repeat => {}
                    Ok(Some(command)) => {
                        held = true;
                        publish(events, RemoteEvent::Press(RawIrCode::nec(command.cmd)));
                    }
                    Ok(None) => {}
                    Err(_) => defmt::debug!("ir: decoding error"),
                }
            }
            Either::Second(()) => {
                if held {
                    held = false;
                    publish(events, RemoteEvent::Release);
                }
            }
        }
    }
}

fn publish(events: &RemoteChannel, event: RemoteEvent) {
    if events.try_send(event).is_err() {
        defmt::warn!("ir: event queue full, dropping event");
    }
}
