use cortex_m::interrupt;
use cortex_m::register::primask;
use critical_section::{self, RawRestoreState};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_stm32 as hal;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Pull;

use bridge_core::cec::LogicalAddress;
use bridge_core::config::BridgeConfig;

use crate::mailbox::{CecMailbox, RemoteChannel, SerialMailbox};

mod ir_task;
mod serial_task;
mod tick_task;

critical_section::set_impl!(InterruptCriticalSection);

struct InterruptCriticalSection;

unsafe impl critical_section::Impl for InterruptCriticalSection {
    unsafe fn acquire() -> RawRestoreState {
        let primask = primask::read();
        interrupt::disable();
        primask.is_active()
    }

    unsafe fn release(restore_state: RawRestoreState) {
        if restore_state {
            unsafe {
                interrupt::enable();
            }
        }
    }
}

pub(super) static CEC_MAILBOX: CecMailbox = CecMailbox::new(LogicalAddress::TV);
pub(super) static SERIAL_MAILBOX: SerialMailbox = SerialMailbox::new();
pub(super) static REMOTE_EVENTS: RemoteChannel = RemoteChannel::new();

const BRIDGE_CONFIG: BridgeConfig = BridgeConfig::new();

#[embassy_executor::main]
pub async fn main(spawner: Spawner) {
    if let Err(error) = BRIDGE_CONFIG.validate() {
        defmt::panic!("invalid bridge configuration: {}", defmt::Display2Format(&error));
    }

    let hal::Peripherals {
        PB0,
        PB1,
        PA8,
        EXTI8,
        USART5,
        ..
    } = hal::init(hal::Config::default());

    let ir_input = ExtiInput::new(PA8, EXTI8, Pull::Up);

    spawner
        .spawn(serial_task::run(&SERIAL_MAILBOX, USART5, PB0, PB1))
        .expect("failed to spawn serial task");

    spawner
        .spawn(ir_task::run(&REMOTE_EVENTS, ir_input))
        .expect("failed to spawn IR task");

    spawner
        .spawn(tick_task::run(
            BRIDGE_CONFIG,
            &CEC_MAILBOX,
            &SERIAL_MAILBOX,
            &REMOTE_EVENTS,
        ))
        .expect("failed to spawn tick task");

    core::future::pending::<()>().await;
}
