use embassy_futures::join::join;
use embassy_stm32 as hal;
use embassy_stm32::Peri;
use embassy_stm32::usart::{BufferedUart, Config as UartConfig, DataBits, Parity, StopBits};
use embassy_time::{Duration, Timer};
use embedded_io_async::{Read, Write};
use static_cell::StaticCell;

use crate::mailbox::{SERIAL_QUEUE_DEPTH, SerialMailbox};

const TV_UART_BAUD: u32 = 9_600;
const UART_BUFFER_SIZE: usize = SERIAL_QUEUE_DEPTH;
const IDLE_POLL: Duration = Duration::from_millis(1);
const ERROR_BACKOFF: Duration = Duration::from_millis(5);

static UART_TX_BUFFER: StaticCell<[u8; UART_BUFFER_SIZE]> = StaticCell::new();
static UART_RX_BUFFER: StaticCell<[u8; UART_BUFFER_SIZE]> = StaticCell::new();

embassy_stm32::bind_interrupts!(struct UartIrqs {
    USART3_4_5_6_LPUART1 => embassy_stm32::usart::BufferedInterruptHandler<hal::peripherals::USART5>;
});

#[embassy_executor::task]
pub async fn run(
    mailbox: &'static SerialMailbox,
    usart: Peri<'static, hal::peripherals::USART5>,
    tx_pin: Peri<'static, hal::peripherals::PB0>,
    rx_pin: Peri<'static, hal::peripherals::PB1>,
) -> ! {
    let mut config = UartConfig::default();
    config.baudrate = TV_UART_BAUD;
    config.data_bits = DataBits::DataBits8;
    config.stop_bits = StopBits::STOP1;
    config.parity = Parity::ParityNone;

    let uart = match BufferedUart::new(
        usart,
        rx_pin,
        tx_pin,
        UART_TX_BUFFER.init([0; UART_BUFFER_SIZE]),
        UART_RX_BUFFER.init([0; UART_BUFFER_SIZE]),
        UartIrqs,
        config,
    ) {
        Ok(uart) => uart,
        Err(_) => defmt::panic!("serial: failed to initialize TV UART"),
    };

    let (mut uart_tx, mut uart_rx) = uart.split();

    let to_tv = async move {
        let mut egress = [0u8; SERIAL_QUEUE_DEPTH];
        loop {
            let count = mailbox.take_outbound(&mut egress);
            if count == 0 {
                Timer::after(IDLE_POLL).await;
                continue;
            }

            if uart_tx.write_all(&egress[..count]).await.is_err() {
                defmt::warn!("serial: UART write error");
                Timer::after(ERROR_BACKOFF).await;
            } else if uart_tx.flush().await.is_err() {
                defmt::warn!("serial: UART flush error");
                Timer::after(ERROR_BACKOFF).await;
            }
            mailbox.drained();
        }
    };

    let from_tv = async move {
        let mut ingress = [0u8; SERIAL_QUEUE_DEPTH];
        loop {
            match uart_rx.read(&mut ingress).await {
                Ok(count) if count > 0 => {
                    let accepted = mailbox.deliver(&ingress[..count]);
                    if accepted < count {
                        defmt::warn!("serial: dropped {} reply bytes (overflow)", count - accepted);
                    }
                }
                Ok(_) => {}
                Err(_) => {
                    defmt::warn!("serial: UART read error");
                    Timer::after(ERROR_BACKOFF).await;
                }
            }
        }
    };

    join(to_tv, from_tv).await;
    loop {
        core::future::pending::<()>().await;
    }
}
