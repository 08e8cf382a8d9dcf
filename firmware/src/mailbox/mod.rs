//! Mailboxes between the peripheral tasks and the tick loop.
//!
//! Producers (the UART task, the IR task and the CEC line driver) and the
//! coordinator never share anything but these statics. Every access is a
//! short critical section over a small ring, so the tick loop never waits on
//! a peripheral.

use core::cell::RefCell;

use bridge_core::cec::{LogicalAddress, OutboundFrame, RawFrame};
use bridge_core::transport::{
    CecTransport, RemoteEvent, RemoteReceiver, SerialPort, TransmitState,
};
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use heapless::Deque;
use portable_atomic::{AtomicBool, Ordering};

#[cfg(not(target_os = "none"))]
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
#[cfg(target_os = "none")]
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;

#[cfg(target_os = "none")]
type MailboxMutex = ThreadModeRawMutex;
#[cfg(not(target_os = "none"))]
type MailboxMutex = NoopRawMutex;

/// Received CEC frames waiting for the tick loop.
pub const CEC_RX_DEPTH: usize = 4;

/// Bytes buffered in each serial direction.
pub const SERIAL_QUEUE_DEPTH: usize = 32;

/// Decoder events waiting for the tick loop.
pub const REMOTE_QUEUE_DEPTH: usize = 4;

struct CecSlots {
    received: Deque<RawFrame, CEC_RX_DEPTH>,
    outbound: Option<OutboundFrame>,
    state: TransmitState,
}

/// Hand-off point for the CEC line driver.
///
/// The driver delivers received buffers with [`CecMailbox::deliver`], picks
/// up staged frames with [`CecMailbox::take_outbound`] and reports the
/// acknowledgement with [`CecMailbox::complete`].
pub struct CecMailbox {
    slots: Mutex<MailboxMutex, RefCell<CecSlots>>,
    own_address: LogicalAddress,
}

impl CecMailbox {
    #[must_use]
    pub const fn new(own_address: LogicalAddress) -> Self {
        Self {
            slots: Mutex::new(RefCell::new(CecSlots {
                received: Deque::new(),
                outbound: None,
                state: TransmitState::Idle,
            })),
            own_address,
        }
    }

    /// Queues a received buffer. Returns `false` when the queue is full.
    pub fn deliver(&self, frame: RawFrame) -> bool {
        self.slots
            .lock(|slots| slots.borrow_mut().received.push_back(frame).is_ok())
    }

    /// Takes the frame staged by the coordinator, if any.
    pub fn take_outbound(&self) -> Option<OutboundFrame> {
        self.slots.lock(|slots| slots.borrow_mut().outbound.take())
    }

    /// Reports whether the staged frame was acknowledged.
    pub fn complete(&self, acknowledged: bool) {
        self.slots.lock(|slots| {
            slots.borrow_mut().state = if acknowledged {
                TransmitState::Done
            } else {
                TransmitState::Failed
            };
        });
    }
}

impl CecTransport for &CecMailbox {
    fn poll_receive(&mut self) -> Option<RawFrame> {
        self.slots.lock(|slots| slots.borrow_mut().received.pop_front())
    }

    fn transmit_state(&self) -> TransmitState {
        self.slots.lock(|slots| slots.borrow().state)
    }

    fn start_transmit(&mut self, frame: &OutboundFrame) {
        self.slots.lock(|slots| {
            let mut slots = slots.borrow_mut();
            slots.outbound = Some(*frame);
            slots.state = TransmitState::Pending;
        });
    }

    fn address_match(&self, address: LogicalAddress) -> bool {
        address == self.own_address
    }
}

/// Byte queues between the coordinator and the UART task.
pub struct SerialMailbox {
    outbound: Mutex<MailboxMutex, RefCell<Deque<u8, SERIAL_QUEUE_DEPTH>>>,
    inbound: Mutex<MailboxMutex, RefCell<Deque<u8, SERIAL_QUEUE_DEPTH>>>,
    draining: AtomicBool,
}

impl SerialMailbox {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            outbound: Mutex::new(RefCell::new(Deque::new())),
            inbound: Mutex::new(RefCell::new(Deque::new())),
            draining: AtomicBool::new(false),
        }
    }

    /// Moves queued outbound bytes into `buffer`, returning how many were
    /// copied. The link counts as busy until [`SerialMailbox::drained`].
    pub fn take_outbound(&self, buffer: &mut [u8]) -> usize {
        self.outbound.lock(|queue| {
            let mut queue = queue.borrow_mut();
            let mut count = 0;
            for slot in buffer.iter_mut() {
                let Some(byte) = queue.pop_front() else {
                    break;
                };
                *slot = byte;
                count += 1;
            }
            if count > 0 {
                self.draining.store(true, Ordering::Release);
            }
            count
        })
    }

    /// Marks the bytes last taken as fully shifted out.
    pub fn drained(&self) {
        self.draining.store(false, Ordering::Release);
    }

    /// Queues bytes read from the UART. Bytes past the queue depth are lost.
    pub fn deliver(&self, bytes: &[u8]) -> usize {
        self.inbound.lock(|queue| {
            let mut queue = queue.borrow_mut();
            bytes
                .iter()
                .take_while(|&&byte| queue.push_back(byte).is_ok())
                .count()
        })
    }
}

impl Default for SerialMailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialPort for &SerialMailbox {
    fn put(&mut self, byte: u8) {
        // Only overflows while the UART is stalled.
        let _ = self
            .outbound
            .lock(|queue| queue.borrow_mut().push_back(byte));
    }

    fn write_empty(&self) -> bool {
        !self.draining.load(Ordering::Acquire)
            && self.outbound.lock(|queue| queue.borrow().is_empty())
    }

    fn take_received(&mut self) -> Option<u8> {
        self.inbound.lock(|queue| queue.borrow_mut().pop_front())
    }
}

/// Decoder events from the IR task.
pub type RemoteChannel = Channel<MailboxMutex, RemoteEvent, REMOTE_QUEUE_DEPTH>;

/// Adapts the IR event channel to the coordinator.
pub struct RemoteMailbox<'a> {
    channel: &'a RemoteChannel,
}

impl<'a> RemoteMailbox<'a> {
    #[must_use]
    pub const fn new(channel: &'a RemoteChannel) -> Self {
        Self { channel }
    }
}

impl RemoteReceiver for RemoteMailbox<'_> {
    fn poll_event(&mut self) -> Option<RemoteEvent> {
        self.channel.try_receive().ok()
    }
}
