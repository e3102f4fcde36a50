//! UART adapters for the bridge's serial link seams.
//!
//! The bridge loop is synchronous and must never wait, while embassy's
//! UART driver is async. The adapter bridges the two worlds with a byte
//! queue on each side: a spawned RX task moves received bytes into an
//! [`embassy_sync::channel::Channel`] that the loop drains with
//! `try_receive`, and writes are staged in a fixed buffer the owning
//! task flushes between ticks.

use defmt::warn;
use embassy_rp::uart::{Async, UartRx, UartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Receiver, Sender};
use heapless::Vec;
use pinbridge_core::{DeviceLink, SerialLink};

use crate::config::{RX_QUEUE_LEN, TX_BUFFER_LEN};

/// Inbound byte queue between an RX task and the bridge loop.
pub type RxQueue = embassy_sync::channel::Channel<CriticalSectionRawMutex, u8, RX_QUEUE_LEN>;

type RxReceiver = Receiver<'static, CriticalSectionRawMutex, u8, RX_QUEUE_LEN>;
type RxSender = Sender<'static, CriticalSectionRawMutex, u8, RX_QUEUE_LEN>;

/// A hardware UART exposed to the bridge as a non-blocking serial link.
pub struct UartLink {
    rx: RxReceiver,
    tx: UartTx<'static, Async>,
    staged: Vec<u8, TX_BUFFER_LEN>,
}

impl UartLink {
    /// Create a link over a receive queue and the UART transmit half.
    ///
    /// The matching [`uart_rx_task`] must be spawned with the queue's
    /// sender for `try_read` to ever yield data.
    pub fn new(rx: RxReceiver, tx: UartTx<'static, Async>) -> Self {
        Self {
            rx,
            tx,
            staged: Vec::new(),
        }
    }

    /// Transmit everything staged since the last flush.
    ///
    /// Called by the bridge task between ticks; the tick itself never
    /// awaits.
    pub async fn flush(&mut self) {
        if self.staged.is_empty() {
            return;
        }
        if let Err(e) = self.tx.write(&self.staged).await {
            warn!("uart tx error: {:?}", e);
        }
        self.staged.clear();
    }
}

impl SerialLink for UartLink {
    fn try_read(&mut self) -> Option<u8> {
        self.rx.try_receive().ok()
    }

    fn write_all(&mut self, bytes: &[u8]) {
        // Best effort: the protocol has no delivery guarantees, so a
        // full buffer drops the tail instead of blocking the loop
        if self.staged.extend_from_slice(bytes).is_err() {
            let free = self.staged.capacity() - self.staged.len();
            let _ = self.staged.extend_from_slice(&bytes[..free]);
            warn!("tx buffer full, dropped {} bytes", bytes.len() - free);
        }
    }
}

impl DeviceLink for UartLink {
    // `listen` keeps its no-op default: a hardware UART receiver is
    // always listening, unlike the bit-banged half-duplex transports the
    // seam is designed around.
}

/// Move received UART bytes into the bridge's inbound queue.
///
/// One instance runs per link. Receive errors are logged and the bytes
/// dropped; the bridge is best effort end to end.
#[embassy_executor::task(pool_size = 2)]
pub async fn uart_rx_task(mut rx: UartRx<'static, Async>, queue: RxSender) {
    let mut byte = [0u8; 1];
    loop {
        match rx.read(&mut byte).await {
            Ok(()) => queue.send(byte[0]).await,
            Err(e) => warn!("uart rx error: {:?}", e),
        }
    }
}
