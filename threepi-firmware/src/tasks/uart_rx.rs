//! UART receive task
//!
//! Copies received bytes into the receive ring. The ring is never cleared;
//! if the link falls a full ring behind, the oldest bytes are overwritten.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use threepi_hal::ReceiveRing;

use crate::channels::RX_RING_CAPACITY;

/// Bytes read from the driver per call
const RX_CHUNK_SIZE: usize = 16;

/// Serial RX task, the single producer of `ring`
#[embassy_executor::task]
pub async fn uart_rx_task(mut rx: BufferedUartRx, ring: &'static ReceiveRing<RX_RING_CAPACITY>) {
    info!("UART RX task started");

    let mut buf = [0u8; RX_CHUNK_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);
                ring.push_slice(&buf[..n]);
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
