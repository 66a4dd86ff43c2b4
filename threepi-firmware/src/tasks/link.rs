//! Link task
//!
//! Runs the link main loop. Each iteration drains the receive ring, checks
//! the argument timeout and the button, then yields so the RX and tone
//! tasks can run. Response sends and the button release wait block the
//! executor while they last.

use defmt::*;
use embassy_futures::yield_now;
use embassy_time::Instant;

use threepi_core::{LinkError, LinkEvent};
use threepi_protocol::DRIVE_ARGUMENT_COUNT;

use crate::board::BoardLink;

#[embassy_executor::task]
pub async fn link_task(mut link: BoardLink) {
    info!("Link task started");
    link.start();

    loop {
        let now_ms = Instant::now().as_millis();
        link.poll(now_ms, &mut log_event);
        yield_now().await;
    }
}

fn log_event(result: Result<LinkEvent, LinkError>) {
    match result {
        Ok(LinkEvent::Dispatched(command)) if command.takes_arguments() => debug!(
            "Command {:?}, waiting for {} argument bytes",
            command, DRIVE_ARGUMENT_COUNT
        ),
        Ok(LinkEvent::Dispatched(command)) => debug!("Command {:?}", command),
        Ok(LinkEvent::ArgumentStored { slot, value }) => {
            trace!("Drive argument {} = {}", slot, value)
        }
        Ok(LinkEvent::Drove(arguments)) => info!(
            "Drive left={} right={}",
            arguments.left_speed(),
            arguments.right_speed()
        ),
        Ok(LinkEvent::CollectorReset) => warn!("Argument collector inconsistent, reset to idle"),
        Ok(LinkEvent::ArgumentTimeout) => warn!("Drive arguments timed out"),
        Ok(LinkEvent::Greeted) => info!("Button pressed, greeting sent"),
        Err(e) => error!("Link error: {:?}", e),
    }
}
