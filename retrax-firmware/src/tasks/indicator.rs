//! Button LED task
//!
//! Renders the latest indication on the button LEDs. Blink patterns
//! are timed here, independent of the controller tick.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Ticker};

use retrax_drivers::indicator::LedPair;

use super::tick::now_ms;
use crate::channels::INDICATION;

/// LED refresh interval (half the fastest blink period)
const REFRESH_INTERVAL_MS: u64 = 50;

/// Indicator task
#[embassy_executor::task]
pub async fn indicator_task(mut leds: LedPair<Output<'static>, Output<'static>>) {
    info!("Indicator task started");

    let mut ticker = Ticker::every(Duration::from_millis(REFRESH_INTERVAL_MS));

    loop {
        ticker.next().await;

        let now = now_ms();
        if let Some(indication) = INDICATION.try_take() {
            if indication != leds.indication() {
                debug!("Indication: {:?}", indication);
            }
            leds.set(indication, now);
        }
        leds.refresh(now);
    }
}
