//! Tick task for time-based updates
//!
//! Drives the controller at a fixed period. All tasks share the same
//! millisecond time base, counted from boot.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u32 = 100;

/// Signal to notify controller of tick
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Milliseconds since boot
///
/// Wraps after ~49 days; every consumer uses wrapping arithmetic.
pub fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));

    loop {
        ticker.next().await;
        TICK_SIGNAL.signal(now_ms());
    }
}
