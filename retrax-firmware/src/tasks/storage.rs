//! Settings writer task
//!
//! Writes changed store entries back to flash in the background so the
//! controller tick never waits on a flash erase.

use defmt::*;
use embassy_time::Timer;

use retrax_hal_rp2040::flash::Rp2040FlashStorage;

use crate::channels::PERSIST_REQUEST;
use crate::config::{SettingsPersistence, SharedStore};

/// Quiet period before writing, coalesces back-to-back changes
const SETTLE_MS: u64 = 500;

/// Delay before retrying a failed write
const RETRY_MS: u64 = 5_000;

/// Storage writer task
#[embassy_executor::task]
pub async fn storage_task(
    mut persistence: SettingsPersistence<Rp2040FlashStorage<'static>>,
    store: SharedStore,
) {
    info!("Storage task started");

    loop {
        PERSIST_REQUEST.wait().await;
        Timer::after_millis(SETTLE_MS).await;

        // Later changes during the write raise the signal again
        let entries = store.persisted_entries();
        match persistence.save(&entries).await {
            Ok(0) => {}
            Ok(n) => debug!("Saved {} settings to flash", n),
            Err(e) => {
                warn!("Failed to save settings: {:?}", e);
                Timer::after_millis(RETRY_MS).await;
                PERSIST_REQUEST.signal(());
            }
        }
    }
}
