//! Settings records in RP2040 flash
//!
//! The four lift settings (two timing values, two move counters) live as
//! sequential-storage map items in a 64KB partition at the top of the
//! 2MB flash. An item is the one-byte `StorageKey` followed by the
//! postcard payload of a single scalar, so a record never exceeds a few
//! bytes and the scratch buffer stays small.

use core::ops::Range;

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use embedded_storage_async::nor_flash::NorFlash;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

pub use retrax_hal::flash::{FlashError, StorageKey};

/// Total flash on the controller board
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Settings partition, the last 16 sectors
pub const SETTINGS_RANGE: Range<u32> = (FLASH_SIZE as u32 - SETTINGS_SIZE)..FLASH_SIZE as u32;

const SETTINGS_SIZE: u32 = 64 * 1024;

/// Scratch space for one map item: key byte, length prefix and payload
const ITEM_SCRATCH: usize = 32;

/// Settings storage on the on-board flash chip
pub struct Rp2040FlashStorage<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> Rp2040FlashStorage<'d> {
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }
}

fn settings_error<E>(e: sequential_storage::Error<E>) -> FlashError {
    match e {
        sequential_storage::Error::Corrupted { .. } => FlashError::Corrupted,
        sequential_storage::Error::FullStorage => FlashError::Full,
        _ => FlashError::Storage,
    }
}

impl<'d> retrax_hal::FlashStorage for Rp2040FlashStorage<'d> {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let mut scratch = [0u8; ITEM_SCRATCH];
        let payload = map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut scratch,
            &key,
        )
        .await
        .map_err(settings_error)?
        .ok_or(FlashError::NotFound)?;

        let dest = buffer
            .get_mut(..payload.len())
            .ok_or(FlashError::BufferTooSmall)?;
        dest.copy_from_slice(payload);
        Ok(payload.len())
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        let mut scratch = [0u8; ITEM_SCRATCH];
        map::store_item(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut scratch,
            &key,
            &data,
        )
        .await
        .map_err(settings_error)
    }

    async fn erase_all(&mut self) -> Result<(), FlashError> {
        self.flash
            .erase(SETTINGS_RANGE.start, SETTINGS_RANGE.end)
            .await
            .map_err(|_| FlashError::Flash)
    }
}
