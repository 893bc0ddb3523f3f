//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use retrax_core::indication::Indication;
use retrax_core::input::InputFrame;
use retrax_core::StatusSnapshot;

/// Channel capacity for sampled input frames
///
/// Sampler and controller run at the same period; the headroom covers a
/// controller tick delayed by slow actuator calls.
const INPUT_CHANNEL_SIZE: usize = 16;

/// Sampled input frames (sampler -> controller)
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputFrame, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Indication to render (controller -> indicator)
pub static INDICATION: Signal<CriticalSectionRawMutex, Indication> = Signal::new();

/// Latest status snapshot (controller -> status consumers)
pub static STATUS: Signal<CriticalSectionRawMutex, StatusSnapshot> = Signal::new();

/// The RAM store has unsaved changes (controller -> storage writer)
pub static PERSIST_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Factory reset of the move counters (boot gesture -> controller)
pub static FACTORY_RESET: Signal<CriticalSectionRawMutex, ()> = Signal::new();
