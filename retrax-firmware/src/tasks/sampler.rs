//! Input sampling task
//!
//! Reads the two buttons, the emergency line and the two position
//! sensors at a fixed period, debounces them and queues one frame per
//! sample for the controller. A frame that does not fit the channel is
//! merged into the next one so its button edges and emergency level
//! still reach the controller.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Ticker};

use retrax_core::input::sampler::SAMPLE_INTERVAL_MS;
use retrax_core::input::{InputFrame, InputSampler, RawLines, SamplerConfig};

use super::tick::now_ms;
use crate::board::InputLevels;
use crate::channels::INPUT_CHANNEL;

/// Input pins, in board order
pub struct InputLines {
    pub up: Input<'static>,
    pub down: Input<'static>,
    pub emergency: Input<'static>,
    pub retracted: Input<'static>,
    pub extended: Input<'static>,
}

impl InputLines {
    /// Read all lines as logical (asserted) levels
    fn read(&self, levels: &InputLevels) -> RawLines {
        RawLines {
            up: self.up.is_high() == levels.up_high,
            down: self.down.is_high() == levels.down_high,
            emergency: self.emergency.is_high() == levels.emergency_high,
            retracted: self.retracted.is_high() == levels.retracted_high,
            extended: self.extended.is_high() == levels.extended_high,
        }
    }
}

/// Both buttons held from power-up for this long request a counter reset
pub const FACTORY_RESET_HOLD_MS: u64 = 3_000;

/// Boot gesture: both buttons asserted at power-up and held
///
/// Returns false as soon as either button is released.
pub async fn factory_reset_held(lines: &InputLines, levels: &InputLevels) -> bool {
    let start = Instant::now();
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_INTERVAL_MS as u64));

    loop {
        let raw = lines.read(levels);
        if !(raw.up && raw.down) {
            return false;
        }
        if start.elapsed() >= Duration::from_millis(FACTORY_RESET_HOLD_MS) {
            return true;
        }
        ticker.next().await;
    }
}

/// Sampler task
#[embassy_executor::task]
pub async fn sampler_task(lines: InputLines, levels: InputLevels) {
    info!("Sampler task started");

    let mut sampler = InputSampler::new(SamplerConfig::default(), now_ms());
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_INTERVAL_MS as u64));
    let mut last_raw = RawLines::default();
    let mut undelivered: Option<InputFrame> = None;

    loop {
        ticker.next().await;

        let raw = lines.read(&levels);
        if raw != last_raw {
            trace!("Lines: {:?}", raw);
            last_raw = raw;
        }

        let mut frame = sampler.sample(raw, now_ms());
        if frame.inputs.up_pressed {
            debug!("Up pressed");
        }
        if frame.inputs.down_pressed {
            debug!("Down pressed");
        }

        if let Some(dropped) = undelivered.take() {
            frame.carry(&dropped);
        }
        if INPUT_CHANNEL.try_send(frame).is_err() {
            warn!("Input channel full, frame held for next sample");
            undelivered = Some(frame);
        }
    }
}
