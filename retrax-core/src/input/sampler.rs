//! Debounced input sampler
//!
//! Called at a fixed period with the raw (logical, already
//! polarity-corrected) line levels. Produces:
//!
//! - `up_pressed` / `down_pressed` on the *release* edge of a button, only
//!   when the other button is not involved, and only if the shared
//!   debounce gate has been closed for at least `debounce_ms`
//! - `both_held` once both buttons have been asserted for
//!   `both_hold_samples` consecutive samples; the run only filters a
//!   single-sample glitch, hold-time windows belong to the state timers
//! - `emergency_asserted` as the raw level, without debounce

use super::frame::{InputFrame, OperatorInputs, PositionSensors};

/// Sampling period of the input task (ms)
pub const SAMPLE_INTERVAL_MS: u32 = 100;

/// Minimum interval between two accepted button events (ms)
pub const DEBOUNCE_MS: u32 = 100;

/// Consecutive samples with both buttons asserted before `both_held`
pub const BOTH_HOLD_SAMPLES: u16 = 2;

/// Hold time already spent when `both_held` is first reported (ms)
pub const BOTH_HOLD_LEAD_MS: u32 = (BOTH_HOLD_SAMPLES as u32 - 1) * SAMPLE_INTERVAL_MS;

/// Raw line levels for one sample (true = asserted)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawLines {
    pub up: bool,
    pub down: bool,
    pub emergency: bool,
    pub retracted: bool,
    pub extended: bool,
}

/// Sampler tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplerConfig {
    /// Shared debounce gate for both buttons (ms)
    pub debounce_ms: u32,
    /// Run length for the both-held detector (samples, not wall-clock)
    pub both_hold_samples: u16,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            both_hold_samples: BOTH_HOLD_SAMPLES,
        }
    }
}

/// Debounced button and sensor sampler
#[derive(Debug, Clone)]
pub struct InputSampler {
    config: SamplerConfig,
    /// Previous sample's button levels
    up_memo: bool,
    down_memo: bool,
    /// Timestamp of the last accepted event on either button
    last_accept_ms: u32,
    /// Consecutive samples with both buttons asserted
    both_run: u16,
    /// Both buttons were asserted together; releases are not presses
    /// until both lines are released again
    chord: bool,
}

impl InputSampler {
    /// Create a sampler
    ///
    /// The debounce gate starts closed at `now_ms`, so no event is
    /// accepted within the first debounce interval after boot.
    pub fn new(config: SamplerConfig, now_ms: u32) -> Self {
        Self {
            config,
            up_memo: false,
            down_memo: false,
            last_accept_ms: now_ms,
            both_run: 0,
            chord: false,
        }
    }

    /// Current length of the both-held run
    pub fn both_run(&self) -> u16 {
        self.both_run
    }

    /// Process one sample
    pub fn sample(&mut self, raw: RawLines, now_ms: u32) -> InputFrame {
        let up_released = self.up_memo && !raw.up;
        let down_released = self.down_memo && !raw.down;
        self.up_memo = raw.up;
        self.down_memo = raw.down;

        let both = raw.up && raw.down;
        if both {
            self.both_run = self.both_run.saturating_add(1);
            self.chord = true;
        } else {
            self.both_run = 0;
        }
        let both_held = both && self.both_run >= self.config.both_hold_samples;

        let mut up_pressed = false;
        let mut down_pressed = false;

        if self.chord {
            if !raw.up && !raw.down {
                self.chord = false;
            }
        } else {
            let up_edge = up_released && !raw.down;
            let down_edge = down_released && !raw.up;

            // Simultaneous release of both is ambiguous and ignored
            if up_edge != down_edge && self.gate_open(now_ms) {
                self.last_accept_ms = now_ms;
                up_pressed = up_edge;
                down_pressed = down_edge;
            }
        }

        InputFrame {
            inputs: OperatorInputs {
                up_pressed,
                down_pressed,
                emergency_asserted: raw.emergency,
                both_held,
            },
            sensors: PositionSensors {
                retracted_active: raw.retracted,
                extended_active: raw.extended,
            },
        }
    }

    fn gate_open(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_accept_ms) >= self.config.debounce_ms
    }
}
