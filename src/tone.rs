//! Square-wave tone generation for the two ears.
//!
//! Each channel is an 8-bit timer in clear-on-compare mode toggling its
//! output pin on every match, so the pin frequency is
//! `F_CPU / (2 * prescaler * (1 + divisor))`. The base channel plays a fixed
//! ≈200.321 Hz in the left ear; the offset channel is retuned per band and the
//! difference between the two is the binaural beat.

use crate::config::{BASE_DIVISOR, CPU_FREQ_HZ, TONE_PRESCALER};

/// One hardware tone generator
pub trait ToneChannel {
    /// Clear-on-compare mode, toggle the output pin on match, start the
    /// prescaled clock.
    fn arm(&mut self);

    /// Write the compare value. Takes effect on the next match.
    fn set_divisor(&mut self, divisor: u8);

    /// Stop the timer clock. The output pin keeps its last level.
    fn stop(&mut self);
}

/// Output frequency of a channel in mHz
pub const fn frequency_millihertz(divisor: u8) -> u32 {
    let half_periods = 2 * TONE_PRESCALER as u64 * (1 + divisor as u64);
    (CPU_FREQ_HZ as u64 * 1000 / half_periods) as u32
}

/// Beat frequency against the base tone in mHz
pub const fn beat_millihertz(offset_divisor: u8) -> u32 {
    frequency_millihertz(offset_divisor).abs_diff(frequency_millihertz(BASE_DIVISOR))
}

/// Base and offset channels driven as a pair
pub struct Binaural<B, O> {
    base: B,
    offset: O,
}

impl<B: ToneChannel, O: ToneChannel> Binaural<B, O> {
    pub fn new(base: B, offset: O) -> Self {
        Self { base, offset }
    }

    /// Start the base tone and arm the offset channel. The offset channel
    /// is not tuned until the first band.
    pub fn start(&mut self) {
        self.base.arm();
        self.base.set_divisor(BASE_DIVISOR);
        self.offset.arm();
    }

    pub fn tune(&mut self, divisor: u8) {
        self.offset.set_divisor(divisor);
    }

    pub fn silence(&mut self) {
        self.base.stop();
        self.offset.stop();
    }

    #[cfg(test)]
    pub(crate) fn channels(&self) -> (&B, &O) {
        (&self.base, &self.offset)
    }
}
