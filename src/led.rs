use embedded_hal::digital::v2::OutputPin;

use crate::delay::TickDelay;
use crate::sequence::BandTiming;

/// The two eye LEDs, blinked together at the beat frequency
pub struct BeatLeds<L, R> {
    left: L,
    right: R,
}

impl<L, R, E> BeatLeds<L, R>
where
    L: OutputPin<Error = E>,
    R: OutputPin<Error = E>,
{
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    /// Blinks both LEDs with `cadence` for at most `duration` ticks and
    /// returns the number of whole on/off cycles run.
    ///
    /// Only whole cycles are played, so a duration that is not a multiple
    /// of the period comes up short by the remainder. This call is also the
    /// segment's delay: nothing else blocks while a band plays.
    pub fn blink<D: TickDelay>(
        &mut self,
        delay: &mut D,
        duration: u32,
        cadence: BandTiming,
    ) -> Result<u32, E> {
        let cycles = duration / cadence.period();
        for _ in 0..cycles {
            self.on()?;
            delay.delay_ticks(cadence.on);
            self.off()?;
            delay.delay_ticks(cadence.off);
        }
        Ok(cycles)
    }

    pub fn on(&mut self) -> Result<(), E> {
        self.left.set_high()?;
        self.right.set_high()
    }

    pub fn off(&mut self) -> Result<(), E> {
        self.left.set_low()?;
        self.right.set_low()
    }
}

#[cfg(test)]
impl<L, R> BeatLeds<L, R> {
    pub(crate) fn pins(&self) -> (&L, &R) {
        (&self.left, &self.right)
    }

    pub(crate) fn release(self) -> (L, R) {
        (self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingPin, RecordingDelay};
    use embedded_hal_mock::pin::{Mock as PinMock, State, Transaction};

    const BETA: BandTiming = BandTiming { divisor: 71, on: 300, off: 299 };

    fn pulses(cycles: usize) -> Vec<Transaction> {
        let mut expected = Vec::new();
        for _ in 0..cycles {
            expected.push(Transaction::set(State::High));
            expected.push(Transaction::set(State::Low));
        }
        expected
    }

    #[test]
    fn blinks_whole_cycles_only() {
        let left = PinMock::new(&pulses(2));
        let right = PinMock::new(&pulses(2));
        let mut leds = BeatLeds::new(left, right);
        let mut delay = RecordingDelay::default();

        let cycles = leds.blink(&mut delay, 1300, BETA).unwrap();

        assert_eq!(cycles, 2);
        assert_eq!(delay.calls(), &[300, 299, 300, 299]);
        assert_eq!(delay.total(), 1198);

        let (mut left, mut right) = leds.release();
        left.done();
        right.done();
    }

    #[test]
    fn duration_shorter_than_period_does_nothing() {
        let left = PinMock::new(&[]);
        let right = PinMock::new(&[]);
        let mut leds = BeatLeds::new(left, right);
        let mut delay = RecordingDelay::default();

        assert_eq!(leds.blink(&mut delay, 598, BETA).unwrap(), 0);
        assert_eq!(leds.blink(&mut delay, 0, BETA).unwrap(), 0);
        assert_eq!(delay.total(), 0);

        let (mut left, mut right) = leds.release();
        left.done();
        right.done();
    }

    #[test]
    fn exact_multiple_fills_duration() {
        let mut leds = BeatLeds::new(CountingPin::new(), CountingPin::new());
        let mut delay = RecordingDelay::default();

        assert_eq!(leds.blink(&mut delay, 599 * 3, BETA).unwrap(), 3);
        assert_eq!(delay.total(), 1797);
    }

    #[test]
    fn first_table_entry_truncates_to_1001_cycles() {
        let mut leds = BeatLeds::new(CountingPin::new(), CountingPin::new());
        let mut delay = RecordingDelay::default();

        let cycles = leds.blink(&mut delay, 600_000, BETA).unwrap();

        assert_eq!(cycles, 1001);
        assert_eq!(delay.total(), 599_599);
        let (left, right) = leds.release();
        assert_eq!(left.highs(), 1001);
        assert_eq!(right.lows(), 1001);
        assert!(!left.is_high());
    }

    #[test]
    fn pin_error_stops_blinking() {
        let mut leds = BeatLeds::new(CountingPin::new(), CountingPin::failing_on(3));
        let mut delay = RecordingDelay::default();

        assert!(leds.blink(&mut delay, 10_000, BETA).is_err());
        // on, off, then the third write (second on) fails
        assert_eq!(delay.calls(), &[300, 299]);
    }
}
