/// Flag kept across a warm reset but not across power loss
pub trait PowerFlag {
    fn is_set(&self) -> bool;
    fn clear(&mut self);
}

/// Sleep control and pin release for the final shutdown
pub trait PowerControl {
    /// Select power-down mode and set the sleep enable bit.
    fn prepare_power_down(&mut self);

    /// Drive every port output low and turn all pins into inputs.
    fn release_pins(&mut self);

    /// Enter the selected sleep mode. Only a reset wakes the chip again, but
    /// callers must not rely on this never returning.
    fn sleep(&mut self);
}

/// Sleep mode select values for MCUCR SM1:0
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SleepMode {
    Idle = 0,
    AdcNoiseReduction = 1,
    PowerDown = 2,
}

impl SleepMode {
    const SHIFT: u8 = 3;
    pub const MASK: u8 = 0b0001_1000;
    /// Sleep enable
    pub const SE: u8 = 0b0010_0000;

    /// MCUCR bits for this mode
    pub const fn bits(self) -> u8 {
        (self as u8) << Self::SHIFT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sleep_mode_bits() {
        assert_eq!(SleepMode::Idle.bits(), 0);
        assert_eq!(SleepMode::AdcNoiseReduction.bits(), 0b0000_1000);
        assert_eq!(SleepMode::PowerDown.bits(), 0b0001_0000);
        assert_eq!(SleepMode::PowerDown.bits() & !SleepMode::MASK, 0);
    }
}
