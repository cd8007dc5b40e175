//! Busy-wait calibration.
//!
//! Both eye LEDs toggle every 10 000 ticks (one second when calibrated) and
//! PB4 toggles every tick, so a full PB4 period is 0.2 ms. Measure either one
//! with a stopwatch or a logic analyzer, then rebuild with
//! `BM_LOOPS_PER_TICK = current * expected / measured`, where `current` is
//! `config::LOOPS_PER_TICK` (197 at 8 MHz unless overridden).
//!
//! `cargo +nightly build --release --example calibrate -Z build-std=core --target avr-none`

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    use brain_machine::config::TICKS_PER_SECOND;
    use brain_machine::hal::Pins;
    use brain_machine::{BusyWait, TickDelay};

    let dp = avr_device::attiny85::Peripherals::take().unwrap();
    let pins = Pins::new(dp.PORTB);
    let mut left = pins.pb3.into_output();
    let mut right = pins.pb2.into_output();
    let mut tick_pin = pins.pb4.into_output();
    let mut delay = BusyWait::new();

    loop {
        left.toggle();
        right.toggle();
        for _ in 0..TICKS_PER_SECOND {
            tick_pin.toggle();
            delay.delay_ticks(1);
        }
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {}
