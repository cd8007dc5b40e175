#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    let dp = avr_device::attiny85::Peripherals::take().unwrap();

    // Boot check, one session, then power-down sleep until the next reset
    brain_machine::board::assemble(dp).run()
}

// The firmware only runs on the ATtiny; host builds exist for the unit tests.
#[cfg(not(target_arch = "avr"))]
fn main() {}
