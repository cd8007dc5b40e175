use avr_device::attiny85::CPU;
use core::ptr::{addr_of, addr_of_mut};

use super::gpio;
use crate::power::{PowerControl, PowerFlag, SleepMode};

pub struct Power {
    cpu: CPU,
}

impl Power {
    pub fn new(cpu: CPU) -> Self {
        Self { cpu }
    }

    #[inline]
    pub fn set_sleep_mode(&mut self, mode: SleepMode) {
        self.cpu.mcucr.modify(|r, w| unsafe {
            w.bits((r.bits() & !SleepMode::MASK) | mode.bits())
        });
    }

    #[inline]
    pub fn enable_sleep(&mut self) {
        self.cpu
            .mcucr
            .modify(|r, w| unsafe { w.bits(r.bits() | SleepMode::SE) });
    }
}

impl PowerControl for Power {
    fn prepare_power_down(&mut self) {
        self.enable_sleep();
        self.set_sleep_mode(SleepMode::PowerDown);
    }

    fn release_pins(&mut self) {
        gpio::release_port();
    }

    #[inline]
    fn sleep(&mut self) {
        avr_device::asm::sleep();
    }
}

// Not cleared by the startup code. The initializer is discarded by the
// linker, so after power-on this holds whatever the SRAM came up with.
#[link_section = ".noinit"]
static mut POWER: u8 = 0;

/// Power flag in `.noinit` SRAM. Survives a warm reset, not a power cycle.
pub struct RetainedFlag {
    _private: (),
}

impl RetainedFlag {
    /// Only one handle may exist; `board::assemble` creates it.
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

impl PowerFlag for RetainedFlag {
    fn is_set(&self) -> bool {
        unsafe { core::ptr::read_volatile(addr_of!(POWER)) == 1 }
    }

    fn clear(&mut self) {
        unsafe { core::ptr::write_volatile(addr_of_mut!(POWER), 0) }
    }
}
