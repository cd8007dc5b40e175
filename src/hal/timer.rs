//! Timer0 and Timer1 as tone generators.
//!
//! Both run in CTC mode from the /256 prescaler and toggle their compare
//! output pin on every match: `F = 8 MHz / (2 * 256 * (1 + OCR))`.

use avr_device::attiny85::{TC0, TC1};

use super::gpio::pinout::{BaseTonePin, OffsetTonePin};
use crate::tone::ToneChannel;

// TCCR0A: COM0A1:0=01 toggle OC0A, COM0B disconnected, WGM01:00=10 CTC
const TCCR0A_CTC_TOGGLE_A: u8 = 0b0100_0010;
// TCCR0B: WGM02=0, CS02:00=100 clk/256
const TCCR0B_CLK_256: u8 = 0b0000_0100;
const TCCR0B_CS_MASK: u8 = 0b0000_0111;

// TCCR1: CTC1=1 clear on OCR1C, PWM1A=0, COM1A1:0=01 toggle OC1A, CS13:10=1001 clk/256
const TCCR1_CTC_TOGGLE_A_CLK_256: u8 = 0b1001_1001;
const TCCR1_CS_MASK: u8 = 0b0000_1111;

/// Disable every timer interrupt. Nothing in this firmware is interrupt driven.
pub fn mask_interrupts(tc0: &TC0) {
    tc0.timsk.write(|w| unsafe { w.bits(0) });
}

/// Fixed base tone on OC0A
pub struct BaseTone {
    tc0: TC0,
    _pin: BaseTonePin,
}

impl BaseTone {
    pub fn new(tc0: TC0, pin: BaseTonePin) -> Self {
        Self { tc0, _pin: pin }
    }
}

impl ToneChannel for BaseTone {
    fn arm(&mut self) {
        self.tc0.tccr0a.write(|w| unsafe { w.bits(TCCR0A_CTC_TOGGLE_A) });
        self.tc0.tccr0b.write(|w| unsafe { w.bits(TCCR0B_CLK_256) });
    }

    fn set_divisor(&mut self, divisor: u8) {
        self.tc0.ocr0a.write(|w| unsafe { w.bits(divisor) });
    }

    fn stop(&mut self) {
        self.tc0
            .tccr0b
            .modify(|r, w| unsafe { w.bits(r.bits() & !TCCR0B_CS_MASK) });
    }
}

/// Offset tone on OC1A. Timer1 clears on OCR1C, so OCR1C is the divisor.
pub struct OffsetTone {
    tc1: TC1,
    _pin: OffsetTonePin,
}

impl OffsetTone {
    pub fn new(tc1: TC1, pin: OffsetTonePin) -> Self {
        Self { tc1, _pin: pin }
    }
}

impl ToneChannel for OffsetTone {
    fn arm(&mut self) {
        self.tc1
            .tccr1
            .write(|w| unsafe { w.bits(TCCR1_CTC_TOGGLE_A_CLK_256) });
    }

    fn set_divisor(&mut self, divisor: u8) {
        self.tc1.ocr1c.write(|w| unsafe { w.bits(divisor) });
    }

    fn stop(&mut self) {
        self.tc1
            .tccr1
            .modify(|r, w| unsafe { w.bits(r.bits() & !TCCR1_CS_MASK) });
    }
}
