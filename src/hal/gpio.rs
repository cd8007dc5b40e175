use avr_device::attiny85::PORTB;
use core::convert::Infallible;
use core::marker::PhantomData;

use embedded_hal::digital::v2::OutputPin;

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

/// PORTB pin `P`. The ATtiny25/45/85 only has PORTB.
#[derive(Debug)]
pub struct Pin<const P: u8, MODE> {
    _mode: PhantomData<MODE>,
}

impl<const P: u8, MODE: PinMode> Pin<P, MODE> {
    const MASK: u8 = 1 << P;

    pub fn into_output(self) -> Pin<P, Output> {
        unsafe {
            // Set PORTx first so the pin comes up low
            (*PORTB::ptr()).portb.modify(|r, w| w.bits(r.bits() & !Self::MASK));
            (*PORTB::ptr()).ddrb.modify(|r, w| w.bits(r.bits() | Self::MASK));
        }
        Pin { _mode: PhantomData }
    }
}

impl<const P: u8> Pin<P, Output> {
    /// Writing a one to PINx flips the output latch
    #[inline]
    pub fn toggle(&mut self) {
        unsafe {
            (*PORTB::ptr()).pinb.write(|w| w.bits(1 << P));
        }
    }
}

impl<const P: u8> OutputPin for Pin<P, Output> {
    type Error = Infallible;

    #[inline]
    fn set_high(&mut self) -> Result<(), Infallible> {
        unsafe {
            (*PORTB::ptr()).portb.modify(|r, w| w.bits(r.bits() | (1 << P)));
        }
        Ok(())
    }

    #[inline]
    fn set_low(&mut self) -> Result<(), Infallible> {
        unsafe {
            (*PORTB::ptr()).portb.modify(|r, w| w.bits(r.bits() & !(1 << P)));
        }
        Ok(())
    }
}

/// All PORTB pins, as they come out of reset
pub struct Pins {
    pub pb0: Pin<0, Input>,
    pub pb1: Pin<1, Input>,
    pub pb2: Pin<2, Input>,
    pub pb3: Pin<3, Input>,
    pub pb4: Pin<4, Input>,
}

impl Pins {
    pub fn new(_port: PORTB) -> Self {
        Self {
            pb0: Pin { _mode: PhantomData },
            pb1: Pin { _mode: PhantomData },
            pb2: Pin { _mode: PhantomData },
            pb3: Pin { _mode: PhantomData },
            pb4: Pin { _mode: PhantomData },
        }
    }
}

/// Drive every PORTB output low and make all pins inputs.
pub fn release_port() {
    unsafe {
        (*PORTB::ptr()).portb.write(|w| w.bits(0));
        (*PORTB::ptr()).ddrb.write(|w| w.bits(0));
    }
}

// Brain machine wiring
pub mod pinout {
    use super::*;

    /// OC0A, left ear through a 2.2k/1uF low-pass
    pub type BaseTonePin = Pin<0, Output>;
    /// OC1A, right ear through a 2.2k/1uF low-pass
    pub type OffsetTonePin = Pin<1, Output>;
    /// Right eye LED, 47 ohm
    pub type RightLed = Pin<2, Output>;
    /// Left eye LED, 47 ohm
    pub type LeftLed = Pin<3, Output>;
    /// Unconnected on the board, trace output when enabled
    pub type TracePin = Pin<4, Output>;
}
