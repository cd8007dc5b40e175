//! ATtiny85 brain machine board: pin map and machine assembly.
//!
//! ```text
//!                 +--\/--+
//!       RESET PB5 |1    8| VCC   CR2032 through the switch
//!  left LED   PB3 |2    7| PB2   right LED
//!  trace TX   PB4 |3    6| PB1   OC1A right ear
//!             GND |4    5| PB0   OC0A left ear
//!                 +------+
//! ```

use avr_device::attiny85::Peripherals;

use crate::delay::BusyWait;
use crate::hal::pinout::{LeftLed, RightLed};
use crate::hal::{timer, BaseTone, OffsetTone, Pins, Power, RetainedFlag};
use crate::led::BeatLeds;
use crate::machine::BrainMachine;
use crate::tone::Binaural;

#[cfg(feature = "trace")]
pub type Console = crate::trace::SoftSerial<crate::hal::pinout::TracePin>;
#[cfg(not(feature = "trace"))]
pub type Console = crate::trace::Silent;

pub type Firmware = BrainMachine<
    BaseTone,
    OffsetTone,
    LeftLed,
    RightLed,
    BusyWait,
    Power,
    RetainedFlag,
    Console,
>;

/// Take over the chip and build the machine. Nothing audible or visible
/// happens until the machine runs; all outputs come up low.
pub fn assemble(dp: Peripherals) -> Firmware {
    timer::mask_interrupts(&dp.TC0);

    let pins = Pins::new(dp.PORTB);
    let tones = Binaural::new(
        BaseTone::new(dp.TC0, pins.pb0.into_output()),
        OffsetTone::new(dp.TC1, pins.pb1.into_output()),
    );
    let leds = BeatLeds::new(pins.pb3.into_output(), pins.pb2.into_output());

    BrainMachine::new(
        tones,
        leds,
        BusyWait::new(),
        Power::new(dp.CPU),
        RetainedFlag::new(),
        console(pins.pb4),
    )
}

#[cfg(feature = "trace")]
fn console(pin: crate::hal::Pin<4, crate::hal::Input>) -> Console {
    match crate::trace::SoftSerial::new(pin.into_output()) {
        Ok(serial) => serial,
        Err(never) => match never {},
    }
}

#[cfg(not(feature = "trace"))]
fn console(_pin: crate::hal::Pin<4, crate::hal::Input>) -> Console {
    crate::trace::Silent
}
