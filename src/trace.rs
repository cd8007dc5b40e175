//! Log output.
//!
//! The ATtiny has no UART, so `SoftSerial` bit-bangs 8N1 on a spare pin with
//! the same busy-wait the LEDs use. Writing a line costs about 1 ms per
//! character, which is added to the gap between two segments. Builds without
//! the `trace` feature use `Silent` and the log calls compile away.

use core::convert::Infallible;

use embedded_hal::digital::v2::OutputPin;
use ufmt::uWrite;

use crate::config::TRACE_LOOPS_PER_BIT;
use crate::delay::BusyWait;

/// Discards everything
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl uWrite for Silent {
    type Error = Infallible;

    #[inline(always)]
    fn write_str(&mut self, _: &str) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Transmit-only software serial port, idle high, LSB first
pub struct SoftSerial<P> {
    tx: P,
    wait: BusyWait,
    loops_per_bit: u16,
}

impl<P: OutputPin> SoftSerial<P> {
    pub fn new(tx: P) -> Result<Self, P::Error> {
        Self::with_bit_loops(tx, TRACE_LOOPS_PER_BIT)
    }

    pub fn with_bit_loops(mut tx: P, loops_per_bit: u16) -> Result<Self, P::Error> {
        tx.set_high()?;
        Ok(Self {
            tx,
            wait: BusyWait::new(),
            loops_per_bit,
        })
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<(), P::Error> {
        self.bit(false)?;
        for i in 0..8 {
            self.bit(byte & (1 << i) != 0)?;
        }
        self.bit(true)
    }

    fn bit(&mut self, high: bool) -> Result<(), P::Error> {
        if high {
            self.tx.set_high()?;
        } else {
            self.tx.set_low()?;
        }
        self.wait.spin(self.loops_per_bit);
        Ok(())
    }
}

#[cfg(test)]
impl<P> SoftSerial<P> {
    pub(crate) fn release(self) -> P {
        self.tx
    }
}

impl<P: OutputPin> uWrite for SoftSerial<P> {
    type Error = P::Error;

    fn write_str(&mut self, s: &str) -> Result<(), P::Error> {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.write_byte(b'\r')?;
            }
            self.write_byte(byte)?;
        }
        Ok(())
    }
}
