use crate::config::LOOPS_PER_TICK;

/// Blocking delay counted in 0.1 ms ticks
pub trait TickDelay {
    fn delay_ticks(&mut self, ticks: u32);
}

/// Calibrated busy-wait. Uses no timer and no interrupt, so both hardware
/// timers stay free for the tones.
#[derive(Clone, Copy, Debug)]
pub struct BusyWait {
    loops_per_tick: u16,
}

impl BusyWait {
    pub const fn new() -> Self {
        Self::with_calibration(LOOPS_PER_TICK)
    }

    pub const fn with_calibration(loops_per_tick: u16) -> Self {
        Self { loops_per_tick }
    }

    /// Raw inner loop, `CYCLES_PER_LOOP` cycles per iteration on the AVR.
    #[inline(always)]
    pub fn spin(&self, loops: u16) {
        if loops == 0 {
            return;
        }
        spin_loop(loops);
    }
}

// sbiw (2) + taken brne (2)
#[cfg(target_arch = "avr")]
#[inline(always)]
fn spin_loop(loops: u16) {
    unsafe {
        core::arch::asm!(
            "1: sbiw {i}, 1",
            "brne 1b",
            i = inout(reg_iw) loops => _,
            options(nomem, nostack),
        );
    }
}

#[cfg(not(target_arch = "avr"))]
fn spin_loop(loops: u16) {
    let mut i = 0u16;
    while i < loops {
        i = core::hint::black_box(i) + 1;
    }
}

impl TickDelay for BusyWait {
    #[inline(never)]
    fn delay_ticks(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.spin(self.loops_per_tick);
        }
    }
}

impl Default for BusyWait {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_build_calibration() {
        assert_eq!(BusyWait::new().loops_per_tick, LOOPS_PER_TICK);
        assert_eq!(BusyWait::default().loops_per_tick, LOOPS_PER_TICK);
    }

    #[test]
    fn zero_ticks_returns_immediately() {
        let mut delay = BusyWait::with_calibration(u16::MAX);
        delay.delay_ticks(0);
        delay.spin(0);
    }

    #[test]
    fn short_waits_complete() {
        let mut delay = BusyWait::new();
        delay.delay_ticks(10);
        delay.spin(1000);
    }
}
