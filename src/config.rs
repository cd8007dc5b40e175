//! Configuration constants for the brain machine firmware

/// CPU frequency in Hz (internal RC oscillator, CKDIV8 fuse cleared)
pub const CPU_FREQ_HZ: u32 = parse_decimal(env!("BM_CPU_FREQ_HZ"));

/// One tick is 0.1 ms
pub const TICKS_PER_SECOND: u32 = 10_000;

/// CPU cycles per busy-wait inner iteration (`sbiw` + taken `brne`)
pub const CYCLES_PER_LOOP: u32 = 4;

/// Cycles the tick loop spends around each inner loop: loading the count,
/// the last untaken `brne` and the 32-bit tick counter
pub const TICK_OVERHEAD_CYCLES: u32 = 12;

/// Busy-wait inner iterations per 0.1 ms tick.
///
/// Counted from the clock by default (197 at 8 MHz). Check it with the
/// `calibrate` example and rebuild with `BM_LOOPS_PER_TICK` set if the RC
/// oscillator is off.
pub const LOOPS_PER_TICK: u16 = match option_env!("BM_LOOPS_PER_TICK") {
    Some(loops) => narrow(parse_decimal(loops)),
    None => narrow((CPU_FREQ_HZ / TICKS_PER_SECOND - TICK_OVERHEAD_CYCLES) / CYCLES_PER_LOOP),
};

/// Clock divider shared by both tone timers
pub const TONE_PRESCALER: u32 = 256;

/// Compare value for the fixed base tone (≈200.320 Hz at 8 MHz)
pub const BASE_DIVISOR: u8 = 77;

/// Pause between silencing the tones and releasing the pins
pub const SHUTDOWN_SETTLE_TICKS: u32 = TICKS_PER_SECOND;

/// Trace console baud rate
pub const TRACE_BAUD: u32 = 9600;

/// Busy-wait iterations per trace bit
pub const TRACE_LOOPS_PER_BIT: u16 =
    narrow(LOOPS_PER_TICK as u32 * TICKS_PER_SECOND / TRACE_BAUD);

const fn parse_decimal(s: &str) -> u32 {
    let bytes = s.as_bytes();
    assert!(!bytes.is_empty(), "empty numeric build setting");
    let mut value = 0u32;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        assert!(digit.is_ascii_digit(), "numeric build setting must be decimal");
        value = value * 10 + (digit - b'0') as u32;
        i += 1;
    }
    value
}

const fn narrow(loops: u32) -> u16 {
    assert!(loops <= u16::MAX as u32, "busy-wait count does not fit the 16-bit loop");
    loops as u16
}

const _: () = assert!(LOOPS_PER_TICK > 0);
const _: () = assert!(TRACE_LOOPS_PER_BIT > 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_build_settings() {
        assert_eq!(parse_decimal("8000000"), 8_000_000);
        assert_eq!(parse_decimal("0"), 0);
        assert_eq!(parse_decimal("197"), 197);
    }

    #[test]
    fn trace_bit_is_about_a_tick() {
        // 9600 baud is 104 us per bit, a tick is 100 us
        assert!(TRACE_LOOPS_PER_BIT >= LOOPS_PER_TICK);
        assert!(TRACE_LOOPS_PER_BIT as u32 * 10 <= LOOPS_PER_TICK as u32 * 11);
    }

    #[test]
    fn default_tick_is_counted_from_the_clock() {
        if option_env!("BM_LOOPS_PER_TICK").is_some() {
            return;
        }
        let cycles_per_tick = CPU_FREQ_HZ / TICKS_PER_SECOND;
        let spent = LOOPS_PER_TICK as u32 * CYCLES_PER_LOOP + TICK_OVERHEAD_CYCLES;
        assert!(spent <= cycles_per_tick);
        assert!(cycles_per_tick - spent < CYCLES_PER_LOOP);
        if CPU_FREQ_HZ == 8_000_000 {
            assert_eq!(LOOPS_PER_TICK, 197);
        }
    }
}
