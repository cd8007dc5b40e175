//! The meditation script: which band plays, and for how long.
//!
//! Starts with lots of Beta (awake), mixes in Alpha, reduces Beta, adds
//! Theta, pulses in some Delta, then reverses the above to come up refreshed.

/// Brainwave band of one table entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Beta,
    Alpha,
    Theta,
    Delta,
    /// Table terminator, never played
    End,
}

/// Offset divisor and LED cadence for one band
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandTiming {
    /// Compare value for the offset tone timer
    pub divisor: u8,
    /// LED on time in ticks
    pub on: u32,
    /// LED off time in ticks
    pub off: u32,
}

impl BandTiming {
    /// Length of one LED on/off cycle in ticks
    #[inline]
    pub const fn period(&self) -> u32 {
        self.on + self.off
    }
}

impl Band {
    /// Timer and LED settings, `None` for the terminator.
    pub const fn timing(self) -> Option<BandTiming> {
        match self {
            // 217.013 Hz against 200.320 Hz: 16.7 Hz beat, 30.0 ms on / 29.9 ms off
            Band::Beta => Some(BandTiming { divisor: 71, on: 300, off: 299 }),
            // 211.148 Hz: 10.8 Hz beat
            Band::Alpha => Some(BandTiming { divisor: 73, on: 462, off: 462 }),
            // 205.592 Hz: 5.3 Hz beat
            Band::Theta => Some(BandTiming { divisor: 75, on: 948, off: 949 }),
            // 202.922 Hz: 2.6 Hz beat
            Band::Delta => Some(BandTiming { divisor: 76, on: 1922, off: 1923 }),
            Band::End => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Band::Beta => "beta",
            Band::Alpha => "alpha",
            Band::Theta => "theta",
            Band::Delta => "delta",
            Band::End => "end",
        }
    }
}

/// One segment of the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrainwaveElement {
    pub band: Band,
    /// Ticks of 0.1 ms
    pub duration: u32,
}

const fn el(band: Band, duration: u32) -> BrainwaveElement {
    BrainwaveElement { band, duration }
}

use Band::{Alpha as A, Beta as B, Delta as D, End, Theta as T};

/// Entries in the built-in table, terminator included
pub const TABLE_LEN: usize = 44;

/// The built-in session. On the AVR it is only ever read from the flash copy
/// in `hal::flash`; the table does not fit the ATtiny25's SRAM.
pub const BRAINWAVE_TABLE: [BrainwaveElement; TABLE_LEN] = [
    el(B, 600_000),
    el(A, 100_000),
    el(B, 200_000),
    el(A, 150_000),
    el(B, 150_000),
    el(A, 200_000),
    el(B, 100_000),
    el(A, 300_000),
    el(B, 50_000),
    el(A, 600_000),
    el(T, 100_000),
    el(A, 300_000),
    el(T, 200_000),
    el(A, 300_000),
    el(T, 300_000),
    el(A, 150_000),
    el(T, 600_000),
    el(A, 150_000),
    el(B, 10_000),
    el(A, 150_000),
    el(T, 600_000),
    el(D, 10_000),
    el(T, 100_000),
    el(D, 10_000),
    el(T, 100_000),
    el(D, 10_000),
    el(T, 300_000),
    el(A, 150_000),
    el(B, 10_000),
    el(A, 150_000),
    el(T, 300_000),
    el(A, 150_000),
    el(B, 10_000),
    el(A, 200_000),
    el(B, 50_000),
    el(A, 200_000),
    el(B, 150_000),
    el(A, 150_000),
    el(B, 200_000),
    el(A, 100_000),
    el(B, 250_000),
    el(A, 50_000),
    el(B, 600_000),
    el(End, 0),
];

const _: () = assert!(is_well_formed(&BRAINWAVE_TABLE));

/// Checks that `table` is playable entries with non-zero durations followed
/// by exactly one terminator.
pub const fn is_well_formed(table: &[BrainwaveElement]) -> bool {
    let len = table.len();
    if len == 0 || !matches!(table[len - 1].band, Band::End) {
        return false;
    }
    let mut i = 0;
    while i < len - 1 {
        if matches!(table[i].band, Band::End) || table[i].duration == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// Read access to a segment table, wherever it is stored
pub trait SegmentTable {
    /// Entry at `index`, `None` past the end
    fn segment(&self, index: usize) -> Option<BrainwaveElement>;
}

impl SegmentTable for [BrainwaveElement] {
    #[inline]
    fn segment(&self, index: usize) -> Option<BrainwaveElement> {
        self.get(index).copied()
    }
}

impl<const N: usize> SegmentTable for [BrainwaveElement; N] {
    #[inline]
    fn segment(&self, index: usize) -> Option<BrainwaveElement> {
        self.get(index).copied()
    }
}

impl<T: SegmentTable + ?Sized> SegmentTable for &T {
    #[inline]
    fn segment(&self, index: usize) -> Option<BrainwaveElement> {
        (**self).segment(index)
    }
}

#[cfg(not(target_arch = "avr"))]
pub type BuiltInTable = &'static [BrainwaveElement; TABLE_LEN];
#[cfg(target_arch = "avr")]
pub type BuiltInTable = &'static crate::hal::flash::FlashTable;

/// The table the firmware plays by default.
pub fn built_in() -> BuiltInTable {
    #[cfg(target_arch = "avr")]
    {
        &crate::hal::flash::BRAINWAVE_FLASH
    }
    #[cfg(not(target_arch = "avr"))]
    {
        &BRAINWAVE_TABLE
    }
}

/// Entries before the first terminator, in table order. Nothing after the
/// terminator is read.
pub fn playable<T: SegmentTable + ?Sized>(
    table: &T,
) -> impl Iterator<Item = (usize, BrainwaveElement)> + '_ {
    (0..)
        .map_while(move |index| table.segment(index).map(|element| (index, element)))
        .take_while(|(_, element)| element.band != Band::End)
}

/// Ticks the LED driver actually blocks for on one element.
pub const fn played_ticks(element: &BrainwaveElement) -> u32 {
    match element.band.timing() {
        Some(timing) => element.duration / timing.period() * timing.period(),
        None => 0,
    }
}

/// Total blocking time of a table walk, in ticks.
pub const fn session_ticks(table: &[BrainwaveElement]) -> u32 {
    let mut total = 0;
    let mut i = 0;
    while i < table.len() {
        if matches!(table[i].band, Band::End) {
            break;
        }
        total += played_ticks(&table[i]);
        i += 1;
    }
    total
}
