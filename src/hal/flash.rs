//! Program memory copy of the meditation table.
//!
//! A plain `static` lands in `.data` and gets copied to SRAM at reset; the
//! table is 220 bytes and the ATtiny25 has 128. Entries are loaded with `lpm`
//! one at a time instead.

use avr_progmem::progmem;
use avr_progmem::wrapper::ProgMem;

use crate::sequence::{BrainwaveElement, SegmentTable, BRAINWAVE_TABLE, TABLE_LEN};

pub type FlashTable = ProgMem<[BrainwaveElement; TABLE_LEN]>;

progmem! {
    pub static progmem BRAINWAVE_FLASH: [BrainwaveElement; TABLE_LEN] = BRAINWAVE_TABLE;
}

impl<const N: usize> SegmentTable for ProgMem<[BrainwaveElement; N]> {
    #[inline]
    fn segment(&self, index: usize) -> Option<BrainwaveElement> {
        if index < N {
            Some(self.load_at(index))
        } else {
            None
        }
    }
}
