//! Host-side stand-ins for the hardware, shared by the unit tests.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::v2::OutputPin;

use crate::delay::TickDelay;
use crate::power::{PowerControl, PowerFlag};
use crate::tone::ToneChannel;

/// What happened, in order, across all doubles sharing a journal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Tone(&'static str, ToneEvent),
    Delay(u32),
    PowerDown,
    PinsReleased,
    Slept,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneEvent {
    Armed,
    Divisor(u8),
    Stopped,
}

pub type Journal = Rc<RefCell<Vec<Event>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

#[derive(Default)]
pub struct RecordingDelay {
    calls: Vec<u32>,
    journal: Option<Journal>,
}

impl RecordingDelay {
    pub fn with_journal(journal: &Journal) -> Self {
        Self { calls: Vec::new(), journal: Some(journal.clone()) }
    }

    pub fn calls(&self) -> &[u32] {
        &self.calls
    }

    pub fn total(&self) -> u64 {
        self.calls.iter().map(|&t| u64::from(t)).sum()
    }
}

impl TickDelay for RecordingDelay {
    fn delay_ticks(&mut self, ticks: u32) {
        self.calls.push(ticks);
        if let Some(journal) = &self.journal {
            journal.borrow_mut().push(Event::Delay(ticks));
        }
    }
}

#[derive(Default)]
pub struct RecordingTone {
    name: &'static str,
    events: Vec<ToneEvent>,
    journal: Option<Journal>,
}

impl RecordingTone {
    pub fn with_journal(name: &'static str, journal: &Journal) -> Self {
        Self { name, events: Vec::new(), journal: Some(journal.clone()) }
    }

    pub fn events(&self) -> &[ToneEvent] {
        &self.events
    }

    fn record(&mut self, event: ToneEvent) {
        self.events.push(event);
        if let Some(journal) = &self.journal {
            journal.borrow_mut().push(Event::Tone(self.name, event));
        }
    }
}

impl ToneChannel for RecordingTone {
    fn arm(&mut self) {
        self.record(ToneEvent::Armed);
    }

    fn set_divisor(&mut self, divisor: u8) {
        self.record(ToneEvent::Divisor(divisor));
    }

    fn stop(&mut self) {
        self.record(ToneEvent::Stopped);
    }
}

pub struct RecordingPower {
    journal: Journal,
}

impl RecordingPower {
    pub fn new(journal: &Journal) -> Self {
        Self { journal: journal.clone() }
    }
}

impl PowerControl for RecordingPower {
    fn prepare_power_down(&mut self) {
        self.journal.borrow_mut().push(Event::PowerDown);
    }

    fn release_pins(&mut self) {
        self.journal.borrow_mut().push(Event::PinsReleased);
    }

    fn sleep(&mut self) {
        self.journal.borrow_mut().push(Event::Slept);
    }
}

/// Retained flag with an inspectable raw value
#[derive(Clone, Debug, Default)]
pub struct MemoryFlag {
    value: Rc<RefCell<u8>>,
}

impl MemoryFlag {
    pub fn holding(raw: u8) -> Self {
        Self { value: Rc::new(RefCell::new(raw)) }
    }

    pub fn raw(&self) -> u8 {
        *self.value.borrow()
    }
}

impl PowerFlag for MemoryFlag {
    fn is_set(&self) -> bool {
        self.raw() == 1
    }

    fn clear(&mut self) {
        *self.value.borrow_mut() = 0;
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct PinFault;

/// Counts level changes. Optionally fails on the n-th write and every one after.
#[derive(Debug, Default)]
pub struct CountingPin {
    high: bool,
    highs: usize,
    lows: usize,
    fail_after: Option<usize>,
}

impl CountingPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(write: usize) -> Self {
        Self { fail_after: Some(write.saturating_sub(1)), ..Self::default() }
    }

    pub fn highs(&self) -> usize {
        self.highs
    }

    pub fn lows(&self) -> usize {
        self.lows
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    fn write(&mut self, high: bool) -> Result<(), PinFault> {
        if let Some(limit) = self.fail_after {
            if self.highs + self.lows >= limit {
                return Err(PinFault);
            }
        }
        self.high = high;
        if high {
            self.highs += 1;
        } else {
            self.lows += 1;
        }
        Ok(())
    }
}

impl OutputPin for CountingPin {
    type Error = PinFault;

    fn set_high(&mut self) -> Result<(), PinFault> {
        self.write(true)
    }

    fn set_low(&mut self) -> Result<(), PinFault> {
        self.write(false)
    }
}

/// Collects trace output
#[derive(Debug, Default)]
pub struct Transcript(pub String);

impl ufmt::uWrite for Transcript {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.0.push_str(s);
        Ok(())
    }
}
