//! Session sequencer and power controller.
//!
//! ```text
//! BootCheck --flag set--------------------------> ShuttingDown (Skipped)
//!     \--flag clear--> Running --table done-----> ShuttingDown (Completed)
//!                          \------LED pin error--> ShuttingDown (Faulted)
//! ```
//!
//! Everything runs on the caller's stack with interrupts off. The only time
//! base is the busy-wait inside the LED driver, so the length of a segment is
//! exactly the length of its blink.

use embedded_hal::digital::v2::OutputPin;
use ufmt::{uWrite, uwriteln};

use crate::config::SHUTDOWN_SETTLE_TICKS;
use crate::delay::TickDelay;
use crate::led::BeatLeds;
use crate::power::{PowerControl, PowerFlag};
use crate::sequence::{self, BuiltInTable, SegmentTable};
use crate::tone::{Binaural, ToneChannel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    BootCheck,
    Running,
    ShuttingDown(Outcome),
}

/// How a session ended. Every outcome ends in the same shutdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The retained flag was set at boot, nothing was played
    Skipped,
    /// All segments before the terminator were played
    Completed { segments: usize },
    /// An LED write failed while playing `segment`
    Faulted { segment: usize },
}

pub struct BrainMachine<B, O, L, R, D, P, F, W, T = BuiltInTable> {
    tones: Binaural<B, O>,
    leds: BeatLeds<L, R>,
    delay: D,
    power: P,
    flag: F,
    console: W,
    table: T,
}

impl<B, O, L, R, D, P, F, W> BrainMachine<B, O, L, R, D, P, F, W> {
    /// Machine playing the built-in meditation table.
    pub fn new(
        tones: Binaural<B, O>,
        leds: BeatLeds<L, R>,
        delay: D,
        power: P,
        flag: F,
        console: W,
    ) -> Self {
        Self {
            tones,
            leds,
            delay,
            power,
            flag,
            console,
            table: sequence::built_in(),
        }
    }
}

impl<B, O, L, R, D, P, F, W, T> BrainMachine<B, O, L, R, D, P, F, W, T> {
    /// Play `table` instead. It must end with `Band::End`; anything after the
    /// first terminator is never read.
    pub fn with_table<U: SegmentTable>(
        self,
        table: U,
    ) -> BrainMachine<B, O, L, R, D, P, F, W, U> {
        BrainMachine {
            tones: self.tones,
            leds: self.leds,
            delay: self.delay,
            power: self.power,
            flag: self.flag,
            console: self.console,
            table,
        }
    }
}

impl<B, O, L, R, E, D, P, F, W, T> BrainMachine<B, O, L, R, D, P, F, W, T>
where
    B: ToneChannel,
    O: ToneChannel,
    L: OutputPin<Error = E>,
    R: OutputPin<Error = E>,
    D: TickDelay,
    P: PowerControl,
    F: PowerFlag,
    W: uWrite,
    T: SegmentTable + Copy,
{
    /// Run one session and then stay asleep.
    pub fn run(mut self) -> ! {
        self.session();
        loop {
            self.power.sleep();
        }
    }

    /// Run the state machine from boot to the first sleep.
    pub fn session(&mut self) -> Outcome {
        let mut state = State::BootCheck;
        loop {
            state = match state {
                State::BootCheck => self.boot_check(),
                State::Running => self.play_table(),
                State::ShuttingDown(outcome) => {
                    self.shut_down();
                    return outcome;
                }
            };
        }
    }

    fn boot_check(&mut self) -> State {
        if self.flag.is_set() {
            // Reset while still on: don't replay the session
            uwriteln!(self.console, "boot: power flag set, sleeping").ok();
            return State::ShuttingDown(Outcome::Skipped);
        }
        self.flag.clear();
        State::Running
    }

    fn play_table(&mut self) -> State {
        let table = self.table;
        let (count, ticks) = sequence::playable(&table).fold((0usize, 0u32), |(n, t), (_, e)| {
            (n + 1, t + sequence::played_ticks(&e))
        });
        uwriteln!(self.console, "session: {} segments, {} ticks", count, ticks).ok();

        self.tones.start();

        let mut segments = 0;
        for (index, element) in sequence::playable(&table) {
            match self.play_band(index) {
                Ok(cycles) => {
                    let band = element.band.name();
                    let duration = element.duration;
                    uwriteln!(
                        self.console,
                        "{} {} {} ticks, {} cycles",
                        index,
                        band,
                        duration,
                        cycles
                    )
                    .ok();
                }
                Err(_) => {
                    uwriteln!(self.console, "{}: led fault", index).ok();
                    return State::ShuttingDown(Outcome::Faulted { segment: index });
                }
            }
            segments += 1;
        }
        State::ShuttingDown(Outcome::Completed { segments })
    }

    /// Play the table entry at `index`: retune the offset tone and blink for
    /// the entry's duration. Returns the number of blink cycles.
    ///
    /// The terminator, or an index past the end of the table, does nothing.
    pub fn play_band(&mut self, index: usize) -> Result<u32, E> {
        let Some(element) = self.table.segment(index) else {
            return Ok(0);
        };
        let Some(timing) = element.band.timing() else {
            return Ok(0);
        };
        self.tones.tune(timing.divisor);
        self.leds.blink(&mut self.delay, element.duration, timing)
    }

    /// Same sequence for the boot guard and for the end of a session.
    fn shut_down(&mut self) {
        uwriteln!(self.console, "shutdown").ok();
        self.tones.silence();
        self.power.prepare_power_down();
        self.delay.delay_ticks(SHUTDOWN_SETTLE_TICKS);
        // release_pins clears the whole port, a failed LED write changes nothing
        self.leds.off().ok();
        self.power.release_pins();
        self.power.sleep();
    }
}

#[cfg(test)]
impl<B, O, L, R, D, P, F, W, T> BrainMachine<B, O, L, R, D, P, F, W, T> {
    pub(crate) fn parts(&self) -> (&Binaural<B, O>, &BeatLeds<L, R>, &D, &W) {
        (&self.tones, &self.leds, &self.delay, &self.console)
    }
}
