//! Brain machine firmware for the ATtiny25/45/85.
//!
//! Plays a fixed tone in the left ear and a band-dependent offset tone in
//! the right ear, blinks both eye LEDs at the resulting beat frequency, walks
//! a scripted sequence of Beta/Alpha/Theta/Delta segments and then powers
//! down.
//!
//! Everything above the `hal` and `board` modules only talks to small
//! capability traits (`ToneChannel`, `OutputPin`, `TickDelay`, `PowerControl`,
//! `PowerFlag`), so the sequencing is unit tested on the host.
#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(asm_experimental_arch))]

pub mod config;
pub mod delay;
pub mod led;
pub mod machine;
pub mod power;
pub mod sequence;
pub mod tone;
pub mod trace;

#[cfg(target_arch = "avr")]
pub mod board;
#[cfg(target_arch = "avr")]
pub mod hal;

#[cfg(test)]
mod testing;

pub use delay::{BusyWait, TickDelay};
pub use machine::{BrainMachine, Outcome};
pub use sequence::{Band, BrainwaveElement, SegmentTable, BRAINWAVE_TABLE};
