pub mod flash;
pub mod gpio;
pub mod power;
pub mod timer;

// Re-export commonly used types
pub use flash::{FlashTable, BRAINWAVE_FLASH};
pub use gpio::pinout;
pub use gpio::{Input, Output, Pin, Pins};
pub use power::{Power, RetainedFlag};
pub use timer::{BaseTone, OffsetTone};
