/*!
# HD44780 Driver

A blocking driver for HD44780 (and compatible) character LCD controllers, over a 4-pin or 8-pin parallel bus.

Basic Usage:

1. Initialize a "sender" <br/>
    Use [`sender::ParallelSender::new_4pin()`] or [`sender::ParallelSender::new_8pin()`] with your HAL's output pins.
    RW pin is optional, pass `None` if it's tied to ground.

    Or use any driver implemented [`sender::SendCommand`].
<br/>
<br/>
2. Use [`lcd::Lcd::new()`] to create a [`lcd::Lcd`], then [`lcd::Lcd::begin()`] to initialize LCD hardware
<br/>
<br/>
3. Use any methods provide by [`lcd::Lcd`] to control the LCD, or `write!()` text into it,
    since [`lcd::Lcd`] implements both [`core::fmt::Write`] and [`embedded_io::Write`]

Enable `defmt` feature to get log output and `defmt::Format` on public types.
*/

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod lcd;
pub mod sender;
mod state;
pub mod utils;

pub use error::Error;
pub use state::DEFAULT_ROW_OFFSETS;
