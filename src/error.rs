//! Error type
//!
//! The HD44780 bus has no acknowledgement line, so nothing the controller does can be reported back.
//! The only failure left is the HAL refusing to drive a pin.

use thiserror::Error;

/// Errors raised while talking to the LCD
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error<E> {
    /// A GPIO pin could not be driven
    #[error("failed to drive pin: {0:?}")]
    Pin(E),
}

impl<E: core::fmt::Debug> embedded_io::Error for Error<E> {
    fn kind(&self) -> embedded_io::ErrorKind {
        embedded_io::ErrorKind::Other
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Error<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::Pin(_e) => defmt::write!(fmt, "failed to drive pin"),
        }
    }
}
