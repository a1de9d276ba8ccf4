//! Built-in sender
//! If you want to drive the bus some other way, you will need to implement [`SendCommand`] trait

use embedded_hal::delay::DelayNs;

use crate::command::{Command, DataWidth};

mod parallel_sender;

pub use parallel_sender::ParallelSender;

/// Enable line setup time before the rising edge, in microseconds
pub const ENABLE_SETUP_US: u32 = 1;
/// Enable high time, controller needs at least 450 ns
pub const ENABLE_PULSE_US: u32 = 1;
/// Wait after each falling edge of enable, most instructions need 37 us to execute
pub const COMMAND_SETTLE_US: u32 = 100;

/// [`SendCommand`] is the trait a sender should implement to communicate with the hardware
///
/// The bus is write only and unacknowledged, a sender has nothing to report but its own pin failures.
pub trait SendCommand<Delayer: DelayNs> {
    /// Error raised by the underlying pins
    type Error;

    /// Bus width this sender is wired with
    fn get_data_width(&self) -> DataWidth;

    /// Drive RS, EN (and RW if wired) low, before the first command is sent
    fn prepare_bus(&mut self) -> Result<(), Self::Error>;

    /// Put a [`Command`] on the bus, one enable pulse per nibble or byte
    fn send(&mut self, command: impl Into<Command>, delayer: &mut Delayer)
        -> Result<(), Self::Error>;

    /// Send command, then wait specific duration
    fn send_and_delay(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut Delayer,
        delay_us: u32,
    ) -> Result<(), Self::Error> {
        self.send(command, delayer)?;
        delayer.delay_us(delay_us);
        Ok(())
    }
}
