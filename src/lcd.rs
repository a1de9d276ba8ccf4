use embedded_hal::delay::DelayNs;

use crate::{
    command::{
        Bits, Command, CommandSet, DataWidth, Font, LineMode, MoveDirection, RAMType,
        RegisterSelection, ShiftType, State,
    },
    sender::SendCommand,
    state::{LcdState, ROW_OFFSET_CAPACITY},
};

mod init;

pub use init::Config;

/// Wait after a clear display or return home, datasheet gives 1.52 ms
pub const CLEAR_SETTLE_US: u32 = 2_000;

/// A HD44780 driver
///
/// Owns its [`SendCommand`] sender and delay provider. Nothing is read back from the controller,
/// every register value is kept here, and re-sent in full on each change.
pub struct Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    sender: Sender,
    delayer: Delayer,
    state: LcdState,
}

#[allow(missing_docs)]
impl<Sender, Delayer> Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Send a raw instruction byte (RS low)
    pub fn command(&mut self, value: u8) -> Result<(), Sender::Error> {
        self.send(value, RegisterSelection::Command)
    }

    /// Send a raw data byte (RS high) to current RAM address
    ///
    /// Always accepts the byte, returns `1`
    pub fn write_byte(&mut self, value: u8) -> Result<usize, Sender::Error> {
        self.send(value, RegisterSelection::Data)?;
        Ok(1)
    }

    /// Send a byte to the selected register
    pub fn send(&mut self, value: u8, mode: RegisterSelection) -> Result<(), Sender::Error> {
        self.sender
            .send(Command::new(mode, Bits::Bit8(value)), &mut self.delayer)
    }

    fn send_command(&mut self, command: CommandSet) -> Result<(), Sender::Error> {
        self.sender.send(command, &mut self.delayer)
    }

    pub fn clear_display(&mut self) -> Result<(), Sender::Error> {
        self.state.set_ram_type(RAMType::DDRam);
        self.sender
            .send_and_delay(CommandSet::ClearDisplay, &mut self.delayer, CLEAR_SETTLE_US)
    }

    pub fn return_home(&mut self) -> Result<(), Sender::Error> {
        self.state.set_ram_type(RAMType::DDRam);
        self.sender
            .send_and_delay(CommandSet::ReturnHome, &mut self.delayer, CLEAR_SETTLE_US)
    }

    /// Move cursor to `pos` (column, row)
    ///
    /// Rows past the last configured line are clamped to it.
    /// Column is not checked, an out of range column lands wherever the controller puts it.
    pub fn set_cursor_pos(&mut self, pos: (u8, u8)) -> Result<(), Sender::Error> {
        #[cfg(feature = "defmt")]
        if pos.1 > self.state.last_row() {
            defmt::trace!("row {} clamped to {}", pos.1, self.state.last_row());
        }

        let addr = self.state.ddram_addr(pos);
        self.state.set_ram_type(RAMType::DDRam);
        self.send_command(CommandSet::SetDDRAM(addr))
    }

    /// Replace DDRAM start address of each row
    ///
    /// Values are not checked, they should match the wiring of the module.
    /// [`Lcd::begin`] resets the table to the one in its [`Config`].
    pub fn set_row_offsets(&mut self, offsets: [u8; ROW_OFFSET_CAPACITY]) {
        self.state.set_row_offsets(offsets);
    }

    pub fn get_row_offsets(&self) -> [u8; ROW_OFFSET_CAPACITY] {
        self.state.get_row_offsets()
    }

    /// Address is 6 bits wide, upper bits are dropped
    pub fn set_cgram_addr(&mut self, addr: u8) -> Result<(), Sender::Error> {
        self.state.set_ram_type(RAMType::CGRam);
        self.send_command(CommandSet::SetCGRAM(addr))
    }

    /// Store a custom glyph in CGRAM slot `index`
    ///
    /// `index` is taken modulo 8, only lower 5 bits of each line are displayed.
    /// Controller stays in CGRAM until next [`Lcd::set_cursor_pos`].
    pub fn write_graph_to_cgram(
        &mut self,
        index: u8,
        graph_data: &[u8; 8],
    ) -> Result<(), Sender::Error> {
        let index = index & 0b111;

        #[cfg(feature = "defmt")]
        defmt::trace!("upload glyph {}", index);

        // if DDRAM is write from right to left, then when we change to CGRAM, graph will write from lower to upper
        // we will change it to left to right, to make writing correct
        let direction_flipped = self.get_direction() == MoveDirection::RightToLeft;
        if direction_flipped {
            self.set_direction(MoveDirection::LeftToRight)?;
        }

        self.set_cgram_addr(index << 3)?;
        graph_data
            .iter()
            .try_for_each(|&line_data| self.send_command(CommandSet::WriteDataToRAM(line_data)))?;

        if direction_flipped {
            self.set_direction(MoveDirection::RightToLeft)?;
        }

        Ok(())
    }

    fn send_display_control(&mut self) -> Result<(), Sender::Error> {
        self.send_command(CommandSet::DisplayOnOff {
            display: self.get_display_state(),
            cursor: self.get_cursor_state(),
            cursor_blink: self.get_cursor_blink_state(),
        })
    }

    fn send_entry_mode(&mut self) -> Result<(), Sender::Error> {
        self.send_command(CommandSet::EntryModeSet(
            self.get_direction(),
            self.get_shift_type(),
        ))
    }

    pub fn set_display_state(&mut self, display: State) -> Result<(), Sender::Error> {
        self.state.set_display_state(display);
        self.send_display_control()
    }

    pub fn get_display_state(&self) -> State {
        self.state.get_display_state()
    }

    /// toggle entire display on and off
    pub fn toggle_display(&mut self) -> Result<(), Sender::Error> {
        match self.get_display_state() {
            State::Off => self.set_display_state(State::On),
            State::On => self.set_display_state(State::Off),
        }
    }

    pub fn set_cursor_state(&mut self, cursor: State) -> Result<(), Sender::Error> {
        self.state.set_cursor_state(cursor);
        self.send_display_control()
    }

    pub fn get_cursor_state(&self) -> State {
        self.state.get_cursor_state()
    }

    pub fn set_cursor_blink_state(&mut self, blink: State) -> Result<(), Sender::Error> {
        self.state.set_cursor_blink(blink);
        self.send_display_control()
    }

    pub fn get_cursor_blink_state(&self) -> State {
        self.state.get_cursor_blink()
    }

    /// Text direction of following writes
    pub fn set_direction(&mut self, dir: MoveDirection) -> Result<(), Sender::Error> {
        self.state.set_direction(dir);
        self.send_entry_mode()
    }

    pub fn get_direction(&self) -> MoveDirection {
        self.state.get_direction()
    }

    /// [`ShiftType::CursorAndDisplay`] turns autoscroll on, [`ShiftType::CursorOnly`] turns it off
    pub fn set_shift_type(&mut self, shift: ShiftType) -> Result<(), Sender::Error> {
        self.state.set_shift_type(shift);
        self.send_entry_mode()
    }

    pub fn get_shift_type(&self) -> ShiftType {
        self.state.get_shift_type()
    }

    /// Move cursor, or the whole display window, by one position without touching DDRAM
    pub fn shift_cursor_or_display(
        &mut self,
        shift_type: ShiftType,
        dir: MoveDirection,
    ) -> Result<(), Sender::Error> {
        self.send_command(CommandSet::CursorOrDisplayShift(shift_type, dir))
    }

    pub fn scroll_display_left(&mut self) -> Result<(), Sender::Error> {
        self.shift_cursor_or_display(ShiftType::CursorAndDisplay, MoveDirection::RightToLeft)
    }

    pub fn scroll_display_right(&mut self) -> Result<(), Sender::Error> {
        self.shift_cursor_or_display(ShiftType::CursorAndDisplay, MoveDirection::LeftToRight)
    }

    pub fn get_data_width(&self) -> DataWidth {
        self.state.get_data_width()
    }

    pub fn get_columns(&self) -> u8 {
        self.state.get_columns()
    }

    pub fn get_line_count(&self) -> u8 {
        self.state.get_line_count()
    }

    pub fn get_line_mode(&self) -> LineMode {
        self.state.get_line_mode()
    }

    pub fn get_font(&self) -> Font {
        self.state.get_font()
    }

    pub fn get_ram_type(&self) -> RAMType {
        self.state.get_ram_type()
    }

    /// Wait for specified milliseconds
    pub fn delay_ms(&mut self, ms: u32) {
        self.delayer.delay_ms(ms);
    }

    /// Wait for specified microseconds
    pub fn delay_us(&mut self, us: u32) {
        self.delayer.delay_us(us)
    }

    /// Give back the sender and the delay provider
    pub fn release(self) -> (Sender, Delayer) {
        (self.sender, self.delayer)
    }
}

impl<Sender, Delayer> core::fmt::Write for Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        s.bytes()
            .try_for_each(|byte| self.write_byte(byte).map(|_| ()))
            .map_err(|_| core::fmt::Error)
    }
}

impl<Sender, Delayer> embedded_io::ErrorType for Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Sender::Error: embedded_io::Error,
    Delayer: DelayNs,
{
    type Error = Sender::Error;
}

impl<Sender, Delayer> embedded_io::Write for Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Sender::Error: embedded_io::Error,
    Delayer: DelayNs,
{
    /// Bytes already latched by the controller are reported even when a later one fails,
    /// the error is only returned if nothing was written
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let mut accepted = 0;
        for &byte in buf {
            match self.write_byte(byte) {
                Ok(count) => accepted += count,
                Err(e) if accepted == 0 => return Err(e),
                Err(_) => break,
            }
        }
        Ok(accepted)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
