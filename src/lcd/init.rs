use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, DataWidth, Font, MoveDirection, ShiftType, State},
    lcd::Lcd,
    sender::SendCommand,
    state::{LcdState, DEFAULT_ROW_OFFSETS, ROW_OFFSET_CAPACITY},
};

/// Wait after power on, datasheet asks for more than 40 ms once Vcc rises above 2.7 V,
/// and a MCU may start running well before that
pub const POWER_ON_DELAY_US: u32 = 50_000;

/// Waits after each of the three "force 8 bit" function sets, datasheet figure 23/24
pub const INIT_RETRY_DELAYS_US: [u32; 3] = [4_500, 4_500, 150];

/// [`Config`] is the init config of a [`Lcd`]
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    columns: u8,
    lines: u8,
    font: Font,
    row_offsets: [u8; ROW_OFFSET_CAPACITY],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: 16,
            lines: 2,
            font: Font::Font5x8,
            row_offsets: DEFAULT_ROW_OFFSETS,
        }
    }
}

#[allow(missing_docs)]
impl Config {
    pub fn get_columns(&self) -> u8 {
        self.columns
    }

    /// Informational only, the driver doesn't bound anything by it
    pub fn set_columns(mut self, columns: u8) -> Self {
        self.columns = columns;
        self
    }

    pub fn get_lines(&self) -> u8 {
        self.lines
    }

    /// 1 to 4, other value is clamped into this range by [`Lcd::begin_with_config`]
    pub fn set_lines(mut self, lines: u8) -> Self {
        self.lines = lines;
        self
    }

    pub fn get_font(&self) -> Font {
        self.font
    }

    /// [`Font::Font5x10`] only takes effect on one line modules
    pub fn set_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn get_row_offsets(&self) -> [u8; ROW_OFFSET_CAPACITY] {
        self.row_offsets
    }

    pub fn set_row_offsets(mut self, row_offsets: [u8; ROW_OFFSET_CAPACITY]) -> Self {
        self.row_offsets = row_offsets;
        self
    }
}

impl<Sender, Delayer> Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Create a [`Lcd`] driver, hardware is not touched until [`Lcd::begin`]
    pub fn new(sender: Sender, delayer: Delayer) -> Self {
        let state = LcdState::new(sender.get_data_width());

        Self {
            sender,
            delayer,
            state,
        }
    }

    /// Initialize LCD hardware, see [`Lcd::begin_with_config`]
    pub fn begin(&mut self, columns: u8, lines: u8, font: Font) -> Result<(), Sender::Error> {
        self.begin_with_config(
            Config::default()
                .set_columns(columns)
                .set_lines(lines)
                .set_font(font),
        )
    }

    /// Run the power on initialization sequence
    ///
    /// Leaves the display cleared and on, cursor and blink off, writing left to right without autoscroll.
    /// Calling it again restarts the whole sequence.
    pub fn begin_with_config(&mut self, config: Config) -> Result<(), Sender::Error> {
        self.state.set_columns(config.get_columns());
        self.state.set_line_count(config.get_lines());
        self.state.set_font(config.get_font());
        self.state.set_row_offsets(config.get_row_offsets());

        let data_width = self.state.get_data_width();
        let function_set =
            CommandSet::FunctionSet(data_width, self.get_line_mode(), self.get_font());

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "lcd init: {} lines, {}, {}",
            self.get_line_count(),
            data_width,
            self.get_font()
        );

        self.delayer.delay_us(POWER_ON_DELAY_US);
        self.sender.prepare_bus()?;

        // in initialization process, we'd better use "raw command", to strictly follow datasheet
        // only first 3 or 4 commands are different between 4 pin and 8 pin mode
        match data_width {
            DataWidth::Bit4 => {
                // controller may be in any state, force it into 8 bit mode first
                for delay_us in INIT_RETRY_DELAYS_US {
                    self.sender.send_and_delay(
                        CommandSet::HalfFunctionSet(DataWidth::Bit8),
                        &mut self.delayer,
                        delay_us,
                    )?;
                }

                self.sender
                    .send(CommandSet::HalfFunctionSet(DataWidth::Bit4), &mut self.delayer)?;
            }

            DataWidth::Bit8 => {
                for delay_us in INIT_RETRY_DELAYS_US {
                    self.sender
                        .send_and_delay(function_set, &mut self.delayer, delay_us)?;
                }
            }
        }

        // earlier function sets may not be latched, send the real one again
        self.sender.send(function_set, &mut self.delayer)?;

        self.state.set_display_state(State::On);
        self.state.set_cursor_state(State::Off);
        self.state.set_cursor_blink(State::Off);
        self.send_display_control()?;

        self.clear_display()?;

        self.state.set_direction(MoveDirection::LeftToRight);
        self.state.set_shift_type(ShiftType::CursorOnly);
        self.send_entry_mode()
    }
}
