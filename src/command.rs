//! HD44780 instruction set
//!
//! [`CommandSet`] names every instruction this driver issues, and lowers into a raw [`Command`]
//! (register selection plus 4 or 8 bits) which a [`SendCommand`](crate::sender::SendCommand) puts on the bus.

use crate::utils::{BitOps, BitState};

/// Instructions understood by the controller
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandSet {
    /// Clear DDRAM, set address counter to 0
    ClearDisplay,
    /// Set address counter to 0, undo display shift
    ReturnHome,
    EntryModeSet(MoveDirection, ShiftType),
    DisplayOnOff {
        display: State,
        cursor: State,
        cursor_blink: State,
    },
    CursorOrDisplayShift(ShiftType, MoveDirection),
    // this is not a command from datasheet,
    // it's the upper half of a function set, sent alone on a 4 pin bus during initialization
    HalfFunctionSet(DataWidth),
    FunctionSet(DataWidth, LineMode, Font),
    SetCGRAM(u8),
    SetDDRAM(u8),
    WriteDataToRAM(u8),
}

/// Address counter direction after a RAM write, or the direction of a shift
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveDirection {
    RightToLeft,
    #[default]
    LeftToRight,
}

/// What moves: the cursor alone, or the cursor together with the display window
///
/// In entry mode, [`ShiftType::CursorAndDisplay`] is "autoscroll"
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftType {
    #[default]
    CursorOnly,
    CursorAndDisplay,
}

#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    Off,
    #[default]
    On,
}

impl From<State> for BitState {
    fn from(state: State) -> Self {
        match state {
            State::Off => BitState::Clear,
            State::On => BitState::Set,
        }
    }
}

/// Bus width between MCU and controller
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataWidth {
    #[default]
    Bit4,
    Bit8,
}

/// Line mode as the controller understands it
///
/// 3 and 4 line modules are two-line controllers with a folded DDRAM,
/// so they run in [`LineMode::TwoLine`] as well
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineMode {
    #[default]
    OneLine,
    TwoLine,
}

impl LineMode {
    /// Line mode for a module with `line_count` visible rows
    pub fn from_line_count(line_count: u8) -> Self {
        match line_count {
            0 | 1 => LineMode::OneLine,
            _ => LineMode::TwoLine,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    #[default]
    Font5x8,
    /// Only available in [`LineMode::OneLine`]
    Font5x10,
}

/// The type of memory to access
#[derive(Clone, Copy, Default, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RAMType {
    /// Display Data RAM
    #[default]
    DDRam,
    /// Character Generator RAM
    CGRam,
}

/// Which controller register a transfer targets, driven on the RS line
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterSelection {
    /// Instruction register, RS low
    Command,
    /// Data register, RS high
    Data,
}

/// Payload of a transfer
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bits {
    /// A single nibble, only sent during initialization
    Bit4(u8),
    Bit8(u8),
}

/// A raw transfer, ready to be put on the bus
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    rs: RegisterSelection,
    data: Bits,
}

impl Command {
    /// Build a raw transfer
    pub fn new(rs: RegisterSelection, data: Bits) -> Self {
        Self { rs, data }
    }

    #[allow(missing_docs)]
    pub fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    #[allow(missing_docs)]
    pub fn get_data(&self) -> Bits {
        self.data
    }
}

fn instruction(raw_bits: u8) -> Command {
    Command::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::ClearDisplay => instruction(0b0000_0001),

            CommandSet::ReturnHome => instruction(0b0000_0010),

            CommandSet::EntryModeSet(dir, st) => {
                let mut raw_bits: u8 = 0b0000_0100;

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(1),
                    MoveDirection::LeftToRight => raw_bits.set_bit(1),
                };

                match st {
                    ShiftType::CursorOnly => raw_bits.clear_bit(0),
                    ShiftType::CursorAndDisplay => raw_bits.set_bit(0),
                };

                instruction(raw_bits)
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits: u8 = 0b0000_1000;

                raw_bits.put_bit(2, display.into());
                raw_bits.put_bit(1, cursor.into());
                raw_bits.put_bit(0, cursor_blink.into());

                instruction(raw_bits)
            }

            CommandSet::CursorOrDisplayShift(st, dir) => {
                let mut raw_bits: u8 = 0b0001_0000;

                match st {
                    ShiftType::CursorOnly => raw_bits.clear_bit(3),
                    ShiftType::CursorAndDisplay => raw_bits.set_bit(3),
                };

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(2),
                    MoveDirection::LeftToRight => raw_bits.set_bit(2),
                };

                instruction(raw_bits)
            }

            CommandSet::HalfFunctionSet(width) => {
                let nibble = match width {
                    DataWidth::Bit4 => 0b0010,
                    DataWidth::Bit8 => 0b0011,
                };

                Command::new(RegisterSelection::Command, Bits::Bit4(nibble))
            }

            CommandSet::FunctionSet(width, line, font) => {
                let mut raw_bits: u8 = 0b0010_0000;

                match width {
                    DataWidth::Bit4 => raw_bits.clear_bit(4),
                    DataWidth::Bit8 => raw_bits.set_bit(4),
                };

                match line {
                    LineMode::OneLine => raw_bits.clear_bit(3),
                    LineMode::TwoLine => raw_bits.set_bit(3),
                };

                // 5x10 dots cannot be displayed in two-line mode, F is ignored there
                match (font, line) {
                    (Font::Font5x10, LineMode::OneLine) => raw_bits.set_bit(2),
                    _ => raw_bits.clear_bit(2),
                };

                instruction(raw_bits)
            }

            // CGRAM address is 6 bits wide
            CommandSet::SetCGRAM(addr) => instruction(0b0100_0000 | (addr & 0b0011_1111)),

            // DDRAM address is 7 bits wide
            CommandSet::SetDDRAM(addr) => instruction(0b1000_0000 | (addr & 0b0111_1111)),

            CommandSet::WriteDataToRAM(data) => {
                Command::new(RegisterSelection::Data, Bits::Bit8(data))
            }
        }
    }
}
