use crate::command::{DataWidth, Font, LineMode, MoveDirection, RAMType, ShiftType, State};

/// Size of the row offset table
pub(crate) const ROW_OFFSET_CAPACITY: usize = 5;

/// DDRAM start address of each row on standard 1 to 4 line modules
pub const DEFAULT_ROW_OFFSETS: [u8; ROW_OFFSET_CAPACITY] = [0x00, 0x40, 0x14, 0x54, 0x54];

/// Last values commanded to the controller
///
/// The controller can't be read back, so this is the only record of its registers.
pub(crate) struct LcdState {
    data_width: DataWidth,
    columns: u8,
    line_count: u8,
    font: Font,
    display_on: State,
    cursor_on: State,
    cursor_blink: State,
    direction: MoveDirection,
    shift_type: ShiftType,
    row_offsets: [u8; ROW_OFFSET_CAPACITY],
    ram_type: RAMType,
}

impl LcdState {
    pub(crate) fn new(data_width: DataWidth) -> Self {
        Self {
            data_width,
            columns: 16,
            line_count: 1,
            font: Font::Font5x8,
            display_on: State::On,
            cursor_on: State::Off,
            cursor_blink: State::Off,
            direction: MoveDirection::LeftToRight,
            shift_type: ShiftType::CursorOnly,
            row_offsets: DEFAULT_ROW_OFFSETS,
            ram_type: RAMType::DDRam,
        }
    }

    pub(crate) fn get_data_width(&self) -> DataWidth {
        self.data_width
    }

    pub(crate) fn get_columns(&self) -> u8 {
        self.columns
    }

    /// informational only, nothing is bounded by it
    pub(crate) fn set_columns(&mut self, columns: u8) {
        self.columns = columns;
    }

    pub(crate) fn get_line_count(&self) -> u8 {
        self.line_count
    }

    /// line count is clamped into 1..=4
    pub(crate) fn set_line_count(&mut self, line_count: u8) {
        self.line_count = line_count.clamp(1, 4);
    }

    pub(crate) fn get_line_mode(&self) -> LineMode {
        LineMode::from_line_count(self.line_count)
    }

    pub(crate) fn get_font(&self) -> Font {
        self.font
    }

    pub(crate) fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    pub(crate) fn get_display_state(&self) -> State {
        self.display_on
    }

    pub(crate) fn set_display_state(&mut self, display: State) {
        self.display_on = display;
    }

    pub(crate) fn get_cursor_state(&self) -> State {
        self.cursor_on
    }

    pub(crate) fn set_cursor_state(&mut self, cursor: State) {
        self.cursor_on = cursor;
    }

    pub(crate) fn get_cursor_blink(&self) -> State {
        self.cursor_blink
    }

    pub(crate) fn set_cursor_blink(&mut self, blink: State) {
        self.cursor_blink = blink;
    }

    pub(crate) fn get_direction(&self) -> MoveDirection {
        self.direction
    }

    pub(crate) fn set_direction(&mut self, dir: MoveDirection) {
        self.direction = dir;
    }

    pub(crate) fn get_shift_type(&self) -> ShiftType {
        self.shift_type
    }

    pub(crate) fn set_shift_type(&mut self, shift: ShiftType) {
        self.shift_type = shift;
    }

    pub(crate) fn get_row_offsets(&self) -> [u8; ROW_OFFSET_CAPACITY] {
        self.row_offsets
    }

    pub(crate) fn set_row_offsets(&mut self, offsets: [u8; ROW_OFFSET_CAPACITY]) {
        self.row_offsets = offsets;
    }

    pub(crate) fn get_ram_type(&self) -> RAMType {
        self.ram_type
    }

    pub(crate) fn set_ram_type(&mut self, ram_type: RAMType) {
        self.ram_type = ram_type;
    }

    /// Last row reachable with current line count and offset table
    pub(crate) fn last_row(&self) -> u8 {
        (self.line_count as usize).min(ROW_OFFSET_CAPACITY) as u8 - 1
    }

    /// DDRAM address of `pos` (column, row)
    ///
    /// row is clamped to the last row, column is passed through as is
    pub(crate) fn ddram_addr(&self, pos: (u8, u8)) -> u8 {
        let row = pos.1.min(self.last_row());
        self.row_offsets[row as usize].wrapping_add(pos.0)
    }
}
