//! Exact per-pin transactions, checked with embedded-hal-mock

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::MockError;
use hd44780_driver::{command::Font, lcd::Lcd, sender::ParallelSender, Error};
use std::io::ErrorKind;

fn pin(levels: &[PinState]) -> PinMock {
    let transactions: Vec<PinTransaction> =
        levels.iter().map(|&level| PinTransaction::set(level)).collect();
    PinMock::new(&transactions)
}

fn broken() -> MockError {
    MockError::Io(ErrorKind::BrokenPipe)
}

/// EN transactions of `count` enable pulses
fn pulses(count: usize) -> PinMock {
    let levels: Vec<PinState> = (0..count)
        .flat_map(|_| [PinState::Low, PinState::High, PinState::Low])
        .collect();
    pin(&levels)
}

fn done_all<const N: usize>(
    sender: ParallelSender<PinMock, PinMock, N>,
) {
    let (mut rs, rw, mut en, mut db_pins) = sender.release();
    rs.done();
    if let Some(mut rw) = rw {
        rw.done();
    }
    en.done();
    db_pins.iter_mut().for_each(|pin| pin.done());
}

#[test]
fn eight_pin_clear_display() {
    use PinState::{High, Low};

    let sender = ParallelSender::new_8pin(
        pin(&[Low]),
        None,
        pulses(1),
        pin(&[High]),
        pin(&[Low]),
        pin(&[Low]),
        pin(&[Low]),
        pin(&[Low]),
        pin(&[Low]),
        pin(&[Low]),
        pin(&[Low]),
    );
    let mut lcd = Lcd::new(sender, NoopDelay::new());

    lcd.clear_display().unwrap();

    let (sender, _) = lcd.release();
    done_all(sender);
}

#[test]
fn four_pin_write_with_rw_wired() {
    use PinState::{High, Low};

    // 0xAB goes out as 0xA then 0xB
    let sender = ParallelSender::new_4pin(
        pin(&[High]),
        Some(pin(&[Low])),
        pulses(2),
        pin(&[Low, High]),
        pin(&[High, High]),
        pin(&[Low, Low]),
        pin(&[High, High]),
    );
    let mut lcd = Lcd::new(sender, NoopDelay::new());

    assert_eq!(lcd.write_byte(0xAB).unwrap(), 1);

    let (sender, _) = lcd.release();
    done_all(sender);
}

#[test]
fn four_pin_set_cursor_clamps_row_before_begin() {
    use PinState::{High, Low};

    // a fresh driver assumes one line, row 5 lands on row 0: 0x80 | 0x00 | 3 = 0x83
    let sender = ParallelSender::new_4pin(
        pin(&[Low]),
        None,
        pulses(2),
        pin(&[Low, High]),
        pin(&[Low, High]),
        pin(&[Low, Low]),
        pin(&[High, Low]),
    );
    let mut lcd = Lcd::new(sender, NoopDelay::new());

    lcd.set_cursor_pos((3, 5)).unwrap();

    let (sender, _) = lcd.release();
    done_all(sender);
}

#[test]
fn four_pin_write_stops_at_failed_data_pin() {
    use PinState::{High, Low};

    // 0xAB starts with DB4 low, which fails, so EN is never raised
    let sender = ParallelSender::new_4pin(
        pin(&[High]),
        None,
        pulses(0),
        PinMock::new(&[PinTransaction::set(Low).with_error(broken())]),
        pin(&[]),
        pin(&[]),
        pin(&[]),
    );
    let mut lcd = Lcd::new(sender, NoopDelay::new());

    let result = lcd.write_byte(0xAB);
    assert!(
        matches!(result, Err(Error::Pin(MockError::Io(ErrorKind::BrokenPipe)))),
        "pin failure must surface as Error::Pin, got {result:?}"
    );

    let (sender, _) = lcd.release();
    done_all(sender);
}

#[test]
fn eight_pin_begin_stops_at_failed_enable() {
    use PinState::{High, Low};

    // bus idles, 0x38 is put on the data lines, then EN fails on the first pulse
    let sender = ParallelSender::new_8pin(
        pin(&[Low, Low]),
        None,
        PinMock::new(&[
            PinTransaction::set(Low),
            PinTransaction::set(Low).with_error(broken()),
        ]),
        pin(&[Low]),
        pin(&[Low]),
        pin(&[Low]),
        pin(&[High]),
        pin(&[High]),
        pin(&[High]),
        pin(&[Low]),
        pin(&[Low]),
    );
    let mut lcd = Lcd::new(sender, NoopDelay::new());

    let result = lcd.begin(16, 2, Font::Font5x8);
    assert!(
        matches!(result, Err(Error::Pin(MockError::Io(ErrorKind::BrokenPipe)))),
        "init must stop at the first pin failure, got {result:?}"
    );

    let (sender, _) = lcd.release();
    done_all(sender);
}

#[test]
fn io_write_reports_bytes_latched_before_failure() {
    use PinState::{High, Low};

    // 0x41 goes out as 0x4 then 0x1, RS fails on 0x42
    let sender = ParallelSender::new_4pin(
        PinMock::new(&[
            PinTransaction::set(High),
            PinTransaction::set(High).with_error(broken()),
        ]),
        None,
        pulses(2),
        pin(&[Low, High]),
        pin(&[Low, Low]),
        pin(&[High, Low]),
        pin(&[Low, Low]),
    );
    let mut lcd = Lcd::new(sender, NoopDelay::new());

    assert_eq!(embedded_io::Write::write(&mut lcd, b"AB").unwrap(), 1);

    let (sender, _) = lcd.release();
    done_all(sender);
}

#[test]
fn io_write_fails_when_first_byte_fails() {
    use PinState::High;

    let sender = ParallelSender::new_4pin(
        PinMock::new(&[PinTransaction::set(High).with_error(broken())]),
        None,
        pulses(0),
        pin(&[]),
        pin(&[]),
        pin(&[]),
        pin(&[]),
    );
    let mut lcd = Lcd::new(sender, NoopDelay::new());

    let result = embedded_io::Write::write(&mut lcd, b"AB");
    assert!(matches!(result, Err(Error::Pin(_))), "got {result:?}");

    let (sender, _) = lcd.release();
    done_all(sender);
}
