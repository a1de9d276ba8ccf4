//! Drive a 20x4 HD44780 module with a STM32F411RET6 in 4 Pin Mode
//!
//! Prints a greeting on the last row, then counts seconds on the second row.

//! Wiring diagram
//!
//! HD44780 <-> STM32F411RET6
//!     Vss <-> GND
//!     Vdd <-> 5V
//!      V0 <-> potentiometer <-> 5V (to adjust the display contrast)
//!      RS <-> PA0
//!      RW <-> GND (not driven, pass `None` to the sender)
//!      EN <-> PA2 (and optionally connect to a 4.7 kOhm Pulldown resistor, to stable voltage level when STM32 reset)
//!      D4 <-> PA3
//!      D5 <-> PA4
//!      D6 <-> PA5
//!      D7 <-> PA6
//!       A <-> 5V
//!       K <-> GND

#![no_std]
#![no_main]

use core::fmt::Write;

use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f4xx_hal::{pac, prelude::*};

use hd44780_driver::{command::Font, lcd::Lcd, sender::ParallelSender};

// a heart shape
const HEART: [u8; 8] = [
    0b00000, 0b00000, 0b01010, 0b11111, 0b01110, 0b00100, 0b00000, 0b00000,
];

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(8.MHz()).freeze();

    let delayer = cp.SYST.delay(&clocks);

    let gpioa = dp.GPIOA.split();

    // Push-pull mode for a fast interaction, nothing is read back
    let rs_pin = gpioa.pa0.into_push_pull_output().erase();
    let en_pin = gpioa.pa2.into_push_pull_output().erase();
    let db4_pin = gpioa.pa3.into_push_pull_output().erase();
    let db5_pin = gpioa.pa4.into_push_pull_output().erase();
    let db6_pin = gpioa.pa5.into_push_pull_output().erase();
    let db7_pin = gpioa.pa6.into_push_pull_output().erase();

    let sender = ParallelSender::new_4pin(rs_pin, None, en_pin, db4_pin, db5_pin, db6_pin, db7_pin);

    let mut lcd = Lcd::new(sender, delayer);
    lcd.begin(20, 4, Font::Font5x8).unwrap();

    lcd.write_graph_to_cgram(0, &HEART).unwrap();

    // row 4 doesn't exist, it lands on the last row
    lcd.set_cursor_pos((0, 4)).unwrap();
    write!(lcd, "Hello, World!").unwrap();
    lcd.write_byte(0).unwrap();

    rprintln!("LCD ready");

    let mut seconds: u32 = 0;
    loop {
        lcd.set_cursor_pos((0, 1)).unwrap();
        write!(lcd, "{}", seconds).unwrap();

        lcd.delay_ms(1_000);
        seconds += 1;
    }
}
