use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{
    command::{Bits, Command, DataWidth, RegisterSelection},
    error::Error,
    utils::{BitOps, BitState},
};

use super::{SendCommand, COMMAND_SETTLE_US, ENABLE_PULSE_US, ENABLE_SETUP_US};

/// 4-pin/8-pin parallel sender
///
/// Data pin `i` carries bit `i` of every nibble (4 pins) or byte (8 pins) put on the bus.
/// RW pin is optional, pass `None` if it's tied to ground.
pub struct ParallelSender<ControlPin, DBPin, const PIN_CNT: usize>
where
    ControlPin: OutputPin,
    DBPin: OutputPin<Error = ControlPin::Error>,
{
    rs_pin: ControlPin,
    rw_pin: Option<ControlPin>,
    en_pin: ControlPin,
    db_pins: [DBPin; PIN_CNT],
}

impl<ControlPin, DBPin> ParallelSender<ControlPin, DBPin, 4>
where
    ControlPin: OutputPin,
    DBPin: OutputPin<Error = ControlPin::Error>,
{
    /// Data pins are the upper 4 data lines of the LCD
    pub fn new_4pin(
        rs: ControlPin,
        rw: Option<ControlPin>,
        en: ControlPin,
        db4: DBPin,
        db5: DBPin,
        db6: DBPin,
        db7: DBPin,
    ) -> Self {
        Self {
            rs_pin: rs,
            rw_pin: rw,
            en_pin: en,
            db_pins: [db4, db5, db6, db7],
        }
    }
}

impl<ControlPin, DBPin> ParallelSender<ControlPin, DBPin, 8>
where
    ControlPin: OutputPin,
    DBPin: OutputPin<Error = ControlPin::Error>,
{
    #[allow(missing_docs)]
    #[allow(clippy::too_many_arguments)]
    pub fn new_8pin(
        rs: ControlPin,
        rw: Option<ControlPin>,
        en: ControlPin,
        db0: DBPin,
        db1: DBPin,
        db2: DBPin,
        db3: DBPin,
        db4: DBPin,
        db5: DBPin,
        db6: DBPin,
        db7: DBPin,
    ) -> Self {
        Self {
            rs_pin: rs,
            rw_pin: rw,
            en_pin: en,
            db_pins: [db0, db1, db2, db3, db4, db5, db6, db7],
        }
    }
}

impl<ControlPin, DBPin, const PIN_CNT: usize> ParallelSender<ControlPin, DBPin, PIN_CNT>
where
    ControlPin: OutputPin,
    DBPin: OutputPin<Error = ControlPin::Error>,
{
    /// Give the pins back, as (RS, RW, EN, data pins)
    #[allow(clippy::type_complexity)]
    pub fn release(self) -> (ControlPin, Option<ControlPin>, ControlPin, [DBPin; PIN_CNT]) {
        (self.rs_pin, self.rw_pin, self.en_pin, self.db_pins)
    }

    fn push_bits(&mut self, raw_bits: u8) -> Result<(), Error<ControlPin::Error>> {
        self.db_pins
            .iter_mut()
            .enumerate()
            .try_for_each(|(index, pin)| match raw_bits.check_bit(index as u8) {
                BitState::Set => pin.set_high(),
                BitState::Clear => pin.set_low(),
            })
            .map_err(Error::Pin)
    }

    fn pulse_enable(&mut self, delayer: &mut impl DelayNs) -> Result<(), Error<ControlPin::Error>> {
        self.en_pin.set_low().map_err(Error::Pin)?;
        delayer.delay_us(ENABLE_SETUP_US);
        self.en_pin.set_high().map_err(Error::Pin)?;
        delayer.delay_us(ENABLE_PULSE_US);
        self.en_pin.set_low().map_err(Error::Pin)?;
        delayer.delay_us(COMMAND_SETTLE_US);
        Ok(())
    }

    fn push_and_pulse(
        &mut self,
        raw_bits: u8,
        delayer: &mut impl DelayNs,
    ) -> Result<(), Error<ControlPin::Error>> {
        self.push_bits(raw_bits)?;
        self.pulse_enable(delayer)
    }
}

impl<ControlPin, DBPin, Delayer, const PIN_CNT: usize> SendCommand<Delayer>
    for ParallelSender<ControlPin, DBPin, PIN_CNT>
where
    ControlPin: OutputPin,
    DBPin: OutputPin<Error = ControlPin::Error>,
    Delayer: DelayNs,
{
    type Error = Error<ControlPin::Error>;

    fn get_data_width(&self) -> DataWidth {
        match PIN_CNT {
            8 => DataWidth::Bit8,
            _ => DataWidth::Bit4,
        }
    }

    fn prepare_bus(&mut self) -> Result<(), Self::Error> {
        self.rs_pin.set_low().map_err(Error::Pin)?;
        self.en_pin.set_low().map_err(Error::Pin)?;
        if let Some(rw_pin) = self.rw_pin.as_mut() {
            rw_pin.set_low().map_err(Error::Pin)?;
        }
        Ok(())
    }

    fn send(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut Delayer,
    ) -> Result<(), Self::Error> {
        let command = command.into();

        match command.get_register_selection() {
            RegisterSelection::Command => self.rs_pin.set_low().map_err(Error::Pin)?,
            RegisterSelection::Data => self.rs_pin.set_high().map_err(Error::Pin)?,
        }

        // write only driver, RW always stays low
        if let Some(rw_pin) = self.rw_pin.as_mut() {
            rw_pin.set_low().map_err(Error::Pin)?;
        }

        match (PIN_CNT, command.get_data()) {
            (8, Bits::Bit8(raw_bits)) => self.push_and_pulse(raw_bits, delayer),
            // a lone nibble is the upper half of an instruction
            (8, Bits::Bit4(raw_bits)) => self.push_and_pulse(raw_bits << 4, delayer),
            (_, Bits::Bit8(raw_bits)) => {
                self.push_and_pulse(raw_bits.high_nibble(), delayer)?;
                self.push_and_pulse(raw_bits.low_nibble(), delayer)
            }
            (_, Bits::Bit4(raw_bits)) => self.push_and_pulse(raw_bits.low_nibble(), delayer),
        }
    }
}
