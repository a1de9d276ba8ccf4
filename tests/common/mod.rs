//! Recording fake for pins and delays
//!
//! Every pin write and every delay lands, in order, in one shared trace,
//! so tests can check both the pin-level protocol and its timing.

#![allow(dead_code)]

use std::{cell::RefCell, convert::Infallible, rc::Rc};

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, OutputPin},
};
use hd44780_driver::{lcd::Lcd, sender::ParallelSender};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinRole {
    Rs,
    Rw,
    En,
    Data(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Set(PinRole, bool),
    DelayUs(u32),
}

pub type Trace = Rc<RefCell<Vec<Event>>>;

pub struct FakePin {
    role: PinRole,
    trace: Trace,
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.trace.borrow_mut().push(Event::Set(self.role, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.trace.borrow_mut().push(Event::Set(self.role, true));
        Ok(())
    }
}

pub struct FakeDelay {
    trace: Trace,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.trace.borrow_mut().push(Event::DelayUs(ns.div_ceil(1_000)));
    }

    fn delay_us(&mut self, us: u32) {
        self.trace.borrow_mut().push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.trace.borrow_mut().push(Event::DelayUs(ms * 1_000));
    }
}

pub type FourPinLcd = Lcd<ParallelSender<FakePin, FakePin, 4>, FakeDelay>;
pub type EightPinLcd = Lcd<ParallelSender<FakePin, FakePin, 8>, FakeDelay>;

fn pin(role: PinRole, trace: &Trace) -> FakePin {
    FakePin {
        role,
        trace: trace.clone(),
    }
}

pub fn four_pin(with_rw: bool) -> (FourPinLcd, Trace) {
    let trace = Trace::default();
    let sender = ParallelSender::new_4pin(
        pin(PinRole::Rs, &trace),
        with_rw.then(|| pin(PinRole::Rw, &trace)),
        pin(PinRole::En, &trace),
        pin(PinRole::Data(0), &trace),
        pin(PinRole::Data(1), &trace),
        pin(PinRole::Data(2), &trace),
        pin(PinRole::Data(3), &trace),
    );
    let delayer = FakeDelay {
        trace: trace.clone(),
    };
    (Lcd::new(sender, delayer), trace)
}

pub fn eight_pin(with_rw: bool) -> (EightPinLcd, Trace) {
    let trace = Trace::default();
    let sender = ParallelSender::new_8pin(
        pin(PinRole::Rs, &trace),
        with_rw.then(|| pin(PinRole::Rw, &trace)),
        pin(PinRole::En, &trace),
        pin(PinRole::Data(0), &trace),
        pin(PinRole::Data(1), &trace),
        pin(PinRole::Data(2), &trace),
        pin(PinRole::Data(3), &trace),
        pin(PinRole::Data(4), &trace),
        pin(PinRole::Data(5), &trace),
        pin(PinRole::Data(6), &trace),
        pin(PinRole::Data(7), &trace),
    );
    let delayer = FakeDelay {
        trace: trace.clone(),
    };
    (Lcd::new(sender, delayer), trace)
}

/// Drain recorded events
pub fn take(trace: &Trace) -> Vec<Event> {
    trace.borrow_mut().drain(..).collect()
}

/// Levels seen by the controller on the falling edge of EN
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Latch {
    pub rs: bool,
    pub bits: u8,
    /// position of the falling edge in the trace
    pub index: usize,
}

pub fn latches(events: &[Event]) -> Vec<Latch> {
    let mut rs = false;
    let mut en = false;
    let mut data = [false; 8];
    let mut out = Vec::new();

    for (index, event) in events.iter().enumerate() {
        match *event {
            Event::Set(PinRole::Rs, level) => rs = level,
            Event::Set(PinRole::Data(i), level) => data[i] = level,
            Event::Set(PinRole::En, level) => {
                if en && !level {
                    let bits = data
                        .iter()
                        .enumerate()
                        .fold(0u8, |acc, (i, &on)| acc | ((on as u8) << i));
                    out.push(Latch { rs, bits, index });
                }
                en = level;
            }
            Event::Set(PinRole::Rw, _) | Event::DelayUs(_) => {}
        }
    }

    out
}

/// Pair up 4 bit latches into bytes, as (rs, byte)
pub fn nibbles_to_bytes(latches: &[Latch]) -> Vec<(bool, u8)> {
    assert!(latches.len() % 2 == 0, "odd number of nibbles");
    latches
        .chunks(2)
        .map(|pair| {
            assert_eq!(pair[0].rs, pair[1].rs, "RS changed within a byte");
            (pair[0].rs, (pair[0].bits << 4) | (pair[1].bits & 0x0F))
        })
        .collect()
}

/// Bytes carried by a trace, for either bus width
pub fn bytes(events: &[Event], pin_cnt: usize) -> Vec<(bool, u8)> {
    let latches = latches(events);
    match pin_cnt {
        8 => latches.iter().map(|latch| (latch.rs, latch.bits)).collect(),
        _ => nibbles_to_bytes(&latches),
    }
}

/// Delay following the settle time of a latch, if any
pub fn extra_delay_after(events: &[Event], latch: &Latch) -> Option<u32> {
    match events.get(latch.index + 2) {
        Some(Event::DelayUs(us)) => Some(*us),
        _ => None,
    }
}

/// The exact shape of one enable pulse, starting from the EN low before the rising edge
pub const PULSE: [Event; 6] = [
    Event::Set(PinRole::En, false),
    Event::DelayUs(1),
    Event::Set(PinRole::En, true),
    Event::DelayUs(1),
    Event::Set(PinRole::En, false),
    Event::DelayUs(100),
];

/// Assert every rising edge of EN sits inside a full [`PULSE`]
pub fn assert_pulses_well_formed(events: &[Event]) -> usize {
    let rising: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, event)| **event == Event::Set(PinRole::En, true))
        .map(|(index, _)| index)
        .collect();

    for &index in &rising {
        assert!(index >= 2, "rising edge without setup at {index}");
        assert_eq!(
            &events[index - 2..index + 4],
            &PULSE[..],
            "malformed pulse around event {index}"
        );
    }

    rising.len()
}
