//! Behavioural socket simulator for integration tests.
//!
//! Models the chip sitting in the socket from the levels the tester is
//! currently driving, so the real test procedures run unmodified against
//! it.  Faults are injected per pin and override whatever the chip model
//! would produce.  Every indicator write and every settle wait is
//! recorded for assertions.

use std::collections::HashMap;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use ictester::app::events::AppEvent;
use ictester::app::ports::{Direction, EventSink, GpioPort, Pull, StatusPort};
use ictester::error::GpioError;
use ictester::pins::{GpioNum, HEX_INVERTER_GATES, MAX_GPIO, QUAD_OR_GATES, SIPO_REGISTER};
use ictester::status::Rgb;

// ── Socket contents ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chip {
    Empty,
    /// 74HC04 / 74HC14 (identical logic at bench speed).
    HexInverter,
    /// A non-inverting part in the inverter footprint (e.g. 74HC07).
    HexBuffer,
    QuadOr,
    ShiftRegister,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    StuckHigh(GpioNum),
    StuckLow(GpioNum),
}

// ── MockSocket ────────────────────────────────────────────────

pub struct MockSocket {
    pub chip: Chip,
    pub faults: Vec<Fault>,
    pub directions: HashMap<GpioNum, Direction>,
    pub pulls: HashMap<GpioNum, Pull>,
    pub driven: HashMap<GpioNum, PinState>,
    pub colours: Vec<Rgb>,
    pub elapsed_ns: u64,
    stages: u8,
}

#[allow(dead_code)]
impl MockSocket {
    pub fn new(chip: Chip) -> Self {
        Self {
            chip,
            faults: Vec::new(),
            directions: HashMap::new(),
            pulls: HashMap::new(),
            driven: HashMap::new(),
            colours: Vec::new(),
            elapsed_ns: 0,
            stages: 0,
        }
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.faults.push(fault);
        self
    }

    /// Swap the socket contents mid-run (chip inserted or pulled).
    pub fn insert(&mut self, chip: Chip) {
        self.chip = chip;
        self.stages = 0;
    }

    pub fn last_colour(&self) -> Option<Rgb> {
        self.colours.last().copied()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }

    pub fn level(&self, pin: GpioNum) -> PinState {
        self.driven.get(&pin).copied().unwrap_or(PinState::Low)
    }

    fn high(&self, pin: GpioNum) -> bool {
        self.level(pin) == PinState::High
    }

    fn chip_output(&self, pin: GpioNum) -> bool {
        match self.chip {
            Chip::Empty => false,
            Chip::HexInverter => HEX_INVERTER_GATES
                .iter()
                .find(|g| g.output == pin)
                .is_some_and(|g| !self.high(g.input)),
            Chip::HexBuffer => HEX_INVERTER_GATES
                .iter()
                .find(|g| g.output == pin)
                .is_some_and(|g| self.high(g.input)),
            Chip::QuadOr => QUAD_OR_GATES
                .iter()
                .find(|g| g.output == pin)
                .is_some_and(|g| self.high(g.in1) || self.high(g.in2)),
            Chip::ShiftRegister => SIPO_REGISTER
                .outputs
                .iter()
                .position(|&q| q == pin)
                .is_some_and(|bit| self.stages & (1 << bit) != 0),
        }
    }
}

impl GpioPort for MockSocket {
    fn configure(
        &mut self,
        pin: GpioNum,
        direction: Direction,
        pull: Pull,
    ) -> Result<(), GpioError> {
        if !(0..=MAX_GPIO).contains(&pin) {
            return Err(GpioError::InvalidPin(pin));
        }
        self.directions.insert(pin, direction);
        self.pulls.insert(pin, pull);
        Ok(())
    }

    fn write(&mut self, pin: GpioNum, level: PinState) {
        let before = self.level(pin);
        self.driven.insert(pin, level);

        if self.chip != Chip::ShiftRegister {
            return;
        }
        let reg = SIPO_REGISTER;
        if pin == reg.clear && level == PinState::Low {
            self.stages = 0;
        } else if pin == reg.clock
            && before == PinState::Low
            && level == PinState::High
            && self.high(reg.clear)
        {
            let bit = u8::from(self.high(reg.data[0]) && self.high(reg.data[1]));
            self.stages = (self.stages << 1) | bit;
        }
    }

    fn read(&mut self, pin: GpioNum) -> PinState {
        for fault in &self.faults {
            match *fault {
                Fault::StuckHigh(p) if p == pin => return PinState::High,
                Fault::StuckLow(p) if p == pin => return PinState::Low,
                _ => {}
            }
        }
        PinState::from(self.chip_output(pin))
    }
}

impl DelayNs for MockSocket {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}

impl StatusPort for MockSocket {
    fn set_status(&mut self, colour: Rgb) {
        self.colours.push(colour);
    }
}

// ── EventLog ──────────────────────────────────────────────────

#[derive(Default)]
pub struct EventLog {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::StatusChanged { .. }))
            .count()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
