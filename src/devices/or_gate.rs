//! Quad 2-input OR procedure (74HC32).
//!
//! Each gate is walked through its full truth table.  No partial credit:
//! a gate with one wrong row is as dead as a gate with four.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use super::sample::SampleSet;
use super::{configure_drive, configure_sense, DeviceTest, TestReport, UnitVerdict, SETTLE_MS};
use crate::app::ports::GpioPort;
use crate::config::ChipFamily;
use crate::error::GpioError;
use crate::pins::{GatePins, QUAD_OR_GATES};

/// Input combinations in application order.
const TRUTH_TABLE: [(PinState, PinState); 4] = [
    (PinState::Low, PinState::Low),
    (PinState::Low, PinState::High),
    (PinState::High, PinState::Low),
    (PinState::High, PinState::High),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrGateTest {
    gates: &'static [GatePins; 4],
}

impl OrGateTest {
    pub const fn hc32() -> Self {
        Self { gates: &QUAD_OR_GATES }
    }

    /// Returns `(any_high, passed)` for one gate.
    fn test_gate<H: GpioPort + DelayNs>(&self, hw: &mut H, gate: GatePins) -> (bool, bool) {
        let mut observed = SampleSet::<4>::new();
        let mut matches = 0;

        for (a, b) in TRUTH_TABLE {
            hw.write(gate.in1, a);
            hw.write(gate.in2, b);
            hw.delay_ms(SETTLE_MS);
            let level = hw.read(gate.output);
            observed.record(level);

            let expected = PinState::from(a == PinState::High || b == PinState::High);
            if level == expected {
                matches += 1;
            }
        }

        hw.write(gate.in1, PinState::Low);
        hw.write(gate.in2, PinState::Low);

        (observed.any_high(), matches == TRUTH_TABLE.len())
    }
}

impl DeviceTest for OrGateTest {
    fn family(&self) -> ChipFamily {
        ChipFamily::Hc32
    }

    fn configure<G: GpioPort>(&self, gpio: &mut G) -> Result<(), GpioError> {
        for gate in self.gates {
            configure_drive(gpio, gate.in1, PinState::Low)?;
            configure_drive(gpio, gate.in2, PinState::Low)?;
            configure_sense(gpio, gate.output)?;
        }
        Ok(())
    }

    fn run<H: GpioPort + DelayNs>(&self, hw: &mut H) -> TestReport {
        let mut contact = false;
        let mut verdicts = heapless::Vec::new();

        for (unit, gate) in self.gates.iter().enumerate() {
            let (any_high, passed) = self.test_gate(hw, *gate);
            contact |= any_high;
            let _ = verdicts.push(UnitVerdict { unit: unit as u8, passed });
        }

        TestReport::new(contact, verdicts)
    }
}
