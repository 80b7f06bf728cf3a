//! Hex inverter procedures (74HC14 Schmitt-trigger, 74HC04 plain).
//!
//! Both parts share the socket topology and the classification rule; they
//! differ only in how many low/high sample pairs are taken per gate.
//!
//! Per gate, for each repeat:
//!
//! 1. drive the input LOW, settle, sample: output should be HIGH;
//! 2. drive the input HIGH, settle, sample: output should be LOW.
//!
//! A gate passes only if *every* sample matches (strict unanimity).  A
//! single glitch fails the gate: on a socket with poor contact a false
//! "bad" is cheaper than a false "good".  Any HIGH sample counts as contact.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use super::sample::SampleSet;
use super::{configure_drive, configure_sense, DeviceTest, TestReport, UnitVerdict, SETTLE_MS};
use crate::app::ports::GpioPort;
use crate::config::ChipFamily;
use crate::error::GpioError;
use crate::pins::{InverterPins, HEX_INVERTER_GATES};

/// Upper bound on low/high pairs per gate.
const MAX_REPEATS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InverterTest {
    family: ChipFamily,
    gates: &'static [InverterPins; 6],
    repeats: usize,
}

/// Samples of one gate, split by the level the output should show.
#[derive(Debug, Default)]
struct GateSamples {
    /// Input LOW → output expected HIGH.
    high_phase: SampleSet<MAX_REPEATS>,
    /// Input HIGH → output expected LOW.
    low_phase: SampleSet<MAX_REPEATS>,
}

impl GateSamples {
    fn contact(&self) -> bool {
        self.high_phase.any_high() || self.low_phase.any_high()
    }

    fn passed(&self) -> bool {
        self.low_phase.unanimous(PinState::Low) && self.high_phase.unanimous(PinState::High)
    }
}

impl InverterTest {
    /// 74HC14: three sample pairs per gate.
    pub const fn hc14() -> Self {
        Self { family: ChipFamily::Hc14, gates: &HEX_INVERTER_GATES, repeats: 3 }
    }

    /// 74HC04: one sample pair per gate.  Faster, but a single transient
    /// decides the gate.
    pub const fn hc04() -> Self {
        Self { family: ChipFamily::Hc04, gates: &HEX_INVERTER_GATES, repeats: 1 }
    }

    fn sample_gate<H: GpioPort + DelayNs>(&self, hw: &mut H, gate: InverterPins) -> GateSamples {
        let mut samples = GateSamples::default();
        for _ in 0..self.repeats {
            hw.write(gate.input, PinState::Low);
            hw.delay_ms(SETTLE_MS);
            samples.high_phase.record(hw.read(gate.output));

            hw.write(gate.input, PinState::High);
            hw.delay_ms(SETTLE_MS);
            samples.low_phase.record(hw.read(gate.output));
        }
        hw.write(gate.input, PinState::Low);
        samples
    }
}

impl DeviceTest for InverterTest {
    fn family(&self) -> ChipFamily {
        self.family
    }

    fn configure<G: GpioPort>(&self, gpio: &mut G) -> Result<(), GpioError> {
        for gate in self.gates {
            configure_drive(gpio, gate.input, PinState::Low)?;
            configure_sense(gpio, gate.output)?;
        }
        Ok(())
    }

    fn run<H: GpioPort + DelayNs>(&self, hw: &mut H) -> TestReport {
        let mut contact = false;
        let mut verdicts = heapless::Vec::new();

        for (unit, gate) in self.gates.iter().enumerate() {
            let samples = self.sample_gate(hw, *gate);
            contact |= samples.contact();
            let _ = verdicts.push(UnitVerdict { unit: unit as u8, passed: samples.passed() });
        }

        TestReport::new(contact, verdicts)
    }
}
