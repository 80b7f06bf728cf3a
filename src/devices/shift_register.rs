//! 8-bit serial-in/parallel-out shift register procedure (74HC164).
//!
//! The whole package is one unit:
//!
//! 1. pulse CLEAR (active LOW), settle, sample the outputs 3×: expect all 0;
//! 2. hold both data inputs HIGH and clock eight 1-bits through;
//! 3. drop the data inputs, settle, sample the outputs 3×: expect all 1.
//!
//! Classification uses the last sample of each phase and tolerates one bad
//! output per phase (≥ 7 of 8), so a single flaky socket contact does not
//! condemn an otherwise healthy register.
//!
//! A HIGH bit after clear marks contact but does not by itself fail the
//! part; only the ≥ 7-zeros rule on the final post-clear sample does.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use super::sample::ParallelSample;
use super::{
    configure_drive, configure_sense, DeviceTest, TestReport, UnitVerdict, CLOCK_HOLD_MS,
    CLOCK_SETUP_MS, SETTLE_MS,
};
use crate::app::ports::GpioPort;
use crate::config::ChipFamily;
use crate::error::GpioError;
use crate::pins::{ShiftRegisterPins, SIPO_REGISTER};

/// Samples taken per phase.
const SAMPLES_PER_PHASE: usize = 3;
/// Bits to clock in: one per stage.
const STAGES: usize = 8;
/// Minimum matching outputs per phase.
pub const MIN_MATCHING_OUTPUTS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftRegisterTest {
    pins: ShiftRegisterPins,
}

/// Raw observations of one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterSamples {
    pub after_clear: [ParallelSample; SAMPLES_PER_PHASE],
    pub after_shift: [ParallelSample; SAMPLES_PER_PHASE],
}

impl RegisterSamples {
    pub fn contact(&self) -> bool {
        self.after_clear.iter().chain(&self.after_shift).any(|s| s.any_high())
    }

    /// Final post-clear sample has ≥ 7 zeros and final post-shift sample
    /// has ≥ 7 ones.
    pub fn passed(&self) -> bool {
        let cleared = self.after_clear[SAMPLES_PER_PHASE - 1];
        let filled = self.after_shift[SAMPLES_PER_PHASE - 1];
        cleared.zeros() >= MIN_MATCHING_OUTPUTS && filled.ones() >= MIN_MATCHING_OUTPUTS
    }
}

impl ShiftRegisterTest {
    pub const fn hc164() -> Self {
        Self { pins: SIPO_REGISTER }
    }

    fn set_data<G: GpioPort>(&self, gpio: &mut G, level: PinState) {
        for pin in self.pins.data {
            gpio.write(pin, level);
        }
    }

    fn capture_phase<G: GpioPort>(&self, gpio: &mut G) -> [ParallelSample; SAMPLES_PER_PHASE] {
        core::array::from_fn(|_| ParallelSample::capture(gpio, &self.pins.outputs))
    }

    fn clear<H: GpioPort + DelayNs>(&self, hw: &mut H) {
        hw.write(self.pins.clear, PinState::Low);
        hw.write(self.pins.clear, PinState::High);
        hw.delay_ms(SETTLE_MS);
    }

    fn clock_in_ones<H: GpioPort + DelayNs>(&self, hw: &mut H) {
        for _ in 0..STAGES {
            self.set_data(hw, PinState::High);
            hw.delay_ms(CLOCK_SETUP_MS);
            hw.write(self.pins.clock, PinState::High);
            hw.delay_ms(CLOCK_HOLD_MS);
            hw.write(self.pins.clock, PinState::Low);
            hw.delay_ms(CLOCK_SETUP_MS);
        }
    }

    /// Drive the full stimulus sequence and return what the outputs showed.
    pub fn sample<H: GpioPort + DelayNs>(&self, hw: &mut H) -> RegisterSamples {
        self.clear(hw);
        let after_clear = self.capture_phase(hw);

        self.clock_in_ones(hw);

        self.set_data(hw, PinState::Low);
        hw.delay_ms(SETTLE_MS);
        let after_shift = self.capture_phase(hw);

        self.park(hw);
        RegisterSamples { after_clear, after_shift }
    }

    /// Idle levels: data LOW, clock LOW, clear released.
    fn park<G: GpioPort>(&self, gpio: &mut G) {
        self.set_data(gpio, PinState::Low);
        gpio.write(self.pins.clock, PinState::Low);
        gpio.write(self.pins.clear, PinState::High);
    }
}

impl DeviceTest for ShiftRegisterTest {
    fn family(&self) -> ChipFamily {
        ChipFamily::Hc164
    }

    fn configure<G: GpioPort>(&self, gpio: &mut G) -> Result<(), GpioError> {
        for pin in self.pins.data {
            configure_drive(gpio, pin, PinState::Low)?;
        }
        configure_drive(gpio, self.pins.clock, PinState::Low)?;
        configure_drive(gpio, self.pins.clear, PinState::High)?;
        for pin in self.pins.outputs {
            configure_sense(gpio, pin)?;
        }
        Ok(())
    }

    fn run<H: GpioPort + DelayNs>(&self, hw: &mut H) -> TestReport {
        let samples = self.sample(hw);
        let mut verdicts = heapless::Vec::new();
        let _ = verdicts.push(UnitVerdict { unit: 0, passed: samples.passed() });
        TestReport::new(samples.contact(), verdicts)
    }
}
