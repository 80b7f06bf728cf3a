//! Device test procedures: one hard-coded strategy per chip family.
//!
//! ```text
//!  GpioPort + DelayNs ──▶ DeviceTest::run ──▶ TestReport ──▶ StabilityFilter
//! ```
//!
//! Every procedure follows the same contract:
//!
//! - the socket pins were configured once at boot by [`DeviceTest::configure`];
//! - a pass drives stimulus, waits a fixed settle time, samples, and folds
//!   every electrical anomaly into `contact_detected` / `working_count`;
//! - on return, every driven line is back at its idle level (inputs LOW,
//!   clock LOW, clear released HIGH) so the next pass starts from a known
//!   state.
//!
//! Procedures keep no state between passes.  Running one twice against an
//! unchanged fixture yields the same result.

pub mod inverter;
pub mod or_gate;
pub mod sample;
pub mod shift_register;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;
use serde::Serialize;

use crate::app::ports::{Direction, GpioPort, Pull};
use crate::config::ChipFamily;
use crate::error::GpioError;
use crate::pins::GpioNum;

pub use inverter::InverterTest;
pub use or_gate::OrGateTest;
pub use shift_register::ShiftRegisterTest;

// ---------------------------------------------------------------------------
// Timing contract
// ---------------------------------------------------------------------------

/// Wait after every stimulus change before sampling (ms).  Sized for the
/// slowest HC part on a long socket lead; shorter risks mid-edge samples.
pub const SETTLE_MS: u32 = 5;
/// Data-to-clock setup and clock-release recovery for the shift register (ms).
pub const CLOCK_SETUP_MS: u32 = 1;
/// Clock high time for the shift register (ms).
pub const CLOCK_HOLD_MS: u32 = 5;

/// Largest unit count of any supported family.
pub const MAX_UNITS: usize = 6;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Aggregate of one full test pass.
///
/// Equality is exact on both fields; the stability filter relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TestResult {
    /// Any sample in the pass read HIGH.
    pub contact_detected: bool,
    /// Units whose verdict was "passed".
    pub working_count: u8,
}

/// Per-unit outcome of one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitVerdict {
    /// Zero-based gate index within the package.
    pub unit: u8,
    pub passed: bool,
}

/// A [`TestResult`] together with the verdicts it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestReport {
    pub result: TestResult,
    pub verdicts: heapless::Vec<UnitVerdict, MAX_UNITS>,
}

impl TestReport {
    pub fn new(contact_detected: bool, verdicts: heapless::Vec<UnitVerdict, MAX_UNITS>) -> Self {
        let working_count = verdicts.iter().filter(|v| v.passed).count() as u8;
        debug_assert!(
            working_count == 0 || contact_detected,
            "a passing unit must have produced a HIGH sample"
        );
        Self {
            result: TestResult { contact_detected, working_count },
            verdicts,
        }
    }

    /// Indices of units that failed this pass.
    pub fn failed_units(&self) -> impl Iterator<Item = u8> + '_ {
        self.verdicts.iter().filter(|v| !v.passed).map(|v| v.unit)
    }
}

// ---------------------------------------------------------------------------
// Strategy interface
// ---------------------------------------------------------------------------

/// One chip family's test procedure.
pub trait DeviceTest {
    fn family(&self) -> ChipFamily;

    /// Set pin directions and bias, and park outputs at their idle level.
    /// Called once before the first pass.
    fn configure<G: GpioPort>(&self, gpio: &mut G) -> Result<(), GpioError>;

    /// Run one full pass and keep the per-unit detail.
    fn run<H: GpioPort + DelayNs>(&self, hw: &mut H) -> TestReport;

    /// Run one full pass.
    fn run_test<H: GpioPort + DelayNs>(&self, hw: &mut H) -> TestResult {
        self.run(hw).result
    }
}

/// Enum dispatch over the supported procedures (no heap, no `dyn`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyDevice {
    Inverter(InverterTest),
    OrGate(OrGateTest),
    ShiftRegister(ShiftRegisterTest),
}

impl AnyDevice {
    pub const fn for_family(family: ChipFamily) -> Self {
        match family {
            ChipFamily::Hc14 => Self::Inverter(InverterTest::hc14()),
            ChipFamily::Hc04 => Self::Inverter(InverterTest::hc04()),
            ChipFamily::Hc32 => Self::OrGate(OrGateTest::hc32()),
            ChipFamily::Hc164 => Self::ShiftRegister(ShiftRegisterTest::hc164()),
        }
    }
}

impl DeviceTest for AnyDevice {
    fn family(&self) -> ChipFamily {
        match self {
            Self::Inverter(t) => t.family(),
            Self::OrGate(t) => t.family(),
            Self::ShiftRegister(t) => t.family(),
        }
    }

    fn configure<G: GpioPort>(&self, gpio: &mut G) -> Result<(), GpioError> {
        match self {
            Self::Inverter(t) => t.configure(gpio),
            Self::OrGate(t) => t.configure(gpio),
            Self::ShiftRegister(t) => t.configure(gpio),
        }
    }

    fn run<H: GpioPort + DelayNs>(&self, hw: &mut H) -> TestReport {
        match self {
            Self::Inverter(t) => t.run(hw),
            Self::OrGate(t) => t.run(hw),
            Self::ShiftRegister(t) => t.run(hw),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared pin helpers
// ---------------------------------------------------------------------------

/// Configure a stimulus line and park it at `idle`.
pub(crate) fn configure_drive<G: GpioPort>(
    gpio: &mut G,
    pin: GpioNum,
    idle: PinState,
) -> Result<(), GpioError> {
    gpio.configure(pin, Direction::Output, Pull::None)?;
    gpio.write(pin, idle);
    Ok(())
}

/// Configure a response line with pull-down so an empty socket reads LOW.
pub(crate) fn configure_sense<G: GpioPort>(gpio: &mut G, pin: GpioNum) -> Result<(), GpioError> {
    gpio.configure(pin, Direction::Input, Pull::PullDown)
}

// ---------------------------------------------------------------------------
// Test bench fake
// ---------------------------------------------------------------------------
