//! Tester configuration.
//!
//! There is no persistent storage and no runtime negotiation: the active
//! chip family is fixed by a cargo feature and every other value is a
//! compile-time default.  Swapping the part under test means reflashing.
//!
//! Settle delays and the stability threshold are not configurable: they
//! are electrical contracts of the parts under test.

use serde::{Deserialize, Serialize};

use crate::devices::{CLOCK_HOLD_MS, CLOCK_SETUP_MS, SETTLE_MS};
use crate::error::ConfigError;

/// Supported device families.  One hard-coded test procedure each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChipFamily {
    /// 74HC14 hex Schmitt-trigger inverter.
    Hc14,
    /// 74HC04 hex inverter.
    Hc04,
    /// 74HC32 quad 2-input OR.
    Hc32,
    /// 74HC164 8-bit serial-in/parallel-out shift register.
    Hc164,
}

impl ChipFamily {
    #[cfg(any(
        feature = "chip-74hc14",
        not(any(feature = "chip-74hc04", feature = "chip-74hc32", feature = "chip-74hc164"))
    ))]
    pub const ACTIVE: Self = Self::Hc14;

    #[cfg(all(not(feature = "chip-74hc14"), feature = "chip-74hc04"))]
    pub const ACTIVE: Self = Self::Hc04;

    #[cfg(all(
        not(feature = "chip-74hc14"),
        not(feature = "chip-74hc04"),
        feature = "chip-74hc32"
    ))]
    pub const ACTIVE: Self = Self::Hc32;

    #[cfg(all(
        not(feature = "chip-74hc14"),
        not(feature = "chip-74hc04"),
        not(feature = "chip-74hc32"),
        feature = "chip-74hc164"
    ))]
    pub const ACTIVE: Self = Self::Hc164;

    pub const fn part_number(self) -> &'static str {
        match self {
            Self::Hc14 => "74HC14",
            Self::Hc04 => "74HC04",
            Self::Hc32 => "74HC32",
            Self::Hc164 => "74HC164",
        }
    }

    /// Independently tested units in one package.
    pub const fn unit_count(self) -> u8 {
        match self {
            Self::Hc14 | Self::Hc04 => 6,
            Self::Hc32 => 4,
            Self::Hc164 => 1,
        }
    }

    /// Total settle/hold time one test pass spends waiting.
    pub const fn pass_duration_ms(self) -> u32 {
        match self {
            // 6 gates × repeats × (low + high) transitions.
            Self::Hc14 => 6 * 3 * 2 * SETTLE_MS,
            Self::Hc04 => 6 * 2 * SETTLE_MS,
            // 4 gates × 4 input combinations.
            Self::Hc32 => 4 * 4 * SETTLE_MS,
            // clear settle + 8 clock pulses + shift settle.
            Self::Hc164 => SETTLE_MS + 8 * (2 * CLOCK_SETUP_MS + CLOCK_HOLD_MS) + SETTLE_MS,
        }
    }
}

impl core::fmt::Display for ChipFamily {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.part_number())
    }
}

/// Core tester configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TesterConfig {
    /// Family whose procedure runs every cycle.
    pub family: ChipFamily,
    /// Idle time between test passes (milliseconds).
    pub poll_interval_ms: u32,
    /// Control-loop iterations between telemetry events.
    pub telemetry_interval_cycles: u32,
    /// Task watchdog timeout (milliseconds).
    pub watchdog_timeout_ms: u32,
}

impl Default for TesterConfig {
    fn default() -> Self {
        Self {
            family: ChipFamily::ACTIVE,
            poll_interval_ms: 100,        // 10 Hz
            telemetry_interval_cycles: 50, // ~every 5 s
            watchdog_timeout_ms: 5_000,
        }
    }
}

impl TesterConfig {
    /// Reject inconsistent values instead of clamping them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("poll_interval_ms must be > 0"));
        }
        if self.telemetry_interval_cycles == 0 {
            return Err(ConfigError::ValidationFailed(
                "telemetry_interval_cycles must be > 0",
            ));
        }
        if self.watchdog_timeout_ms <= self.worst_case_iteration_ms() {
            return Err(ConfigError::ValidationFailed(
                "watchdog_timeout_ms must exceed one loop iteration",
            ));
        }
        Ok(())
    }

    /// One test pass plus the inter-iteration wait.
    pub fn worst_case_iteration_ms(&self) -> u32 {
        self.poll_interval_ms
            .saturating_add(self.family.pass_duration_ms())
    }
}
