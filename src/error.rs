//! Error types for the tester firmware.
//!
//! The test engine itself has no error channel: every electrical oddity
//! (floating pin, stuck line, empty socket) is folded into the
//! classification.  These types only cover the boot path (configuration
//! validation and one-shot pin setup) where a failure means the bench is
//! miswired or misbuilt and the firmware must not start testing.
//! All variants are `Copy` so they pass through adapters without allocation.

use core::fmt;

use crate::pins::GpioNum;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A GPIO could not be configured.
    Gpio(GpioError),
    /// The build-time configuration is inconsistent.
    Config(ConfigError),
    /// A peripheral driver failed to come up.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(e) => write!(f, "gpio: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// Pin number outside the chip's GPIO range.
    InvalidPin(GpioNum),
    /// The driver rejected the pin configuration (ESP-IDF return code).
    ConfigFailed { pin: GpioNum, code: i32 },
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPin(pin) => write!(f, "invalid pin {pin}"),
            Self::ConfigFailed { pin, code } => {
                write!(f, "pin {pin} config failed (rc={code})")
            }
        }
    }
}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` names the field and the rule.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
