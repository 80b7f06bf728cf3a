//! Peripheral drivers: status pixel and task watchdog.

pub mod status_led;
pub mod watchdog;
