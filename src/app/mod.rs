//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the control loop for the bench tester: run the
//! active test procedure, debounce its result, drive the indicator.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
