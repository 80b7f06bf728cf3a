//! Logic IC bench tester library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod devices;
pub mod error;
pub mod pins;
pub mod stability;
pub mod status;

// Hardware-facing modules; each carries a host simulation path behind
// `cfg(not(target_os = "espidf"))`.
pub mod adapters;
pub mod drivers;
