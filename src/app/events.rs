//! Outbound application events.
//!
//! The [`TesterService`](super::service::TesterService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: today that is the serial log.

use serde::Serialize;

use crate::config::ChipFamily;
use crate::devices::{TestReport, TestResult};
use crate::status::Status;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Pins are configured and the start-up colour is showing.
    Started { family: ChipFamily, units: u8 },

    /// One full test pass finished (raw, unfiltered).
    CycleCompleted { cycle: u64, report: TestReport },

    /// The stability filter forwarded a result that changed the indicator.
    StatusChanged { from: Status, to: Status, result: TestResult },

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TelemetryData {
    pub family: ChipFamily,
    pub cycles: u64,
    pub status: Status,
    pub last_result: TestResult,
    pub stable_count: u32,
    /// Number of times the indicator colour changed since boot.
    pub status_changes: u32,
    /// Passes in which at least one unit failed while contact was present.
    pub degraded_cycles: u64,
}
