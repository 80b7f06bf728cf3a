//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! Per-cycle reports go out at `debug` so a bench left running does not
//! flood the console; telemetry is rendered as one JSON object.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { family, units } => {
                info!("START | family={} | units={}", family, units);
            }
            AppEvent::CycleCompleted { cycle, report } => {
                let mut failed = 0u8;
                for unit in report.failed_units() {
                    failed |= 1 << unit;
                }
                debug!(
                    "CYCLE | #{} | contact={} working={} | failed=0b{:06b}",
                    cycle, report.result.contact_detected, report.result.working_count, failed,
                );
            }
            AppEvent::StatusChanged { from, to, result } => {
                info!(
                    "STATUS | {:?} -> {:?} | contact={} working={}",
                    from, to, result.contact_detected, result.working_count,
                );
            }
            AppEvent::Telemetry(t) => match serde_json::to_string(t) {
                Ok(json) => info!("TELEM | {}", json),
                Err(e) => warn!("TELEM | serialisation failed: {}", e),
            },
        }
    }
}
