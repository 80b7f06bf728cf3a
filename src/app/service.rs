//! Tester service: the control loop's explicit context.
//!
//! [`TesterService`] owns the active test procedure, the stability filter,
//! and the indicator state.  All I/O flows through port traits injected at
//! call sites, so the whole loop body runs against mock adapters on the
//! host.
//!
//! ```text
//!  GpioPort + DelayNs ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                         │      TesterService        │
//!        StatusPort  ◀──  │  DeviceTest · Stability   │
//!                         └──────────────────────────┘
//! ```
//!
//! One call to [`tick`](TesterService::tick) is one iteration: a full test
//! pass, one filter step, and an indicator write on every forwarded result.
//! The caller owns the inter-iteration wait.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::config::TesterConfig;
use crate::devices::{AnyDevice, DeviceTest, TestResult};
use crate::error::Result;
use crate::stability::StabilityFilter;
use crate::status::Status;

use super::events::{AppEvent, TelemetryData};
use super::ports::{EventSink, GpioPort, StatusPort};

pub struct TesterService<D: DeviceTest = AnyDevice> {
    config: TesterConfig,
    device: D,
    filter: StabilityFilter,
    status: Status,
    cycles: u64,
    last_result: TestResult,
    status_changes: u32,
    degraded_cycles: u64,
}

impl TesterService<AnyDevice> {
    /// Build the service for the family named in `config`.
    pub fn from_config(config: TesterConfig) -> Result<Self> {
        let device = AnyDevice::for_family(config.family);
        Self::new(config, device)
    }
}

impl<D: DeviceTest> TesterService<D> {
    /// Rejects an invalid `config`.  Does **not** touch hardware: call
    /// [`start`](Self::start) next.
    pub fn new(config: TesterConfig, device: D) -> Result<Self> {
        config.validate()?;
        debug_assert_eq!(config.family, device.family());
        Ok(Self {
            config,
            device,
            filter: StabilityFilter::new(),
            status: Status::STARTUP,
            cycles: 0,
            last_result: TestResult::default(),
            status_changes: 0,
            degraded_cycles: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Configure the socket pins and show the start-up colour.
    pub fn start(
        &mut self,
        hw: &mut (impl GpioPort + StatusPort),
        sink: &mut impl EventSink,
    ) -> Result<()> {
        self.device.configure(hw)?;
        hw.set_status(self.status.colour());

        let family = self.device.family();
        sink.emit(&AppEvent::Started { family, units: family.unit_count() });
        info!("TesterService started: {} ({} units)", family, family.unit_count());
        Ok(())
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one iteration: test pass → stability filter → indicator.
    ///
    /// Returns the raw (unfiltered) result of the pass.
    pub fn tick(
        &mut self,
        hw: &mut (impl GpioPort + DelayNs + StatusPort),
        sink: &mut impl EventSink,
    ) -> TestResult {
        self.cycles += 1;

        // 1. Test pass (owns the socket until it returns)
        let report = self.device.run(hw);
        let result = report.result;
        self.last_result = result;

        if result.contact_detected && report.failed_units().next().is_some() {
            self.degraded_cycles += 1;
        }
        sink.emit(&AppEvent::CycleCompleted { cycle: self.cycles, report });

        // 2. Debounce
        if let Some(stable) = self.filter.observe(result) {
            // 3. Indicator, written on every stable cycle
            let next = Status::from_result(&stable);
            hw.set_status(next.colour());
            if next != self.status {
                sink.emit(&AppEvent::StatusChanged { from: self.status, to: next, result: stable });
                match next {
                    Status::ContactNoFunction => warn!("Contact but no working unit: {:?}", stable),
                    _ => info!("Status {:?} -> {:?}", self.status, next),
                }
                self.status = next;
                self.status_changes += 1;
            }
        } else {
            debug!("Settling ({}/{})", self.filter.stable_count(), crate::stability::STABLE_THRESHOLD);
        }

        // 4. Telemetry
        if self.cycles % u64::from(self.config.telemetry_interval_cycles) == 0 {
            sink.emit(&AppEvent::Telemetry(self.telemetry()));
        }

        result
    }

    // ── Queries ──────────────────────────────────────────────

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn filter(&self) -> &StabilityFilter {
        &self.filter
    }

    pub fn telemetry(&self) -> TelemetryData {
        TelemetryData {
            family: self.device.family(),
            cycles: self.cycles,
            status: self.status,
            last_result: self.last_result,
            stable_count: self.filter.stable_count(),
            status_changes: self.status_changes,
            degraded_cycles: self.degraded_cycles,
        }
    }
}
