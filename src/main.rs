//! IC Tester Firmware: Main Entry Point
//!
//! Hexagonal architecture with a single polling control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter                         LogEventSink          │
//! │  (SocketGpio + SettleDelay + StatusLed)  (EventSink)           │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            TesterService (pure logic)                  │    │
//! │  │  DeviceTest · StabilityFilter · Status                 │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Watchdog (TWDT, fed once per iteration)                       │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::peripherals::Peripherals;
use log::info;

use ictester::adapters::delay::SettleDelay;
use ictester::adapters::gpio::SocketGpio;
use ictester::adapters::hardware::HardwareAdapter;
use ictester::adapters::log_sink::LogEventSink;
use ictester::app::service::TesterService;
use ictester::config::TesterConfig;
use ictester::drivers::status_led::StatusLed;
use ictester::drivers::watchdog::Watchdog;
use ictester::error::Error;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  IC Tester v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = TesterConfig::default();
    config.validate().map_err(Error::from)?;
    match serde_json::to_string(&config) {
        Ok(json) => info!("Config: {}", json),
        Err(e) => log::warn!("Config: not serialisable ({})", e),
    }

    // ── 3. Construct adapters ─────────────────────────────────
    let peripherals = Peripherals::take()?;
    let led = StatusLed::new(peripherals.rmt.channel0, peripherals.pins.gpio23).map_err(|e| {
        log::error!("StatusLed: RMT init failed: {}", e);
        Error::Init("status pixel (RMT channel 0)")
    })?;
    let mut hw = HardwareAdapter::new(SocketGpio::new(), SettleDelay::new(), led);
    let mut log_sink = LogEventSink::new();

    // ── 4. Construct tester service ───────────────────────────
    let mut tester = TesterService::from_config(config.clone())?;
    tester.start(&mut hw, &mut log_sink)?;

    let watchdog = Watchdog::new(config.watchdog_timeout_ms);

    info!("Tester ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        tester.tick(&mut hw, &mut log_sink);
        watchdog.feed();
        FreeRtos::delay_ms(config.poll_interval_ms);
    }
}
