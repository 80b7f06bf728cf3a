//! Settle-delay adapter.
//!
//! - **`target_os = "espidf"`**: ROM busy-wait (`Ets`).  Guarantees the
//!   minimum wait without depending on the FreeRTOS tick, which would round
//!   a 1 ms hold up to a whole tick or more.
//! - **`not(target_os = "espidf")`**: `std::thread::sleep`.

use embedded_hal::delay::DelayNs;

#[derive(Debug, Default, Clone, Copy)]
pub struct SettleDelay;

impl SettleDelay {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "espidf")]
impl DelayNs for SettleDelay {
    fn delay_ns(&mut self, ns: u32) {
        DelayNs::delay_ns(&mut esp_idf_hal::delay::Ets, ns);
    }

    fn delay_us(&mut self, us: u32) {
        DelayNs::delay_us(&mut esp_idf_hal::delay::Ets, us);
    }
}

#[cfg(not(target_os = "espidf"))]
impl DelayNs for SettleDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}
