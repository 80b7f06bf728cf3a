//! Single-pixel status indicator driver.
//!
//! One WS2812 pixel on [`STATUS_PIXEL_GPIO`](crate::pins::STATUS_PIXEL_GPIO),
//! clocked out by an RMT TX channel as 24 GRB bits, MSB first.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the pixel through `esp_idf_hal::rmt`.
//! On host/test: tracks state in-memory only.

#[cfg(target_os = "espidf")]
use core::time::Duration;

#[cfg(target_os = "espidf")]
use esp_idf_hal::{
    gpio::OutputPin,
    peripheral::Peripheral,
    rmt::{config::TransmitConfig, FixedLengthSignal, PinState, Pulse, RmtChannel, TxRmtDriver},
    sys::EspError,
};

use crate::status::Rgb;

// WS2812 bit timings (ns).
#[cfg(target_os = "espidf")]
const T0H_NS: u64 = 350;
#[cfg(target_os = "espidf")]
const T0L_NS: u64 = 800;
#[cfg(target_os = "espidf")]
const T1H_NS: u64 = 700;
#[cfg(target_os = "espidf")]
const T1L_NS: u64 = 600;

pub struct StatusLed {
    #[cfg(target_os = "espidf")]
    tx: TxRmtDriver<'static>,
    current: Rgb,
}

#[cfg(target_os = "espidf")]
impl StatusLed {
    pub fn new<C: RmtChannel>(
        channel: impl Peripheral<P = C> + 'static,
        pin: impl Peripheral<P = impl OutputPin> + 'static,
    ) -> Result<Self, EspError> {
        let config = TransmitConfig::new().clock_divider(1);
        let tx = TxRmtDriver::new(channel, pin, &config)?;
        Ok(Self { tx, current: (0, 0, 0) })
    }

    fn write_pixel(&mut self, (r, g, b): Rgb) -> Result<(), EspError> {
        let grb = (u32::from(g) << 16) | (u32::from(r) << 8) | u32::from(b);
        let ticks_hz = self.tx.counter_clock()?;
        let pulse = |state, ns| Pulse::new_with_duration(ticks_hz, state, &Duration::from_nanos(ns));
        let zero = (pulse(PinState::High, T0H_NS)?, pulse(PinState::Low, T0L_NS)?);
        let one = (pulse(PinState::High, T1H_NS)?, pulse(PinState::Low, T1L_NS)?);

        let mut signal = FixedLengthSignal::<24>::new();
        for i in 0..24 {
            let bit = grb & (1 << (23 - i)) != 0;
            signal.set(i, if bit { &one } else { &zero })?;
        }
        self.tx.start_blocking(&signal)
    }

    pub fn set_colour(&mut self, colour: Rgb) {
        // A failed frame leaves the previous colour latched in the pixel.
        if let Err(e) = self.write_pixel(colour) {
            log::warn!("StatusLed: RMT write failed: {}", e);
            return;
        }
        self.latch(colour);
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for StatusLed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "espidf"))]
impl StatusLed {
    pub fn new() -> Self {
        Self { current: (0, 0, 0) }
    }

    pub fn set_colour(&mut self, colour: Rgb) {
        self.latch(colour);
    }
}

impl StatusLed {
    fn latch(&mut self, colour: Rgb) {
        if colour != self.current {
            log::debug!("StatusLed: {:?} -> {:?}", self.current, colour);
            self.current = colour;
        }
    }

    #[cfg(test)]
    fn current_colour(&self) -> Rgb {
        self.current
    }
}
