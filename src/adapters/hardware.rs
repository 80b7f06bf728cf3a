//! Hardware adapter: bridges the bench peripherals to domain port traits.
//!
//! Owns the socket GPIO, the settle delay, and the status pixel, exposing
//! them through [`GpioPort`], [`DelayNs`] and [`StatusPort`] on one value.
//! The test procedures need GPIO and delay at the same time, so a single
//! owner avoids splitting mutable borrows in the loop.  On non-espidf
//! targets the underlying pieces use their simulation paths.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use crate::adapters::delay::SettleDelay;
use crate::adapters::gpio::SocketGpio;
use crate::app::ports::{Direction, GpioPort, Pull, StatusPort};
use crate::drivers::status_led::StatusLed;
use crate::error::GpioError;
use crate::pins::GpioNum;
use crate::status::Rgb;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    gpio: SocketGpio,
    delay: SettleDelay,
    led: StatusLed,
}

impl HardwareAdapter {
    pub fn new(gpio: SocketGpio, delay: SettleDelay, led: StatusLed) -> Self {
        Self { gpio, delay, led }
    }
}

// ── GpioPort implementation ───────────────────────────────────

impl GpioPort for HardwareAdapter {
    fn configure(
        &mut self,
        pin: GpioNum,
        direction: Direction,
        pull: Pull,
    ) -> Result<(), GpioError> {
        self.gpio.configure(pin, direction, pull)
    }

    fn write(&mut self, pin: GpioNum, level: PinState) {
        self.gpio.write(pin, level);
    }

    fn read(&mut self, pin: GpioNum) -> PinState {
        self.gpio.read(pin)
    }
}

// ── DelayNs implementation ────────────────────────────────────

impl DelayNs for HardwareAdapter {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

// ── StatusPort implementation ─────────────────────────────────

impl StatusPort for HardwareAdapter {
    fn set_status(&mut self, colour: Rgb) {
        self.led.set_colour(colour);
    }
}
