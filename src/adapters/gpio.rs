//! Socket GPIO adapter.
//!
//! Implements [`GpioPort`] for the socket pins.
//!
//! - **`target_os = "espidf"`**: raw `gpio_config` / `gpio_set_level` /
//!   `gpio_get_level` calls.  No per-pin driver objects: the test
//!   procedures address pins by number and the set of pins depends on the
//!   build-time chip family.
//! - **`not(target_os = "espidf")`**: an empty socket: outputs latch what
//!   was written, inputs read their pull level.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use embedded_hal::digital::PinState;

use crate::app::ports::{Direction, GpioPort, Pull};
use crate::error::GpioError;
use crate::pins::{GpioNum, MAX_GPIO};

#[cfg(not(target_os = "espidf"))]
const PIN_COUNT: usize = MAX_GPIO as usize + 1;

pub struct SocketGpio {
    #[cfg(not(target_os = "espidf"))]
    directions: [Option<Direction>; PIN_COUNT],
    #[cfg(not(target_os = "espidf"))]
    levels: [PinState; PIN_COUNT],
}

impl Default for SocketGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl SocketGpio {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            directions: [None; PIN_COUNT],
            #[cfg(not(target_os = "espidf"))]
            levels: [PinState::Low; PIN_COUNT],
        }
    }

    fn check(pin: GpioNum) -> Result<(), GpioError> {
        if (0..=MAX_GPIO).contains(&pin) {
            Ok(())
        } else {
            Err(GpioError::InvalidPin(pin))
        }
    }
}

// ── ESP-IDF ───────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
impl GpioPort for SocketGpio {
    fn configure(
        &mut self,
        pin: GpioNum,
        direction: Direction,
        pull: Pull,
    ) -> Result<(), GpioError> {
        Self::check(pin)?;
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: match direction {
                Direction::Output => gpio_mode_t_GPIO_MODE_OUTPUT,
                Direction::Input => gpio_mode_t_GPIO_MODE_INPUT,
            },
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: match pull {
                Pull::PullDown => gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
                Pull::None => gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            },
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: single-threaded boot path; `cfg` outlives the call.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK {
            return Err(GpioError::ConfigFailed { pin, code: ret });
        }
        Ok(())
    }

    fn write(&mut self, pin: GpioNum, level: PinState) {
        // SAFETY: register write on a pin configured as output at boot;
        // only the control loop drives socket pins.
        unsafe {
            gpio_set_level(pin, u32::from(level == PinState::High));
        }
    }

    fn read(&mut self, pin: GpioNum) -> PinState {
        // SAFETY: read-only register access on a configured input.
        PinState::from(unsafe { gpio_get_level(pin) } != 0)
    }
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
impl GpioPort for SocketGpio {
    fn configure(
        &mut self,
        pin: GpioNum,
        direction: Direction,
        _pull: Pull,
    ) -> Result<(), GpioError> {
        Self::check(pin)?;
        self.directions[pin as usize] = Some(direction);
        self.levels[pin as usize] = PinState::Low;
        Ok(())
    }

    fn write(&mut self, pin: GpioNum, level: PinState) {
        if let Some(slot) = self.levels.get_mut(pin as usize) {
            *slot = level;
        }
    }

    fn read(&mut self, pin: GpioNum) -> PinState {
        match self.directions.get(pin as usize).copied().flatten() {
            Some(Direction::Output) => self.levels[pin as usize],
            // Nothing in the socket: pull-down (or floating, read as LOW).
            _ => PinState::Low,
        }
    }
}
