//! Port traits: the boundary between the test engine and the bench.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ TesterService / device tests (domain)
//! ```
//!
//! Driven adapters (socket GPIO, status pixel, event sinks) implement these
//! traits.  The domain consumes them via generics, so the test procedures
//! never touch hardware registers and run unchanged against the host-side
//! socket simulator.
//!
//! Timing is not a port of its own: settle waits go through
//! [`embedded_hal::delay::DelayNs`], which the ESP-IDF HAL already
//! implements.

use embedded_hal::digital::PinState;

use crate::status::Rgb;
use crate::error::GpioError;
use crate::pins::GpioNum;

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: domain ↔ test socket)
// ───────────────────────────────────────────────────────────────

/// Pin direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Driven by the tester (stimulus).
    Output,
    /// Sampled by the tester (response).
    Input,
}

/// Input bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    None,
    /// Weak pull-down: an empty or miswired socket reads LOW, never floats.
    PullDown,
}

/// Pin-addressed digital I/O on the test socket.
///
/// `configure` runs once per pin at boot and may fail; `write` and `read`
/// run thousands of times per minute inside the test procedures and are
/// infallible by contract: a pin that configured cleanly stays usable.
pub trait GpioPort {
    fn configure(&mut self, pin: GpioNum, direction: Direction, pull: Pull)
    -> Result<(), GpioError>;

    fn write(&mut self, pin: GpioNum, level: PinState);

    fn read(&mut self, pin: GpioNum) -> PinState;
}

// ───────────────────────────────────────────────────────────────
// Status port (driven adapter: domain → indicator)
// ───────────────────────────────────────────────────────────────

/// The single status indicator.
pub trait StatusPort {
    fn set_status(&mut self, colour: Rgb);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
