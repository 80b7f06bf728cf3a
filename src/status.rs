//! Indicator states and their colours.
//!
//! The bench shows exactly one of three colours.  There is deliberately no
//! separate "fault" colour: a miswired socket, a dead chip and a chip with
//! a broken gate all land in [`Status::ContactNoFunction`] or
//! [`Status::NoContact`].

use serde::Serialize;

use crate::devices::TestResult;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

/// Dim red: start-up and empty socket.
pub const COLOUR_NO_CONTACT: Rgb = (32, 0, 0);
/// Amber: something is seated and conducting, but no unit passes.
pub const COLOUR_CONTACT_NO_FUNCTION: Rgb = (64, 32, 0);
/// Green: at least one unit passes.
pub const COLOUR_FUNCTIONING: Rgb = (0, 64, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    NoContact,
    ContactNoFunction,
    Functioning,
}

impl Status {
    /// Shown before the first forwarded result.
    pub const STARTUP: Self = Self::NoContact;

    /// Map a forwarded result to the indicator state.
    ///
    /// Any passing unit wins over the contact flag: a hex inverter with one
    /// good gate still shows green.
    pub fn from_result(result: &TestResult) -> Self {
        if result.working_count >= 1 {
            Self::Functioning
        } else if result.contact_detected {
            Self::ContactNoFunction
        } else {
            Self::NoContact
        }
    }

    pub const fn colour(self) -> Rgb {
        match self {
            Self::NoContact => COLOUR_NO_CONTACT,
            Self::ContactNoFunction => COLOUR_CONTACT_NO_FUNCTION,
            Self::Functioning => COLOUR_FUNCTIONING,
        }
    }
}
