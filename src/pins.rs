//! GPIO assignments for the test socket and the status pixel.
//!
//! Single source of truth: every test procedure references this module
//! rather than hard-coding pin numbers.  The socket is wired 1:1: DIP pin N
//! of the device under test lands on GPIO N, so the tables below read
//! straight off each part's datasheet pinout.  They are the wiring contract
//! with the test fixture and must not be reordered.

/// ESP-IDF GPIO number (`gpio_num_t`).
pub type GpioNum = i32;

/// Highest GPIO number the port adapters accept (ESP32 has 0–39).
pub const MAX_GPIO: GpioNum = 39;

// ---------------------------------------------------------------------------
// Pin maps
// ---------------------------------------------------------------------------

/// One inverter gate: input driven by the tester, output sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InverterPins {
    pub input: GpioNum,
    pub output: GpioNum,
}

/// One two-input gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatePins {
    pub in1: GpioNum,
    pub in2: GpioNum,
    pub output: GpioNum,
}

/// Control and output lines of an 8-bit serial-in/parallel-out register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftRegisterPins {
    /// Serial data inputs A and B (AND-ed internally).
    pub data: [GpioNum; 2],
    /// Rising-edge clock.
    pub clock: GpioNum,
    /// Master reset, active LOW.
    pub clear: GpioNum,
    /// Parallel outputs QA..QH, in shift order.
    pub outputs: [GpioNum; 8],
}

// ---------------------------------------------------------------------------
// 74HC04 / 74HC14: hex inverter
// ---------------------------------------------------------------------------

/// 1A/1Y … 6A/6Y.  Gates 4–6 sit on the far row, so output < input there.
pub const HEX_INVERTER_GATES: [InverterPins; 6] = [
    InverterPins { input: 1, output: 2 },
    InverterPins { input: 3, output: 4 },
    InverterPins { input: 5, output: 6 },
    InverterPins { input: 9, output: 8 },
    InverterPins { input: 11, output: 10 },
    InverterPins { input: 13, output: 12 },
];

// ---------------------------------------------------------------------------
// 74HC32: quad 2-input OR
// ---------------------------------------------------------------------------

pub const QUAD_OR_GATES: [GatePins; 4] = [
    GatePins { in1: 1, in2: 2, output: 3 },
    GatePins { in1: 4, in2: 5, output: 6 },
    GatePins { in1: 9, in2: 10, output: 8 },
    GatePins { in1: 12, in2: 13, output: 11 },
];

// ---------------------------------------------------------------------------
// 74HC164: 8-bit SIPO shift register
// ---------------------------------------------------------------------------

pub const SIPO_REGISTER: ShiftRegisterPins = ShiftRegisterPins {
    data: [1, 2],
    clock: 8,
    clear: 9,
    outputs: [3, 4, 5, 6, 10, 11, 12, 13],
};

// ---------------------------------------------------------------------------
// Status indicator (single WS2812 pixel, RMT channel 0)
// ---------------------------------------------------------------------------

pub const STATUS_PIXEL_GPIO: GpioNum = 23;
