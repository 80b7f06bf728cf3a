//! Fuzz target: one test pass of every family against arbitrary pin reads
//!
//! The first byte picks the family; every following bit is the level the
//! next `read()` returns (wrapping).  Models a socket with arbitrarily bad
//! contact.
//!
//! Invariants checked:
//! - No panics under any read sequence
//! - `working_count <= unit_count`
//! - `working_count > 0` implies `contact_detected`
//! - The pass waits exactly its contracted time, whatever it reads
//!
//! cargo fuzz run fuzz_device_pass

#![no_main]

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;
use libfuzzer_sys::fuzz_target;

use ictester::app::ports::{Direction, GpioPort, Pull};
use ictester::config::ChipFamily;
use ictester::devices::{AnyDevice, DeviceTest};
use ictester::error::GpioError;
use ictester::pins::GpioNum;

struct NoisySocket<'a> {
    bits: &'a [u8],
    cursor: usize,
    elapsed_ns: u64,
}

impl GpioPort for NoisySocket<'_> {
    fn configure(&mut self, _: GpioNum, _: Direction, _: Pull) -> Result<(), GpioError> {
        Ok(())
    }

    fn write(&mut self, _: GpioNum, _: PinState) {}

    fn read(&mut self, _: GpioNum) -> PinState {
        let byte = self.bits[(self.cursor / 8) % self.bits.len()];
        let bit = (byte >> (self.cursor % 8)) & 1;
        self.cursor += 1;
        PinState::from(bit != 0)
    }
}

impl DelayNs for NoisySocket<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&selector, bits)) = data.split_first() else {
        return;
    };
    if bits.is_empty() {
        return;
    }

    let family = match selector % 4 {
        0 => ChipFamily::Hc14,
        1 => ChipFamily::Hc04,
        2 => ChipFamily::Hc32,
        _ => ChipFamily::Hc164,
    };
    let device = AnyDevice::for_family(family);
    let mut socket = NoisySocket { bits, cursor: 0, elapsed_ns: 0 };
    device.configure(&mut socket).unwrap();
    let result = device.run_test(&mut socket);

    assert!(result.working_count <= family.unit_count());
    if result.working_count > 0 {
        assert!(result.contact_detected, "working unit without a HIGH sample");
    }
    assert_eq!(socket.elapsed_ns, u64::from(family.pass_duration_ms()) * 1_000_000);
});
