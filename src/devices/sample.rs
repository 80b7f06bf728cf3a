//! Sample containers used during a single test pass.
//!
//! Both types live on the stack and are dropped as soon as the unit they
//! describe has been classified.

use embedded_hal::digital::PinState;

use crate::app::ports::GpioPort;
use crate::pins::GpioNum;

/// Repeated observations of one output pin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSet<const N: usize> {
    levels: heapless::Vec<PinState, N>,
}

impl<const N: usize> SampleSet<N> {
    pub fn new() -> Self {
        Self { levels: heapless::Vec::new() }
    }

    /// Append one observation.  Observations past capacity are dropped.
    pub fn record(&mut self, level: PinState) {
        let pushed = self.levels.push(level).is_ok();
        debug_assert!(pushed, "sample set overflow (capacity {N})");
    }

    pub fn any_high(&self) -> bool {
        self.levels.contains(&PinState::High)
    }

    /// True when every observation equals `level`.  An empty set never
    /// qualifies: no evidence is not a pass.
    pub fn unanimous(&self, level: PinState) -> bool {
        !self.levels.is_empty() && self.levels.iter().all(|&l| l == level)
    }
}

/// One simultaneous read of up to eight parallel outputs.
/// Bit `i` is the level of `outputs[i]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParallelSample(u8);

impl ParallelSample {
    pub fn capture<G: GpioPort>(gpio: &mut G, outputs: &[GpioNum; 8]) -> Self {
        let mut bits = 0u8;
        for (i, &pin) in outputs.iter().enumerate() {
            if gpio.read(pin) == PinState::High {
                bits |= 1 << i;
            }
        }
        Self(bits)
    }

    #[cfg(test)]
    pub(crate) const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn ones(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn zeros(self) -> u32 {
        self.0.count_zeros()
    }

    pub const fn any_high(self) -> bool {
        self.0 != 0
    }
}
