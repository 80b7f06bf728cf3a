//! Cross-cycle debounce for test results.
//!
//! A chip being pushed into the socket bounces between "nothing", "some
//! pins touching" and "fully seated" for a few hundred milliseconds.  The
//! filter holds back every result until it has repeated unchanged for
//! [`STABLE_THRESHOLD`] consecutive cycles after becoming the baseline.
//!
//! ```text
//!            same result: stable_count += 1
//!          ┌─────────────┐
//!          ▼             │
//!   ┌────────────┐  stable_count >= 3   ┌────────┐
//!   │  CHANGING  │ ───────────────────▶ │ STABLE │ ──▶ forward baseline
//!   └────────────┘ ◀─────────────────── └────────┘
//!          ▲        different result:
//!          │        stable_count = 0, baseline = new
//! ```
//!
//! This is the only component that keeps decision state between cycles.

use crate::devices::TestResult;

/// Consecutive repeats of the baseline needed before it is forwarded.
/// Fixed for every chip family.
pub const STABLE_THRESHOLD: u32 = 3;

/// Process-scoped filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StabilityFilter {
    last: TestResult,
    stable_count: u32,
}

impl StabilityFilter {
    /// Baseline starts at "no contact, nothing working".
    pub const fn new() -> Self {
        Self {
            last: TestResult { contact_detected: false, working_count: 0 },
            stable_count: 0,
        }
    }

    /// Feed one raw result.  Returns the baseline while it is stable,
    /// `None` while the result is still settling.
    pub fn observe(&mut self, result: TestResult) -> Option<TestResult> {
        if result == self.last {
            self.stable_count = self.stable_count.saturating_add(1);
        } else {
            self.stable_count = 0;
            self.last = result;
        }

        self.is_stable().then_some(self.last)
    }

    pub fn is_stable(&self) -> bool {
        self.stable_count >= STABLE_THRESHOLD
    }

    pub fn stable_count(&self) -> u32 {
        self.stable_count
    }

    /// The current baseline, stable or not.
    pub fn baseline(&self) -> TestResult {
        self.last
    }
}
