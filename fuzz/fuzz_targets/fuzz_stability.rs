//! Fuzz target: `StabilityFilter::observe`
//!
//! Each input byte becomes one raw result (bit 7 = contact, low bits =
//! working count) fed to the filter in order.
//!
//! Invariants checked:
//! - No panics (counter saturates)
//! - A forwarded result always equals the result just observed
//! - Nothing is forwarded on the cycle the baseline changes
//!
//! cargo fuzz run fuzz_stability

#![no_main]

use libfuzzer_sys::fuzz_target;

use ictester::devices::TestResult;
use ictester::stability::StabilityFilter;

fuzz_target!(|data: &[u8]| {
    let mut filter = StabilityFilter::new();
    for &byte in data {
        let result = TestResult {
            contact_detected: byte & 0x80 != 0,
            working_count: byte & 0x07,
        };
        let changed = filter.baseline() != result;
        match filter.observe(result) {
            Some(forwarded) => {
                assert!(!changed);
                assert_eq!(forwarded, result);
            }
            None => assert!(changed || !filter.is_stable()),
        }
    }
});
