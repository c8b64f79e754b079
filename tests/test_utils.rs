//! Shared utilities for integration tests

#![allow(dead_code)]

use num::complex::Complex64;

pub const TOLERANCE: f64 = 1e-9;

/// Local symbol time `i / sample_rate` for one symbol window
pub fn symbol_time(samples_per_symbol: usize, sample_rate: f64) -> Vec<f64> {
    (0..samples_per_symbol).map(|i| i as f64 / sample_rate).collect()
}

/// Assert two real sample slices agree within `TOLERANCE`
pub fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < TOLERANCE, "sample {}: got {}, expected {}", i, a, e);
    }
}

/// Assert two complex sample slices agree within `TOLERANCE`
pub fn assert_close_complex(actual: &[Complex64], expected: &[Complex64]) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).norm() < TOLERANCE, "sample {}: got {}, expected {}", i, a, e);
    }
}
