//! Time axis and continuous reference carriers

use std::f64::consts::TAU;

use super::{Carrier, CarrierKind};

/// `sample_count` points starting at 0 with step `1 / sample_rate`
pub fn time_axis(sample_count: usize, sample_rate: f64) -> Vec<f64> {
    (0..sample_count).map(|k| k as f64 / sample_rate).collect()
}

pub(super) fn in_phase(time: &[f64], frequency: f64) -> Carrier {
    Carrier {
        kind: CarrierKind::InPhase,
        frequency,
        samples: time.iter().map(|&t| (TAU * frequency * t).cos()).collect(),
    }
}

pub(super) fn quadrature(time: &[f64], frequency: f64) -> Carrier {
    Carrier {
        kind: CarrierKind::Quadrature,
        frequency,
        samples: time.iter().map(|&t| (TAU * frequency * t).sin()).collect(),
    }
}

pub(super) fn keyed(time: &[f64], bit: u8, frequency: f64) -> Carrier {
    Carrier {
        kind: CarrierKind::Keyed(bit),
        ..quadrature(time, frequency)
    }
}
