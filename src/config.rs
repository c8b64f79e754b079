use num::complex::Complex64;

use crate::error::{InvalidParameterSnafu, SynthesisError};

/// Longest sample buffer any synthesizer will allocate
pub const MAX_SAMPLES: usize = isize::MAX as usize / std::mem::size_of::<Complex64>();

/// Carrier frequency in Hz used by every demo when none is given
pub const DEFAULT_CARRIER_FREQUENCY: f64 = 5.0;

/// Sample rate in Hz used by every demo when none is given
pub const DEFAULT_SAMPLE_RATE: f64 = 1000.0;

/// Symbol duration in seconds used by every demo when none is given
pub const DEFAULT_SYMBOL_DURATION: f64 = 1.0;

/// Timing and carrier parameters for digital synthesis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisConfig {
    /// Carrier frequency (Hz)
    pub carrier_frequency: f64,
    /// Sample rate (Hz)
    pub sample_rate: f64,
    /// Duration of one symbol (seconds)
    pub symbol_duration: f64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            carrier_frequency: DEFAULT_CARRIER_FREQUENCY,
            sample_rate: DEFAULT_SAMPLE_RATE,
            symbol_duration: DEFAULT_SYMBOL_DURATION,
        }
    }
}

impl SynthesisConfig {
    pub fn new(carrier_frequency: f64, sample_rate: f64, symbol_duration: f64) -> Self {
        Self {
            carrier_frequency,
            sample_rate,
            symbol_duration,
        }
    }

    /// Check every field is finite and positive, and a symbol spans at least one sample
    pub fn validate(&self) -> Result<(), SynthesisError> {
        require_positive("carrier frequency", self.carrier_frequency)?;
        require_positive("sample rate", self.sample_rate)?;
        require_positive("symbol duration", self.symbol_duration)?;

        let samples = (self.sample_rate * self.symbol_duration).round();
        require_sample_count("samples per symbol", samples)?;

        Ok(())
    }

    /// `round(sample_rate * symbol_duration)`; only meaningful after `validate`
    pub fn samples_per_symbol(&self) -> usize {
        (self.sample_rate * self.symbol_duration).round() as usize
    }
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<(), SynthesisError> {
    if !value.is_finite() || value <= 0.0 {
        return InvalidParameterSnafu { name, value }.fail();
    }
    Ok(())
}

/// Reject a sample count below 1 or above [`MAX_SAMPLES`]
pub(crate) fn require_sample_count(name: &'static str, count: f64) -> Result<(), SynthesisError> {
    if !(1.0..=MAX_SAMPLES as f64).contains(&count) {
        return InvalidParameterSnafu { name, value: count }.fail();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SynthesisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.samples_per_symbol(), 1000);
    }

    #[test]
    fn test_samples_per_symbol_rounds() {
        let config = SynthesisConfig::new(5.0, 1000.0, 0.00175);
        assert_eq!(config.samples_per_symbol(), 2);

        let config = SynthesisConfig::new(5.0, 44100.0, 0.01);
        assert_eq!(config.samples_per_symbol(), 441);
    }

    #[test]
    fn test_rejects_non_positive_fields() {
        let cases = [
            (SynthesisConfig::new(0.0, 1000.0, 1.0), "carrier frequency"),
            (SynthesisConfig::new(5.0, -1000.0, 1.0), "sample rate"),
            (SynthesisConfig::new(5.0, 1000.0, 0.0), "symbol duration"),
            (SynthesisConfig::new(f64::NAN, 1000.0, 1.0), "carrier frequency"),
            (SynthesisConfig::new(5.0, f64::INFINITY, 1.0), "sample rate"),
        ];

        for (config, expected) in cases {
            match config.validate() {
                Err(SynthesisError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected InvalidParameter for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_rejects_symbol_longer_than_any_buffer() {
        for config in [
            SynthesisConfig::new(5.0, 1e300, 1.0),
            SynthesisConfig::new(5.0, 1e200, 1e200),
            SynthesisConfig::new(5.0, 1e18, 1.0),
        ] {
            assert!(matches!(
                config.validate(),
                Err(SynthesisError::InvalidParameter { name: "samples per symbol", .. })
            ));
        }
    }

    #[test]
    fn test_rejects_symbol_shorter_than_a_sample() {
        let config = SynthesisConfig::new(5.0, 1000.0, 0.0004);
        assert!(matches!(
            config.validate(),
            Err(SynthesisError::InvalidParameter { name: "samples per symbol", .. })
        ));
    }
}
