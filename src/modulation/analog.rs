//! Analog AM and FM
//!
//! Both schemes modulate a single-tone message `sin(2π f_m t)` onto a carrier
//! over the half-open interval `[0, duration)`.
//!
//! - AM: `message · cos(2π f_c t)`
//! - FM: `sin(2π f_c t + 2π Δf ∫message)`, where the integral is the running sum of
//!   the message times `1 / sample_rate`

use std::f64::consts::TAU;

use tracing::debug;

use crate::config::{require_positive, require_sample_count};
use crate::error::SynthesisError;

/// Parameters shared by AM and FM
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalogConfig {
    /// Hz
    pub carrier_frequency: f64,
    /// Hz
    pub sample_rate: f64,
    /// Seconds
    pub duration: f64,
    /// Frequency of the sinusoidal message (Hz)
    pub message_frequency: f64,
}

impl Default for AnalogConfig {
    fn default() -> Self {
        Self {
            carrier_frequency: 10.0,
            sample_rate: 1000.0,
            duration: 2.0,
            message_frequency: 1.0,
        }
    }
}

impl AnalogConfig {
    pub fn validate(&self) -> Result<(), SynthesisError> {
        require_positive("carrier frequency", self.carrier_frequency)?;
        require_positive("sample rate", self.sample_rate)?;
        require_positive("duration", self.duration)?;
        require_positive("message frequency", self.message_frequency)?;
        require_sample_count("sample count", (self.duration * self.sample_rate).ceil())?;
        Ok(())
    }

    /// Number of samples `k / sample_rate` strictly below `duration`
    ///
    /// Only meaningful after `validate`.
    pub fn sample_count(&self) -> usize {
        let mut count = (self.duration * self.sample_rate).ceil() as usize;
        while count > 0 && (count - 1) as f64 / self.sample_rate >= self.duration {
            count -= 1;
        }
        count
    }

    fn time_axis(&self) -> Vec<f64> {
        super::time_axis(self.sample_count(), self.sample_rate)
    }
}

/// Output of the analog modulators; all four vectors share one length
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogWaveform {
    pub time: Vec<f64>,
    pub message: Vec<f64>,
    /// `sin(2π f_c t)`
    pub carrier: Vec<f64>,
    pub modulated: Vec<f64>,
}

impl AnalogWaveform {
    fn from_time(time: Vec<f64>, config: &AnalogConfig) -> Self {
        let message = time
            .iter()
            .map(|&t| (TAU * config.message_frequency * t).sin())
            .collect();
        let carrier = time
            .iter()
            .map(|&t| (TAU * config.carrier_frequency * t).sin())
            .collect();

        AnalogWaveform {
            time,
            message,
            carrier,
            modulated: Vec::new(),
        }
    }
}

/// Double-sideband suppressed-carrier AM of a single-tone message
pub fn amplitude_modulation(config: &AnalogConfig) -> Result<AnalogWaveform, SynthesisError> {
    config.validate()?;

    let mut waveform = AnalogWaveform::from_time(config.time_axis(), config);
    waveform.modulated = waveform
        .time
        .iter()
        .zip(&waveform.message)
        .map(|(&t, &m)| m * (TAU * config.carrier_frequency * t).cos())
        .collect();

    debug!(samples = waveform.time.len(), "amplitude modulation");
    Ok(waveform)
}

/// FM of a single-tone message with peak deviation `freq_deviation` Hz
pub fn frequency_modulation(
    config: &AnalogConfig,
    freq_deviation: f64,
) -> Result<AnalogWaveform, SynthesisError> {
    config.validate()?;
    require_positive("frequency deviation", freq_deviation)?;

    let step = 1.0 / config.sample_rate;
    let mut waveform = AnalogWaveform::from_time(config.time_axis(), config);

    let mut integral = 0.0;
    waveform.modulated = waveform
        .time
        .iter()
        .zip(&waveform.message)
        .map(|(&t, &m)| {
            integral += m * step;
            (TAU * config.carrier_frequency * t + TAU * freq_deviation * integral).sin()
        })
        .collect();

    debug!(samples = waveform.time.len(), freq_deviation, "frequency modulation");
    Ok(waveform)
}
