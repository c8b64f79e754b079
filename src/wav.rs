//! WAV export
//!
//! Writes a waveform as mono 16-bit PCM so it can be listened to or opened in
//! an audio editor.
//!
//! **Format**:
//! - 16-bit signed integer samples
//! - Mono
//! - Sample rate rounded to the nearest integer Hz
//!
//! Samples are scaled so the largest magnitude lands on full scale; an all-zero
//! waveform is written as silence.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use snafu::{ResultExt, Snafu};

#[derive(Debug, Snafu)]
pub enum WavError {
    /// WAV needs a whole number of samples per second
    #[snafu(display("sample rate {sample_rate} Hz cannot be stored in a WAV file"))]
    UnsupportedSampleRate { sample_rate: f64 },

    #[snafu(display("could not create {path}"))]
    Create { path: String, source: hound::Error },

    #[snafu(display("could not write samples to {path}"))]
    Write { path: String, source: hound::Error },
}

/// Peak-normalize and convert to 16-bit PCM
pub fn to_pcm16(samples: &[f64]) -> Vec<i16> {
    let peak = samples.iter().fold(0.0_f64, |peak, s| peak.max(s.abs()));
    let scale = if peak > 0.0 { 1.0 / peak } else { 0.0 };

    samples
        .iter()
        .map(|&s| {
            let clamped = (s * scale).clamp(-1.0, 1.0);
            (clamped * i16::MAX as f64).round() as i16
        })
        .collect()
}

/// Write `samples` to `path` as a mono 16-bit WAV file
pub fn write_wav<P: AsRef<Path>>(
    path: P,
    samples: &[f64],
    sample_rate: f64,
) -> Result<(), WavError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let rounded = sample_rate.round();
    if !rounded.is_finite() || rounded < 1.0 || rounded > u32::MAX as f64 {
        return UnsupportedSampleRateSnafu { sample_rate }.fail();
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate: rounded as u32,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).context(CreateSnafu { path: display.clone() })?;
    for sample in to_pcm16(samples) {
        writer
            .write_sample(sample)
            .context(WriteSnafu { path: display.clone() })?;
    }
    writer.finalize().context(WriteSnafu { path: display })?;

    tracing::debug!(path = %path.display(), samples = samples.len(), "wrote wav");
    Ok(())
}
