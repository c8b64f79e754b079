//! Symbol waveform synthesis
//!
//! Every digital scheme shares one procedure: tile the time axis into
//! non-overlapping symbol windows, look each symbol up in a [`SymbolTable`] and
//! write the carrier segment for that entry into its window.
//!
//! **Process**:
//! 1. Validate the bit count, the bits, the table and the timing, in that order
//! 2. Pack each group of `bits_per_symbol` bits into a big-endian table index
//! 3. Render each symbol's segment over a local time vector that restarts at 0
//! 4. Render the reference carrier(s) over the full time axis
//!
//! No phase is carried across symbol boundaries; segments only join smoothly
//! when `carrier_frequency * symbol_duration` is an integer.

use std::f64::consts::TAU;

use num::complex::Complex64;
use snafu::OptionExt;
use tracing::{debug, instrument, trace};

use crate::bits::{check_symbol_width, BitStream};
use crate::config::{SynthesisConfig, MAX_SAMPLES};
use crate::error::{InvalidParameterSnafu, SynthesisError};
use crate::table::SymbolTable;

pub mod analog;
mod carrier;
mod segment;

pub use analog::{amplitude_modulation, frequency_modulation, AnalogConfig, AnalogWaveform};
pub use carrier::time_axis;

/// A real or complex sample vector
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    Real(Vec<f64>),
    Complex(Vec<Complex64>),
}

impl Samples {
    pub fn len(&self) -> usize {
        match self {
            Samples::Real(v) => v.len(),
            Samples::Complex(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Samples::Complex(_))
    }

    pub fn as_real(&self) -> Option<&[f64]> {
        match self {
            Samples::Real(v) => Some(v),
            Samples::Complex(_) => None,
        }
    }

    pub fn as_complex(&self) -> Option<&[Complex64]> {
        match self {
            Samples::Real(_) => None,
            Samples::Complex(v) => Some(v),
        }
    }

    /// Real part of every sample (the samples themselves for real signals)
    pub fn real_part(&self) -> Vec<f64> {
        match self {
            Samples::Real(v) => v.clone(),
            Samples::Complex(v) => v.iter().map(|c| c.re).collect(),
        }
    }

    /// Repeat each sample `factor` times
    fn hold(&self, factor: usize) -> Samples {
        match self {
            Samples::Real(v) => Samples::Real(segment::hold(v, factor)),
            Samples::Complex(v) => Samples::Complex(segment::hold(v, factor)),
        }
    }
}

/// Role of a reference carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierKind {
    /// `cos(2π f t)`
    InPhase,
    /// `sin(2π f t)`, only produced for complex schemes
    Quadrature,
    /// `sin(2π f_k t)` for the tone keyed by bit `k` (frequency-pair tables)
    Keyed(u8),
}

impl std::fmt::Display for CarrierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CarrierKind::InPhase => write!(f, "in-phase carrier"),
            CarrierKind::Quadrature => write!(f, "quadrature carrier"),
            CarrierKind::Keyed(bit) => write!(f, "carrier for bit {bit}"),
        }
    }
}

/// Continuous reference carrier over the full time axis
#[derive(Debug, Clone, PartialEq)]
pub struct Carrier {
    pub kind: CarrierKind,
    /// Hz
    pub frequency: f64,
    pub samples: Vec<f64>,
}

/// Output of [`synthesize`]
///
/// `time`, every carrier and `modulated` share one length,
/// `symbol_count * samples_per_symbol`; `modulating` holds one entry per symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformResult {
    /// Sample times in seconds, `k / sample_rate`
    pub time: Vec<f64>,
    /// Table value of each symbol: phase (rad), keyed frequency (Hz), amplitude or
    /// constellation point
    pub modulating: Samples,
    pub carriers: Vec<Carrier>,
    pub modulated: Samples,
    pub symbol_count: usize,
    pub samples_per_symbol: usize,
}

impl WaveformResult {
    /// Coarse modulating signal held for a whole symbol, one value per sample
    pub fn modulating_staircase(&self) -> Samples {
        self.modulating.hold(self.samples_per_symbol)
    }

    /// First carrier of the given kind
    pub fn carrier(&self, kind: CarrierKind) -> Option<&Carrier> {
        self.carriers.iter().find(|c| c.kind == kind)
    }
}

/// Synthesize the modulated waveform for a raw bit sequence
///
/// Checks, in order: the bit count is a multiple of `bits_per_symbol`
/// (`InvalidLength`), every bit is 0 or 1 (`InvalidBit`), the table has
/// `2^bits_per_symbol` entries (`InvalidTable`), and the timing parameters are
/// positive (`InvalidParameter`). Nothing is allocated for the output before all
/// checks pass. An empty bit sequence is valid and yields empty vectors.
///
/// # Example
/// ```
/// use modsynth::{synthesize, SymbolTable, SynthesisConfig};
/// use std::f64::consts::PI;
///
/// let table = SymbolTable::PhaseShift { phases: vec![0.0, PI] };
/// let result = synthesize(&[0, 1, 1], 1, &table, &SynthesisConfig::default())?;
/// assert_eq!(result.time.len(), 3000);
/// assert_eq!(result.modulating.len(), 3);
/// # Ok::<(), modsynth::SynthesisError>(())
/// ```
pub fn synthesize(
    bits: &[u8],
    bits_per_symbol: usize,
    table: &SymbolTable,
    config: &SynthesisConfig,
) -> Result<WaveformResult, SynthesisError> {
    check_symbol_width(bits.len(), bits_per_symbol)?;
    let stream = BitStream::from_values(bits)?;
    synthesize_stream(&stream, bits_per_symbol, table, config)
}

/// Synthesize from an already validated [`BitStream`]
#[instrument(
    level = "debug",
    skip_all,
    fields(bits = stream.len(), bits_per_symbol = bits_per_symbol, shape = table.shape())
)]
pub fn synthesize_stream(
    stream: &BitStream,
    bits_per_symbol: usize,
    table: &SymbolTable,
    config: &SynthesisConfig,
) -> Result<WaveformResult, SynthesisError> {
    check_symbol_width(stream.len(), bits_per_symbol)?;
    table.validate(bits_per_symbol)?;
    config.validate()?;

    let indices = stream.symbol_indices(bits_per_symbol)?;
    let symbol_count = indices.len();
    let samples_per_symbol = config.samples_per_symbol();
    let sample_count = symbol_count
        .checked_mul(samples_per_symbol)
        .filter(|&count| count <= MAX_SAMPLES)
        .context(InvalidParameterSnafu {
            name: "samples per symbol",
            value: samples_per_symbol as f64,
        })?;

    debug!(
        symbol_count,
        samples_per_symbol,
        sample_count,
        carrier_frequency = config.carrier_frequency,
        "synthesizing"
    );

    if tracing::enabled!(tracing::Level::TRACE) {
        for (i, index) in indices.iter().enumerate() {
            trace!(symbol = i, index, "symbol");
        }
    }

    let time = carrier::time_axis(sample_count, config.sample_rate);
    let window = segment::Window::new(samples_per_symbol, config.sample_rate);
    let fc = config.carrier_frequency;

    let (modulating, modulated, carriers) = match table {
        SymbolTable::PhaseShift { phases } => {
            let values: Vec<f64> = indices.iter().map(|&i| phases[i]).collect();
            let wave = window.tile(&values, |phase, t| (TAU * fc * t + phase).sin());
            (
                Samples::Real(values),
                Samples::Real(wave),
                vec![carrier::in_phase(&time, fc)],
            )
        }
        SymbolTable::FrequencyPair {
            freq_for_zero,
            freq_for_one,
        } => {
            let keyed = [*freq_for_zero, *freq_for_one];
            let values: Vec<f64> = indices.iter().map(|&i| keyed[i]).collect();
            let wave = window.tile(&values, |freq, t| (TAU * freq * t).sin());
            (
                Samples::Real(values),
                Samples::Real(wave),
                vec![
                    carrier::in_phase(&time, fc),
                    carrier::keyed(&time, 0, *freq_for_zero),
                    carrier::keyed(&time, 1, *freq_for_one),
                ],
            )
        }
        SymbolTable::AmplitudeShift { amplitudes } => {
            let values: Vec<f64> = indices.iter().map(|&i| amplitudes[i]).collect();
            let wave = window.tile(&values, |amplitude, t| amplitude * (TAU * fc * t).sin());
            (
                Samples::Real(values),
                Samples::Real(wave),
                vec![carrier::in_phase(&time, fc)],
            )
        }
        SymbolTable::Constellation { points } => {
            let values: Vec<Complex64> = indices.iter().map(|&i| points[i]).collect();
            let wave = window.tile(&values, |point, t| point * Complex64::cis(TAU * fc * t));
            (
                Samples::Complex(values),
                Samples::Complex(wave),
                vec![carrier::in_phase(&time, fc), carrier::quadrature(&time, fc)],
            )
        }
    };

    Ok(WaveformResult {
        time,
        modulating,
        carriers,
        modulated,
        symbol_count,
        samples_per_symbol,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracing_init::init_test_tracing;
    use std::f64::consts::PI;

    fn bpsk() -> SymbolTable {
        SymbolTable::PhaseShift { phases: vec![0.0, PI] }
    }

    #[test]
    fn test_lengths_are_consistent() {
        init_test_tracing();
        let config = SynthesisConfig::new(5.0, 200.0, 0.5);
        let result = synthesize(&[1, 0, 1, 1, 0], 1, &bpsk(), &config).unwrap();

        assert_eq!(result.symbol_count, 5);
        assert_eq!(result.samples_per_symbol, 100);
        assert_eq!(result.time.len(), 500);
        assert_eq!(result.modulated.len(), 500);
        assert_eq!(result.modulating.len(), 5);
        for carrier in &result.carriers {
            assert_eq!(carrier.samples.len(), 500);
        }
    }

    #[test]
    fn test_validation_order() {
        // Length is checked before the bit values
        let err = synthesize(&[2, 0, 1], 2, &bpsk(), &SynthesisConfig::default()).unwrap_err();
        assert!(matches!(err, SynthesisError::InvalidLength { .. }));

        // Bits are checked before the table
        let err = synthesize(&[2, 0], 2, &bpsk(), &SynthesisConfig::default()).unwrap_err();
        assert!(matches!(err, SynthesisError::InvalidBit { position: 0, value: 2 }));

        // Table is checked before the config
        let config = SynthesisConfig::new(-1.0, 1000.0, 1.0);
        let err = synthesize(&[1, 0], 2, &bpsk(), &config).unwrap_err();
        assert!(matches!(err, SynthesisError::InvalidTable { .. }));

        let err = synthesize(&[1, 0], 1, &bpsk(), &config).unwrap_err();
        assert!(matches!(err, SynthesisError::InvalidParameter { name: "carrier frequency", .. }));
    }

    #[test]
    fn test_amplitude_shift_silences_zero_bits() {
        let table = SymbolTable::AmplitudeShift { amplitudes: vec![0.0, 1.0] };
        let result = synthesize(&[0, 1], 1, &table, &SynthesisConfig::default()).unwrap();
        let wave = result.modulated.as_real().unwrap();

        assert!(wave[..1000].iter().all(|&s| s == 0.0));
        for (i, &s) in wave[1000..].iter().enumerate() {
            let expected = (TAU * 5.0 * i as f64 / 1000.0).sin();
            assert!((s - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_frequency_pair_carriers_follow_keyed_tones() {
        let table = SymbolTable::FrequencyPair {
            freq_for_zero: 5.0,
            freq_for_one: 10.0,
        };
        let result = synthesize(&[1, 0], 1, &table, &SynthesisConfig::default()).unwrap();

        assert_eq!(result.carriers.len(), 3);
        assert_eq!(result.modulating, Samples::Real(vec![10.0, 5.0]));

        let reference = result.carrier(CarrierKind::InPhase).unwrap();
        let zero = result.carrier(CarrierKind::Keyed(0)).unwrap();
        let one = result.carrier(CarrierKind::Keyed(1)).unwrap();
        assert_eq!((reference.frequency, zero.frequency, one.frequency), (5.0, 5.0, 10.0));

        for (k, &t) in result.time.iter().enumerate() {
            assert!((reference.samples[k] - (TAU * 5.0 * t).cos()).abs() < 1e-12);
            assert!((zero.samples[k] - (TAU * 5.0 * t).sin()).abs() < 1e-12);
            assert!((one.samples[k] - (TAU * 10.0 * t).sin()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_complex_tables_have_quadrature_reference() {
        let table = SymbolTable::Constellation {
            points: vec![Complex64::new(1.0, 0.0), Complex64::new(-1.0, 0.0)],
        };
        let result = synthesize(&[0, 1], 1, &table, &SynthesisConfig::default()).unwrap();

        let i = result.carrier(CarrierKind::InPhase).unwrap();
        let q = result.carrier(CarrierKind::Quadrature).unwrap();
        for (k, &t) in result.time.iter().enumerate() {
            assert!((i.samples[k] - (TAU * 5.0 * t).cos()).abs() < 1e-12);
            assert!((q.samples[k] - (TAU * 5.0 * t).sin()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_staircase_holds_each_symbol() {
        let config = SynthesisConfig::new(5.0, 10.0, 0.5);
        let result = synthesize(&[0, 1, 1], 1, &bpsk(), &config).unwrap();
        let staircase = result.modulating_staircase();
        let expected: Vec<f64> = [0.0; 5].into_iter().chain([PI; 10]).collect();
        assert_eq!(staircase, Samples::Real(expected));
    }

    #[test]
    fn test_real_part_of_complex_samples() {
        let samples = Samples::Complex(vec![Complex64::new(0.5, 2.0), Complex64::new(-1.0, 0.0)]);
        assert_eq!(samples.real_part(), vec![0.5, -1.0]);
        assert!(samples.as_real().is_none());
    }
}
