//! Modulation scheme registry
//!
//! Every scheme the tool offers is listed here at compile time. A digital scheme
//! is nothing more than a symbol width plus a [`SymbolTable`]; the analog schemes
//! have their own synthesizers in [`crate::modulation::analog`].

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use num::complex::Complex64;

use crate::error::{InputError, SynthesisError};
use crate::table::{bits_per_symbol_for, SymbolTable};

/// Tone for a 0 bit in FSK when none is given (Hz)
pub const DEFAULT_FREQ_FOR_ZERO: f64 = 5.0;

/// Tone for a 1 bit in FSK when none is given (Hz)
pub const DEFAULT_FREQ_FOR_ONE: f64 = 10.0;

/// Carrier amplitude for a 1 bit in ASK when none is given
pub const DEFAULT_AMPLITUDE: f64 = 1.0;

/// QPSK constellation indexed by the big-endian dibit: 00, 01, 10, 11
pub const QPSK_POINTS: [Complex64; 4] = [
    Complex64::new(1.0, 0.0),
    Complex64::new(0.0, 1.0),
    Complex64::new(-1.0, 0.0),
    Complex64::new(0.0, -1.0),
];

/// Default square 4-QAM constellation
pub const QAM4_POINTS: [Complex64; 4] = [
    Complex64::new(1.0, 1.0),
    Complex64::new(1.0, -1.0),
    Complex64::new(-1.0, 1.0),
    Complex64::new(-1.0, -1.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Ask,
    Fsk,
    Psk,
    Bpsk,
    Qpsk,
    Qam,
    Am,
    Fm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeKind {
    /// Driven by a bitstream through the symbol synthesizer
    Digital,
    /// Driven by a single-tone message
    Analog,
}

/// Tunable parts of the scheme tables
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeOptions {
    pub freq_for_zero: f64,
    pub freq_for_one: f64,
    /// ASK carrier amplitude for a 1 bit; a 0 bit is always silent
    pub amplitude: f64,
    /// Replaces the default 4-QAM constellation
    pub constellation: Option<Vec<Complex64>>,
}

impl Default for SchemeOptions {
    fn default() -> Self {
        Self {
            freq_for_zero: DEFAULT_FREQ_FOR_ZERO,
            freq_for_one: DEFAULT_FREQ_FOR_ONE,
            amplitude: DEFAULT_AMPLITUDE,
            constellation: None,
        }
    }
}

/// Symbol width and table for one digital scheme
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolLayout {
    pub bits_per_symbol: usize,
    pub table: SymbolTable,
}

impl Scheme {
    pub const ALL: [Scheme; 8] = [
        Scheme::Ask,
        Scheme::Fsk,
        Scheme::Psk,
        Scheme::Bpsk,
        Scheme::Qpsk,
        Scheme::Qam,
        Scheme::Am,
        Scheme::Fm,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scheme::Ask => "ASK",
            Scheme::Fsk => "FSK",
            Scheme::Psk => "PSK",
            Scheme::Bpsk => "BPSK",
            Scheme::Qpsk => "QPSK",
            Scheme::Qam => "QAM",
            Scheme::Am => "AM",
            Scheme::Fm => "FM",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scheme::Ask => "amplitude-shift keying, carrier at full amplitude for 1 and off for 0",
            Scheme::Fsk => "frequency-shift keying between two tones",
            Scheme::Psk => "phase-shift keying, 0 and π",
            Scheme::Bpsk => "binary phase-shift keying, 0 and π",
            Scheme::Qpsk => "quadrature phase-shift keying, 2 bits per symbol",
            Scheme::Qam => "quadrature amplitude modulation, 4-QAM or a custom constellation",
            Scheme::Am => "analog amplitude modulation of a sine message",
            Scheme::Fm => "analog frequency modulation of a sine message",
        }
    }

    pub fn kind(&self) -> SchemeKind {
        match self {
            Scheme::Am | Scheme::Fm => SchemeKind::Analog,
            _ => SchemeKind::Digital,
        }
    }

    /// Symbol width and table, or `None` for the analog schemes
    ///
    /// # Example
    /// ```
    /// use modsynth::scheme::{Scheme, SchemeOptions};
    ///
    /// let layout = Scheme::Qpsk.symbol_layout(&SchemeOptions::default())?.unwrap();
    /// assert_eq!(layout.bits_per_symbol, 2);
    /// assert_eq!(layout.table.len(), 4);
    /// # Ok::<(), modsynth::SynthesisError>(())
    /// ```
    pub fn symbol_layout(
        &self,
        options: &SchemeOptions,
    ) -> Result<Option<SymbolLayout>, SynthesisError> {
        let (bits_per_symbol, table) = match self {
            Scheme::Ask => (
                1,
                SymbolTable::AmplitudeShift {
                    amplitudes: vec![0.0, options.amplitude],
                },
            ),
            Scheme::Fsk => (
                1,
                SymbolTable::FrequencyPair {
                    freq_for_zero: options.freq_for_zero,
                    freq_for_one: options.freq_for_one,
                },
            ),
            Scheme::Psk | Scheme::Bpsk => (1, SymbolTable::PhaseShift { phases: vec![0.0, PI] }),
            Scheme::Qpsk => (
                2,
                SymbolTable::Constellation {
                    points: QPSK_POINTS.to_vec(),
                },
            ),
            Scheme::Qam => {
                let points = options
                    .constellation
                    .clone()
                    .unwrap_or_else(|| QAM4_POINTS.to_vec());
                (bits_per_symbol_for(points.len())?, SymbolTable::Constellation { points })
            }
            Scheme::Am | Scheme::Fm => return Ok(None),
        };

        table.validate(bits_per_symbol)?;
        Ok(Some(SymbolLayout { bits_per_symbol, table }))
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Scheme {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| InputError::UnknownScheme { name: name.to_string() })
    }
}
