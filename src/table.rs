//! Symbol tables
//!
//! A [`SymbolTable`] maps a symbol index `0..M` to the parameters of the carrier
//! segment transmitted for that symbol. Each variant describes the whole table,
//! so one table never mixes phase entries with constellation points.

use num::complex::Complex64;

use crate::bits::MAX_BITS_PER_SYMBOL;
use crate::error::{InvalidTableSnafu, SynthesisError};

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolTable {
    /// Carrier phase offset in radians per symbol (PSK, BPSK)
    PhaseShift { phases: Vec<f64> },
    /// Tone keyed by the value of a single bit (FSK)
    FrequencyPair { freq_for_zero: f64, freq_for_one: f64 },
    /// Complex amplitude per symbol (QAM, QPSK)
    Constellation { points: Vec<Complex64> },
    /// Carrier amplitude per symbol (ASK, on-off keying)
    AmplitudeShift { amplitudes: Vec<f64> },
}

impl SymbolTable {
    /// Number of entries, `M`
    pub fn len(&self) -> usize {
        match self {
            SymbolTable::PhaseShift { phases } => phases.len(),
            SymbolTable::FrequencyPair { .. } => 2,
            SymbolTable::Constellation { points } => points.len(),
            SymbolTable::AmplitudeShift { amplitudes } => amplitudes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the modulated waveform is complex-valued
    pub fn is_complex(&self) -> bool {
        matches!(self, SymbolTable::Constellation { .. })
    }

    /// Short label used in logs and plot titles
    pub fn shape(&self) -> &'static str {
        match self {
            SymbolTable::PhaseShift { .. } => "phase-shift",
            SymbolTable::FrequencyPair { .. } => "frequency-pair",
            SymbolTable::Constellation { .. } => "constellation",
            SymbolTable::AmplitudeShift { .. } => "amplitude-shift",
        }
    }

    /// Check the table has exactly `2^bits_per_symbol` usable entries
    pub fn validate(&self, bits_per_symbol: usize) -> Result<(), SynthesisError> {
        if bits_per_symbol == 0 || bits_per_symbol > MAX_BITS_PER_SYMBOL {
            return InvalidTableSnafu {
                reason: format!(
                    "bits per symbol must be between 1 and {MAX_BITS_PER_SYMBOL}, got {bits_per_symbol}"
                ),
            }
            .fail();
        }

        let expected = 1_usize << bits_per_symbol;
        if self.len() != expected {
            return InvalidTableSnafu {
                reason: format!(
                    "{} table has {} entries, {bits_per_symbol} bits per symbol needs {expected}",
                    self.shape(),
                    self.len()
                ),
            }
            .fail();
        }

        match self {
            SymbolTable::PhaseShift { phases } => {
                if let Some(phase) = phases.iter().find(|p| !p.is_finite()) {
                    return InvalidTableSnafu {
                        reason: format!("phase {phase} is not finite"),
                    }
                    .fail();
                }
            }
            SymbolTable::FrequencyPair {
                freq_for_zero,
                freq_for_one,
            } => {
                for freq in [freq_for_zero, freq_for_one] {
                    if !freq.is_finite() || *freq < 0.0 {
                        return InvalidTableSnafu {
                            reason: format!(
                                "keyed frequency {freq} must be finite and non-negative"
                            ),
                        }
                        .fail();
                    }
                }
            }
            SymbolTable::Constellation { points } => {
                if let Some(point) = points.iter().find(|p| !p.is_finite()) {
                    return InvalidTableSnafu {
                        reason: format!("constellation point {point} is not finite"),
                    }
                    .fail();
                }
            }
            SymbolTable::AmplitudeShift { amplitudes } => {
                if let Some(amplitude) = amplitudes.iter().find(|a| !a.is_finite() || **a < 0.0) {
                    return InvalidTableSnafu {
                        reason: format!("amplitude {amplitude} must be finite and non-negative"),
                    }
                    .fail();
                }
            }
        }

        Ok(())
    }
}

/// `log2(len)` when `len` is a power of two of at least 2
pub fn bits_per_symbol_for(len: usize) -> Result<usize, SynthesisError> {
    if len < 2 || !len.is_power_of_two() {
        return InvalidTableSnafu {
            reason: format!("number of constellation points must be a power of two, got {len}"),
        }
        .fail();
    }
    Ok(len.trailing_zeros() as usize)
}
