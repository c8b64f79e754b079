//! Bitstreams and symbol packing
//!
//! A [`BitStream`] is the validated form of the caller's 0/1 sequence. Bits are
//! stored most-significant-first so that a group of `bits_per_symbol` bits can be
//! loaded straight into a big-endian symbol index: the first bit read becomes
//! the most significant bit of the index.

use bitvec::prelude::*;

use crate::error::{InvalidBitSnafu, InvalidLengthSnafu, InvalidTableSnafu, SynthesisError};

/// Widest symbol the synthesizer will pack (a 65536-entry table)
pub const MAX_BITS_PER_SYMBOL: usize = 16;

/// Immutable sequence of bits
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitStream {
    bits: BitVec<u8, Msb0>,
}

impl BitStream {
    /// Build a stream from raw integer values, rejecting anything but 0 and 1
    ///
    /// # Example
    /// ```
    /// use modsynth::bits::BitStream;
    ///
    /// let stream = BitStream::from_values(&[1, 0, 1, 1])?;
    /// assert_eq!(stream.symbol_indices(2)?, vec![2, 3]);
    /// # Ok::<(), modsynth::SynthesisError>(())
    /// ```
    pub fn from_values(values: &[u8]) -> Result<Self, SynthesisError> {
        if let Some((position, &value)) = values.iter().enumerate().find(|&(_, &v)| v > 1) {
            return InvalidBitSnafu { position, value }.fail();
        }

        let bits = values.iter().map(|&v| v == 1).collect();
        Ok(BitStream { bits })
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Number of whole symbols of the given width
    pub fn symbol_count(&self, bits_per_symbol: usize) -> Result<usize, SynthesisError> {
        check_symbol_width(self.len(), bits_per_symbol)?;
        Ok(self.len() / bits_per_symbol)
    }

    /// Pack each group of `bits_per_symbol` bits into a big-endian symbol index
    pub fn symbol_indices(&self, bits_per_symbol: usize) -> Result<Vec<usize>, SynthesisError> {
        check_symbol_width(self.len(), bits_per_symbol)?;
        if bits_per_symbol > MAX_BITS_PER_SYMBOL {
            return InvalidTableSnafu {
                reason: format!(
                    "at most {MAX_BITS_PER_SYMBOL} bits per symbol are supported, got {bits_per_symbol}"
                ),
            }
            .fail();
        }

        let indices = self
            .bits
            .chunks_exact(bits_per_symbol)
            .map(|chunk| chunk.load_be::<usize>())
            .collect();

        Ok(indices)
    }
}

/// Reject bit counts that do not divide into whole symbols
pub(crate) fn check_symbol_width(
    bit_count: usize,
    bits_per_symbol: usize,
) -> Result<(), SynthesisError> {
    if bits_per_symbol == 0 || bit_count % bits_per_symbol != 0 {
        return InvalidLengthSnafu {
            bit_count,
            bits_per_symbol,
        }
        .fail();
    }
    Ok(())
}

impl TryFrom<&[u8]> for BitStream {
    type Error = SynthesisError;

    fn try_from(values: &[u8]) -> Result<Self, Self::Error> {
        BitStream::from_values(values)
    }
}

impl std::fmt::Display for BitStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in self.bits.iter() {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_binary_value() {
        let err = BitStream::from_values(&[1, 0, 2, 3]).unwrap_err();
        assert_eq!(err, SynthesisError::InvalidBit { position: 2, value: 2 });
    }

    #[test]
    fn test_empty_stream_has_no_symbols() {
        let stream = BitStream::from_values(&[]).unwrap();
        assert!(stream.is_empty());
        assert_eq!(stream.symbol_indices(2).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_first_bit_is_most_significant() {
        let stream = BitStream::from_values(&[0, 1, 1, 0]).unwrap();
        assert_eq!(stream.symbol_indices(2).unwrap(), vec![1, 2]);

        let stream = BitStream::from_values(&[1, 0, 0, 0, 0, 1, 1, 1]).unwrap();
        assert_eq!(stream.symbol_indices(4).unwrap(), vec![8, 7]);
    }

    #[test]
    fn test_single_bit_symbols() {
        let stream = BitStream::from_values(&[1, 0, 1]).unwrap();
        assert_eq!(stream.symbol_indices(1).unwrap(), vec![1, 0, 1]);
    }

    #[test]
    fn test_partial_symbol_is_rejected() {
        let stream = BitStream::from_values(&[1, 0, 1]).unwrap();
        let err = stream.symbol_indices(2).unwrap_err();
        assert_eq!(
            err,
            SynthesisError::InvalidLength {
                bit_count: 3,
                bits_per_symbol: 2
            }
        );
    }

    #[test]
    fn test_zero_width_symbol_is_rejected() {
        let stream = BitStream::from_values(&[1, 0]).unwrap();
        assert!(matches!(
            stream.symbol_count(0),
            Err(SynthesisError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_display() {
        let stream = BitStream::from_values(&[1, 0, 0, 1]).unwrap();
        assert_eq!(stream.to_string(), "1001");
    }
}
