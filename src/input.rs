//! Text input parsing for bit sequences and constellations
//!
//! Accepts the formats people type into the entry fields:
//! - `1,0,1,0` or `[1, 0, 1, 0]`
//! - `1 0 1 0`
//! - bare runs such as `1010` or `1010 0110`
//!
//! Any token of more than one digit is a run: each digit becomes one value.
//! Only the format is checked here. A value like `2` parses fine and is
//! rejected later by the synthesizer as an invalid bit.

use num::complex::Complex64;
use rand::Rng;

use crate::error::{
    EmptyInputSnafu, InputError, MalformedBracketsSnafu, MalformedComplexSnafu, NotANumberSnafu,
};

/// Split a bracketed or bare list into tokens
fn tokenize(input: &str) -> Result<Vec<&str>, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return EmptyInputSnafu.fail();
    }

    let opens = trimmed.starts_with('[');
    let closes = trimmed.ends_with(']');
    if opens != closes {
        return MalformedBracketsSnafu { input: trimmed }.fail();
    }

    let body = if opens {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    if body.contains(|c: char| c == '[' || c == ']') {
        return MalformedBracketsSnafu { input: trimmed }.fail();
    }

    let body = body.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    if body.contains(',') {
        Ok(body.split(',').map(str::trim).collect())
    } else {
        Ok(body.split_whitespace().collect())
    }
}

/// Parse a bit sequence
///
/// # Example
/// ```
/// use modsynth::input::parse_bits;
///
/// assert_eq!(parse_bits("[1, 0, 1, 0]")?, vec![1, 0, 1, 0]);
/// assert_eq!(parse_bits("0110")?, vec![0, 1, 1, 0]);
/// # Ok::<(), modsynth::InputError>(())
/// ```
pub fn parse_bits(input: &str) -> Result<Vec<u8>, InputError> {
    let mut bits = Vec::new();
    for token in tokenize(input)? {
        if token.len() > 1 && token.bytes().all(|b| b.is_ascii_digit()) {
            bits.extend(token.bytes().map(|b| b - b'0'));
        } else {
            bits.push(
                token
                    .parse::<u8>()
                    .map_err(|_| NotANumberSnafu { token }.build())?,
            );
        }
    }
    Ok(bits)
}

/// Parse a list of complex constellation points such as `1+1j, 1-1j, -1+1j, -1-1j`
pub fn parse_constellation(input: &str) -> Result<Vec<Complex64>, InputError> {
    tokenize(input)?
        .into_iter()
        .map(|token| {
            let literal = token.trim_start_matches('(').trim_end_matches(')');
            literal
                .parse::<Complex64>()
                .map_err(|_| MalformedComplexSnafu { token }.build())
        })
        .collect()
}

/// `count` uniformly random bits
pub fn random_bits<R: Rng>(rng: &mut R, count: usize) -> Vec<u8> {
    (0..count).map(|_| rng.random_range(0..=1)).collect()
}
