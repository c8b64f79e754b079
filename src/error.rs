use snafu::Snafu;

/// Validation failures raised by the synthesizers before any buffer is allocated
#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SynthesisError {
    /// Bit count is not a whole number of symbols
    #[snafu(display(
        "bit count must be a multiple of bits-per-symbol (got {bit_count} bits, {bits_per_symbol} bits per symbol)"
    ))]
    InvalidLength {
        bit_count: usize,
        bits_per_symbol: usize,
    },

    /// Bitstream contains something other than 0 or 1
    #[snafu(display("bit at position {position} is {value}, expected 0 or 1"))]
    InvalidBit { position: usize, value: u8 },

    /// Symbol table does not fit the requested symbol width
    #[snafu(display("invalid symbol table: {reason}"))]
    InvalidTable { reason: String },

    /// Carrier frequency, sample rate or duration out of range
    #[snafu(display("{name} must be finite and greater than zero, got {value}"))]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Format errors from the text input layer
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum InputError {
    /// Nothing to parse
    #[snafu(display("input is empty"))]
    EmptyInput,

    /// Opening and closing brackets do not match
    #[snafu(display("unbalanced brackets in {input:?}"))]
    MalformedBrackets { input: String },

    /// Token is not a small unsigned integer
    #[snafu(display("{token:?} is not a number"))]
    NotANumber { token: String },

    /// Token is not a complex literal such as 1+1j
    #[snafu(display("{token:?} is not a complex number"))]
    MalformedComplex { token: String },

    /// Name is not in the scheme registry
    #[snafu(display("unknown modulation scheme {name:?}"))]
    UnknownScheme { name: String },
}
