pub mod bits;
pub mod config;
pub mod error;
pub mod input;
pub mod modulation;
pub mod plot;
pub mod scheme;
pub mod table;
pub mod tracing_init;
pub mod wav;

pub use config::SynthesisConfig;
pub use error::{InputError, SynthesisError};
pub use modulation::{
    amplitude_modulation, frequency_modulation, synthesize, synthesize_stream, AnalogConfig,
    AnalogWaveform, Carrier, CarrierKind, Samples, WaveformResult,
};
pub use scheme::{Scheme, SchemeKind, SchemeOptions, SymbolLayout};
pub use table::SymbolTable;
