use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use snafu::{ResultExt, Snafu};
use tracing::info;

use modsynth::config::{DEFAULT_CARRIER_FREQUENCY, DEFAULT_SAMPLE_RATE, DEFAULT_SYMBOL_DURATION};
use modsynth::input::{parse_bits, parse_constellation, random_bits};
use modsynth::plot::{render_analog, render_digital, PlotError};
use modsynth::scheme::{DEFAULT_AMPLITUDE, DEFAULT_FREQ_FOR_ONE, DEFAULT_FREQ_FOR_ZERO};
use modsynth::tracing_init::init_tracing;
use modsynth::wav::{write_wav, WavError};
use modsynth::{
    amplitude_modulation, frequency_modulation, synthesize, AnalogConfig, InputError, Samples,
    Scheme, SchemeKind, SchemeOptions, SynthesisConfig, SynthesisError,
};

/// Number of symbols echoed in the summary
const SUMMARY_SYMBOLS: usize = 8;

#[derive(Parser)]
#[command(
    name = "modsynth",
    version,
    about = "Synthesize and plot digital and analog modulation waveforms"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available modulation schemes
    List,
    /// Modulate a bit sequence (ASK, FSK, PSK, BPSK, QPSK, QAM)
    Digital(DigitalArgs),
    /// Modulate a sine message (AM, FM)
    Analog(AnalogArgs),
}

#[derive(Args)]
struct OutputArgs {
    /// Write an SVG plot of the waveform
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Write the modulated signal (real part) as a 16-bit WAV file
    #[arg(long)]
    wav: Option<PathBuf>,
}

#[derive(Args)]
struct DigitalArgs {
    scheme: Scheme,
    /// Bits such as "1,0,1,0", "[1, 0, 1, 0]" or "1010"
    #[arg(long, required_unless_present = "random", conflicts_with = "random")]
    bits: Option<String>,
    /// Use this many random bits instead of --bits
    #[arg(long)]
    random: Option<usize>,
    /// Carrier frequency (Hz)
    #[arg(long, default_value_t = DEFAULT_CARRIER_FREQUENCY)]
    carrier: f64,
    /// Sample rate (Hz)
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: f64,
    /// Symbol duration (seconds)
    #[arg(long, default_value_t = DEFAULT_SYMBOL_DURATION)]
    duration: f64,
    /// FSK tone for a 0 bit (Hz)
    #[arg(long, default_value_t = DEFAULT_FREQ_FOR_ZERO)]
    f0: f64,
    /// FSK tone for a 1 bit (Hz)
    #[arg(long, default_value_t = DEFAULT_FREQ_FOR_ONE)]
    f1: f64,
    /// ASK carrier amplitude for a 1 bit
    #[arg(long, default_value_t = DEFAULT_AMPLITUDE)]
    amplitude: f64,
    /// QAM constellation such as "1+1j, 1-1j, -1+1j, -1-1j"
    #[arg(long)]
    points: Option<String>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct AnalogArgs {
    scheme: Scheme,
    /// Carrier frequency (Hz)
    #[arg(long, default_value_t = 10.0)]
    carrier: f64,
    /// Sample rate (Hz)
    #[arg(long, default_value_t = 1000.0)]
    sample_rate: f64,
    /// Signal duration (seconds)
    #[arg(long, default_value_t = 2.0)]
    duration: f64,
    /// Message frequency (Hz)
    #[arg(long, default_value_t = 1.0)]
    message_freq: f64,
    /// FM peak frequency deviation (Hz)
    #[arg(long, default_value_t = 5.0)]
    deviation: f64,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Snafu)]
enum CliError {
    #[snafu(display("{scheme} is not a {expected} scheme"))]
    WrongKind { scheme: Scheme, expected: &'static str },

    #[snafu(display("invalid input"))]
    Input { source: InputError },

    #[snafu(display("synthesis failed"))]
    Synthesis { source: SynthesisError },

    #[snafu(display("could not plot"))]
    Plot { source: PlotError },

    #[snafu(display("could not export audio"))]
    Wav { source: WavError },
}

fn list() {
    for scheme in Scheme::ALL {
        let kind = match scheme.kind() {
            SchemeKind::Digital => "digital",
            SchemeKind::Analog => "analog",
        };
        println!("{:<5} {:<8} {}", scheme.name(), kind, scheme.description());
    }
}

fn write_outputs(
    output: &OutputArgs,
    title: &str,
    plot: impl FnOnce(&Path) -> Result<(), PlotError>,
    samples: &[f64],
    sample_rate: f64,
) -> Result<(), CliError> {
    if let Some(path) = &output.plot {
        plot(path.as_path()).context(PlotSnafu)?;
        info!(path = %path.display(), "{title} plot written");
    }
    if let Some(path) = &output.wav {
        write_wav(path, samples, sample_rate).context(WavSnafu)?;
        info!(path = %path.display(), "{title} audio written");
    }
    Ok(())
}

fn digital(args: DigitalArgs) -> Result<(), CliError> {
    if args.scheme.kind() != SchemeKind::Digital {
        return WrongKindSnafu {
            scheme: args.scheme,
            expected: "digital",
        }
        .fail();
    }

    let bits = match (&args.bits, args.random) {
        (Some(text), _) => parse_bits(text).context(InputSnafu)?,
        (None, Some(count)) => random_bits(&mut rand::rng(), count),
        (None, None) => Vec::new(),
    };

    let constellation = args
        .points
        .as_deref()
        .map(parse_constellation)
        .transpose()
        .context(InputSnafu)?;

    let options = SchemeOptions {
        freq_for_zero: args.f0,
        freq_for_one: args.f1,
        amplitude: args.amplitude,
        constellation,
    };
    let layout = args
        .scheme
        .symbol_layout(&options)
        .context(SynthesisSnafu)?
        .ok_or(CliError::WrongKind {
            scheme: args.scheme,
            expected: "digital",
        })?;

    let config = SynthesisConfig::new(args.carrier, args.sample_rate, args.duration);
    let result = synthesize(&bits, layout.bits_per_symbol, &layout.table, &config)
        .context(SynthesisSnafu)?;

    let bit_string: String = bits.iter().map(|b| char::from(b'0' + b)).collect();
    println!("Scheme: {} ({} bits per symbol)", args.scheme, layout.bits_per_symbol);
    println!("Bits: {bit_string}");
    println!("Symbols: {}", result.symbol_count);
    println!("Samples per symbol: {}", result.samples_per_symbol);
    println!("Samples: {}", result.time.len());

    let shown: Vec<String> = match &result.modulating {
        Samples::Real(values) => values
            .iter()
            .take(SUMMARY_SYMBOLS)
            .map(|v| format!("{v:.3}"))
            .collect(),
        Samples::Complex(values) => values
            .iter()
            .take(SUMMARY_SYMBOLS)
            .map(|v| format!("{v:.3}"))
            .collect(),
    };
    println!("Symbol values: [{}]", shown.join(", "));

    let title = format!("{} modulation", args.scheme);
    write_outputs(
        &args.output,
        &title,
        |path| render_digital(&result, &title, path),
        &result.modulated.real_part(),
        config.sample_rate,
    )
}

fn analog(args: AnalogArgs) -> Result<(), CliError> {
    let config = AnalogConfig {
        carrier_frequency: args.carrier,
        sample_rate: args.sample_rate,
        duration: args.duration,
        message_frequency: args.message_freq,
    };

    let waveform = match args.scheme {
        Scheme::Am => amplitude_modulation(&config),
        Scheme::Fm => frequency_modulation(&config, args.deviation),
        scheme => {
            return WrongKindSnafu {
                scheme,
                expected: "analog",
            }
            .fail()
        }
    }
    .context(SynthesisSnafu)?;

    println!("Scheme: {}", args.scheme);
    println!("Samples: {}", waveform.time.len());

    let title = format!("{} modulation", args.scheme);
    write_outputs(
        &args.output,
        &title,
        |path| render_analog(&waveform, &title, path),
        &waveform.modulated,
        config.sample_rate,
    )
}

#[snafu::report]
fn main() -> Result<(), CliError> {
    init_tracing();

    match Cli::parse().command {
        Command::List => {
            list();
            Ok(())
        }
        Command::Digital(args) => digital(args),
        Command::Analog(args) => analog(args),
    }
}
