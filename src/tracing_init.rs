//! Log subscriber setup
//!
//! Library code only emits `tracing` events; these two functions install the
//! `fmt` subscriber that prints them. `RUST_LOG` overrides the default filter.

#[cfg(test)]
use once_cell::sync::Lazy;

/// Install a subscriber whose output the test harness captures
///
/// Quiet by default (`modsynth=warn`). Useful overrides:
/// - `RUST_LOG=modsynth=debug` - one line per synthesis call with its sample counts
/// - `RUST_LOG=modsynth::modulation=trace` - every symbol index as it is looked up
///
/// Only the first call installs anything.
#[cfg(test)]
pub fn init_test_tracing() {
    static TRACING: Lazy<()> = Lazy::new(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("modsynth=warn"));

        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .with_test_writer()
            .init();
    });

    Lazy::force(&TRACING);
}

/// Install the `modsynth` binary's subscriber
///
/// Logs go to stderr so the summary printed on stdout stays clean for piping.
/// Shows which plot and WAV files were written (`modsynth=info`) unless
/// `RUST_LOG` says otherwise.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("modsynth=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
