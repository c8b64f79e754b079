//! Benchmark for the symbol synthesizer
//!
//! Times `synthesize` for each digital scheme over increasing bit counts

use modsynth::input::random_bits;
use modsynth::{synthesize, Scheme, SchemeOptions, SynthesisConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

const RUNS: u32 = 10;

fn main() {
    println!("\n=== Symbol Synthesis Benchmark ===\n");

    // (name, bit count, sample rate)
    let test_configs = vec![
        ("Short burst", 64, 1000.0),
        ("Long message", 4096, 1000.0),
        ("High sample rate", 256, 48000.0),
    ];

    let mut rng = StdRng::seed_from_u64(42);

    for (name, bit_count, sample_rate) in test_configs {
        println!("Test: {}", name);
        println!("  {} bits, {} Hz", bit_count, sample_rate);

        let bits = random_bits(&mut rng, bit_count);
        let config = SynthesisConfig::new(5.0, sample_rate, 0.1);

        for scheme in Scheme::ALL {
            let Some(layout) = scheme
                .symbol_layout(&SchemeOptions::default())
                .expect("Default scheme table")
            else {
                continue;
            };

            let start = Instant::now();
            let mut samples = 0;
            for _ in 0..RUNS {
                let result = synthesize(&bits, layout.bits_per_symbol, &layout.table, &config)
                    .expect("Synthesis failed");
                samples += result.time.len();
            }
            let elapsed = start.elapsed();

            println!(
                "  {:<5} {:>10.2?} per run, {:.1} Msamples/sec",
                scheme.name(),
                elapsed / RUNS,
                samples as f64 / elapsed.as_secs_f64() / 1e6
            );
        }
        println!();
    }
}
