//! Masked-AES trace capture CLI.
//!
//! This binary drives encryption traces through the behavioral reference
//! core model. It performs:
//! 1. **Trace runs:** One or more sequenced traces with per-cycle activity capture.
//! 2. **Input handling:** Explicit hex input buffers or deterministic generated ones.
//! 3. **Output:** Captured samples and run summaries as JSON (file or stdout).

use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde::Serialize;
use std::io::Write;
use std::{fs, process};

use masksim_core::layout::{self, encode_trace_input};
use masksim_core::model::{ModelConfig, ReferenceCircuit};
use masksim_core::probe::{ActivityRecorder, SampleRecord};
use masksim_core::sequencer::RunSummary;
use masksim_core::{RunSequencer, SequencerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "masksim",
    author,
    version,
    about = "Masked-AES trace capture over a simulated core",
    long_about = "Drive encryption traces through the behavioral reference model of a masked AES core and capture per-cycle activity for side-channel analysis.\n\nConfiguration is JSON (see --config). Inputs follow the seed || plaintext-shares || key-shares wire layout.\n\nExamples:\n  masksim run --traces 100 --output traces.json\n  masksim run --input-hex <hex>\n  masksim run --config harness.json --traces 10"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one or more traces against the reference model.
    Run {
        /// JSON config file with "sequencer" and "model" sections.
        #[arg(short, long)]
        config: Option<String>,

        /// Full input buffer as hex (seed || plaintext shares || key shares).
        #[arg(long)]
        input_hex: Option<String>,

        /// Number of traces to run with generated inputs.
        #[arg(long, default_value_t = 1)]
        traces: u64,

        /// Generator seed for input material (ignored with --input-hex).
        #[arg(long, default_value_t = 1)]
        gen_seed: u64,

        /// Output file for captured traces (stdout when omitted).
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Top-level JSON configuration: sequencer and model sections, both optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct HarnessConfig {
    /// Run sequencer parameters (shares, wait ceilings).
    #[serde(default)]
    sequencer: Option<SequencerConfig>,
    /// Reference model timing parameters.
    #[serde(default)]
    model: Option<ModelConfig>,
}

/// One captured trace: accounting plus the per-cycle samples.
#[derive(Debug, Clone, Serialize)]
struct TraceOutput {
    /// Trace index within this invocation.
    trace: u64,
    /// Cycle and sample accounting for the run.
    summary: RunSummary,
    /// Per-cycle activity samples in capture order.
    samples: Vec<SampleRecord>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            config,
            input_hex,
            traces,
            gen_seed,
            output,
        }) => cmd_run(config, input_hex, traces, gen_seed, output),
        None => {
            eprintln!("masksim — pass a subcommand");
            eprintln!();
            eprintln!("  masksim run --traces 100 -o traces.json   Capture 100 traces");
            eprintln!("  masksim run --input-hex <hex>             Single explicit input");
            eprintln!();
            eprintln!("  masksim --help  for full options");
            process::exit(1);
        }
    }
}

/// Runs the requested traces and writes the captured samples as JSON.
///
/// Builds a fresh reference circuit per trace (each trace is one power-on
/// encryption), runs the sequencer over it, and collects summaries plus
/// activity samples. Exits with code 1 on config, input, or run errors.
fn cmd_run(
    config_path: Option<String>,
    input_hex: Option<String>,
    traces: u64,
    gen_seed: u64,
    output: Option<String>,
) {
    let harness = load_config(config_path.as_deref());
    let seq_config = harness.sequencer.unwrap_or_default();
    let model_config = harness.model.unwrap_or_else(|| ModelConfig {
        shares: seq_config.shares,
        ..ModelConfig::default()
    });

    if seq_config.shares != model_config.shares {
        eprintln!(
            "Error: sequencer shares ({}) != model shares ({})",
            seq_config.shares, model_config.shares
        );
        process::exit(1);
    }

    println!(
        "Configuration: shares={} handshake_ceiling={:?} compute_cycles={}",
        seq_config.shares, seq_config.handshake_ceiling, model_config.compute_cycles
    );

    let sequencer = RunSequencer::new(seq_config.clone());
    let mut generator = InputGenerator::new(gen_seed);
    let mut outputs = Vec::new();

    let trace_count = if input_hex.is_some() { 1 } else { traces };
    for trace in 0..trace_count {
        let data = match &input_hex {
            Some(hex) => parse_hex(hex).unwrap_or_else(|e| {
                eprintln!("Error: bad --input-hex: {e}");
                process::exit(1);
            }),
            None => generator.next_input(seq_config.shares),
        };

        let mut circuit = ReferenceCircuit::new(model_config);
        let mut probe = ActivityRecorder::new();

        match sequencer.run(&mut circuit, &mut probe, &data) {
            Ok(summary) => {
                println!(
                    "[*] trace {trace}: {} cycles, {} samples",
                    summary.total_cycles, summary.samples
                );
                outputs.push(TraceOutput {
                    trace,
                    summary,
                    samples: probe.into_records(),
                });
            }
            Err(e) => {
                eprintln!("\n[!] trace {trace} failed: {e}");
                process::exit(1);
            }
        }
    }

    write_output(&outputs, output.as_deref());
}

/// Loads and parses the harness config file, or returns defaults.
fn load_config(path: Option<&str>) -> HarnessConfig {
    path.map_or_else(HarnessConfig::default, |p| {
        let text = fs::read_to_string(p).unwrap_or_else(|e| {
            eprintln!("Error reading config {p}: {e}");
            process::exit(1);
        });
        serde_json::from_str(&text).unwrap_or_else(|e| {
            eprintln!("Error parsing config {p}: {e}");
            process::exit(1);
        })
    })
}

/// Serializes the trace outputs to the given path or stdout.
fn write_output(outputs: &[TraceOutput], path: Option<&str>) {
    let json = serde_json::to_string_pretty(outputs).unwrap_or_else(|e| {
        eprintln!("Error serializing traces: {e}");
        process::exit(1);
    });
    match path {
        Some(p) => {
            fs::write(p, json).unwrap_or_else(|e| {
                eprintln!("Error writing {p}: {e}");
                process::exit(1);
            });
            println!("[*] wrote {} trace(s) to {p}", outputs.len());
        }
        None => {
            let mut stdout = std::io::stdout();
            if writeln!(stdout, "{json}").is_err() {
                process::exit(1);
            }
        }
    }
}

/// Deterministic input-material generator (splitmix64 over a user seed).
#[derive(Debug)]
struct InputGenerator {
    state: u64,
}

impl InputGenerator {
    const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn fill(&mut self, len: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(len);
        while out.len() < len {
            let word = self.next_u64().to_le_bytes();
            let take = word.len().min(len - out.len());
            out.extend_from_slice(&word[..take]);
        }
        out
    }

    /// Generates one full input buffer for the given share count.
    fn next_input(&mut self, shares: usize) -> Vec<u8> {
        let seed = self.fill(layout::SEED_BYTES);
        let pt = self.fill(layout::BLOCK_BYTES * shares);
        let key = self.fill(layout::BLOCK_BYTES * shares);
        // Lengths are correct by construction.
        encode_trace_input(&seed, &pt, &key).unwrap_or_default()
    }
}

/// Parses a hex string (optionally `0x`-prefixed, whitespace tolerated).
fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let cleaned: String = s
        .trim()
        .trim_start_matches("0x")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.len() % 2 != 0 {
        return Err(format!("odd number of hex digits ({})", cleaned.len()));
    }
    let mut out = Vec::with_capacity(cleaned.len() / 2);
    let bytes = cleaned.as_bytes();
    for pair in bytes.chunks(2) {
        let hi = hex_digit(pair[0])?;
        let lo = hex_digit(pair[1])?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}

/// Converts one ASCII hex digit to its value.
fn hex_digit(c: u8) -> Result<u8, String> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(format!("invalid hex digit '{}'", c as char)),
    }
}
