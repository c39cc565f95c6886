//! Shared mock infrastructure for sequencer tests.


use masksim_core::layout::{BLOCK_BYTES, SEED_BYTES, encode_trace_input};

/// Initializes tracing for a test; safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a valid trace input buffer with recognizable field fill bytes.
///
/// Seed bytes are `0xA0..`, plaintext shares `0xB0 + i`, key shares `0xC0 + i`,
/// so misplaced copies show up immediately in assertions.
pub fn patterned_input(shares: usize) -> Vec<u8> {
    let seed: Vec<u8> = (0..SEED_BYTES as u8).map(|i| 0xA0 ^ i).collect();
    let pt: Vec<u8> = (0..(BLOCK_BYTES * shares) as u8).map(|i| 0xB0 ^ i).collect();
    let key: Vec<u8> = (0..(BLOCK_BYTES * shares) as u8).map(|i| 0xC0 ^ i).collect();
    encode_trace_input(&seed, &pt, &key).unwrap()
}
