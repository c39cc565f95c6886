//! Behavioral reference circuit model.
//!
//! This module provides a software stand-in for a Verilated masked-AES
//! netlist. It reproduces the core's interface timing contract rather than
//! the cipher itself:
//! 1. **Handshakes:** Configurable ready latencies; the seed acknowledgment is
//!    latched and must be host-cleared, the input acknowledgment tracks `valid`.
//! 2. **Compute:** A fixed cycle count before `output_valid` asserts.
//! 3. **Activity:** A deterministic per-cycle activity word derived from the
//!    loaded seed and shares, usable as a leakage proxy in tests and demos.
//!
//! The model is driven exclusively through the [`ClockedCircuit`] trait.

use serde::Deserialize;

use crate::circuit::ClockedCircuit;
use crate::layout::{BLOCK_BYTES, SEED_BYTES};

/// Default timing constants for the reference model.
mod defaults {
    /// Default masking share count the model is "generated" with.
    pub const SHARES: usize = 2;

    /// Cycles of held `seed_valid` before `seed_ready` asserts.
    pub const SEED_LATENCY: u64 = 1;

    /// Cycles of held `input_valid` before `input_ready` asserts.
    pub const INPUT_LATENCY: u64 = 1;

    /// Compute cycles from input acceptance to `output_valid`.
    ///
    /// Roughly one round of a round-serial masked core per ~20 cycles;
    /// the exact value only needs to be stable, not accurate.
    pub const COMPUTE_CYCLES: u64 = 200;
}

/// Timing configuration for [`ReferenceCircuit`].
///
/// Deserializable from JSON alongside [`crate::SequencerConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ModelConfig {
    /// Masking share count; sizes the plaintext and key share buffers.
    #[serde(default = "ModelConfig::default_shares")]
    pub shares: usize,

    /// Cycles of held `seed_valid` before `seed_ready` asserts.
    #[serde(default = "ModelConfig::default_seed_latency")]
    pub seed_latency: u64,

    /// Cycles of held `input_valid` before `input_ready` asserts.
    #[serde(default = "ModelConfig::default_input_latency")]
    pub input_latency: u64,

    /// Compute cycles from input acceptance to `output_valid`.
    #[serde(default = "ModelConfig::default_compute_cycles")]
    pub compute_cycles: u64,
}

impl ModelConfig {
    /// Returns the default share count.
    fn default_shares() -> usize {
        defaults::SHARES
    }

    /// Returns the default seed-ready latency.
    fn default_seed_latency() -> u64 {
        defaults::SEED_LATENCY
    }

    /// Returns the default input-ready latency.
    fn default_input_latency() -> u64 {
        defaults::INPUT_LATENCY
    }

    /// Returns the default compute duration.
    fn default_compute_cycles() -> u64 {
        defaults::COMPUTE_CYCLES
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            shares: defaults::SHARES,
            seed_latency: defaults::SEED_LATENCY,
            input_latency: defaults::INPUT_LATENCY,
            compute_cycles: defaults::COMPUTE_CYCLES,
        }
    }
}

/// Behavioral masked-AES core model implementing [`ClockedCircuit`].
#[derive(Debug, Clone)]
pub struct ReferenceCircuit {
    config: ModelConfig,

    reset: bool,
    seed_valid: bool,
    seed_ready: bool,
    input_valid: bool,
    input_ready: bool,
    output_valid: bool,

    seed: [u8; SEED_BYTES],
    plaintext_shares: Vec<u8>,
    key_shares: Vec<u8>,

    cycle: u64,
    seed_wait: u64,
    input_wait: u64,
    compute_elapsed: u64,
    seed_accepted: bool,
    computing: bool,
    activity: u64,
}

impl ReferenceCircuit {
    /// Creates a model in its power-on state.
    pub fn new(config: ModelConfig) -> Self {
        let share_bytes = BLOCK_BYTES * config.shares;
        Self {
            config,
            reset: false,
            seed_valid: false,
            seed_ready: false,
            input_valid: false,
            input_ready: false,
            output_valid: false,
            seed: [0; SEED_BYTES],
            plaintext_shares: vec![0; share_bytes],
            key_shares: vec![0; share_bytes],
            cycle: 0,
            seed_wait: 0,
            input_wait: 0,
            compute_elapsed: 0,
            seed_accepted: false,
            computing: false,
            activity: 0,
        }
    }

    /// Total clock cycles advanced since construction.
    pub const fn cycle_count(&self) -> u64 {
        self.cycle
    }

    /// Current per-cycle activity word (the leakage proxy).
    ///
    /// Deterministic for a given seed/share load: an xorshift stream seeded
    /// from the PRNG seed, folded with the loaded share bytes at input
    /// acceptance, stepped once per compute cycle.
    pub const fn activity_word(&self) -> u64 {
        self.activity
    }

    /// Returns the plaintext-share buffer contents.
    pub fn plaintext_shares(&self) -> &[u8] {
        &self.plaintext_shares
    }

    /// Returns the key-share buffer contents.
    pub fn key_shares(&self) -> &[u8] {
        &self.key_shares
    }

    /// Returns the seed buffer contents.
    pub const fn seed(&self) -> &[u8; SEED_BYTES] {
        &self.seed
    }

    /// Folds a byte slice into a 64-bit word.
    fn fold_bytes(mut acc: u64, bytes: &[u8]) -> u64 {
        for &b in bytes {
            acc = acc.rotate_left(8) ^ u64::from(b);
        }
        acc
    }

    /// Advances the activity word by one xorshift64 step.
    fn step_activity(&mut self) {
        let mut x = self.activity;
        if x == 0 {
            x = 0x9E37_79B9_7F4A_7C15;
        }
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.activity = x;
    }

    /// Combinational output evaluation, shared by `advance_cycle` and
    /// `recompute_outputs`.
    fn eval(&mut self) {
        // seed_ready latches high until the host clears it.
        if self.seed_valid && !self.seed_accepted && self.seed_wait >= self.config.seed_latency {
            self.seed_ready = true;
        }
        self.input_ready = self.input_valid
            && self.seed_accepted
            && !self.computing
            && self.input_wait >= self.config.input_latency;
        if self.computing && self.compute_elapsed >= self.config.compute_cycles {
            self.output_valid = true;
        }
    }
}

impl ClockedCircuit for ReferenceCircuit {
    fn set_reset(&mut self, level: bool) {
        self.reset = level;
    }

    fn set_seed_valid(&mut self, level: bool) {
        self.seed_valid = level;
    }

    fn seed_ready(&self) -> bool {
        self.seed_ready
    }

    fn clear_seed_ready(&mut self) {
        self.seed_ready = false;
    }

    fn write_seed(&mut self, seed: &[u8]) {
        for (dst, src) in self.seed.iter_mut().zip(seed) {
            *dst = *src;
        }
    }

    fn set_input_valid(&mut self, level: bool) {
        self.input_valid = level;
    }

    fn input_ready(&self) -> bool {
        self.input_ready
    }

    fn write_plaintext_shares(&mut self, shares: &[u8]) {
        for (dst, src) in self.plaintext_shares.iter_mut().zip(shares) {
            *dst = *src;
        }
    }

    fn write_key_shares(&mut self, shares: &[u8]) {
        for (dst, src) in self.key_shares.iter_mut().zip(shares) {
            *dst = *src;
        }
    }

    fn output_valid(&self) -> bool {
        self.output_valid
    }

    fn advance_cycle(&mut self) {
        self.cycle += 1;

        if self.reset {
            self.seed_ready = false;
            self.input_ready = false;
            self.output_valid = false;
            self.seed_accepted = false;
            self.computing = false;
            self.seed_wait = 0;
            self.input_wait = 0;
            self.compute_elapsed = 0;
            self.activity = 0;
            return;
        }

        if self.computing && !self.output_valid {
            self.step_activity();
            self.compute_elapsed += 1;
        } else {
            // Seed handshake: transfer on the cycle where valid and ready
            // are both high, then reseed the activity stream.
            if self.seed_valid && self.seed_ready && !self.seed_accepted {
                self.seed_accepted = true;
                self.activity = Self::fold_bytes(0x243F_6A88_85A3_08D3, &self.seed);
            } else if self.seed_valid && !self.seed_accepted {
                self.seed_wait += 1;
            }

            // Input handshake: acceptance starts the computation and folds
            // the loaded shares into the activity stream.
            if self.input_valid && self.input_ready && self.seed_accepted && !self.computing {
                self.computing = true;
                self.activity = Self::fold_bytes(self.activity, &self.plaintext_shares);
                self.activity = Self::fold_bytes(self.activity, &self.key_shares);
            } else if self.input_valid && self.seed_accepted && !self.computing {
                self.input_wait += 1;
            }
        }

        self.eval();
    }

    fn recompute_outputs(&mut self) {
        self.eval();
    }
}
