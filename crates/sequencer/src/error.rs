//! Error and phase definitions.
//!
//! This module defines the failure modes of a sequenced trace run. It provides:
//! 1. **Run Errors:** Input validation and handshake timeout failures.
//! 2. **Phases:** Identification of which wait loop stalled.
//! 3. **Sample Errors:** Probe-side failures, reported but never fatal.

use std::fmt;

use thiserror::Error;

/// Wait phases of the run protocol that can stall.
///
/// Each phase corresponds to one polling loop in the sequencer: the two
/// ready/valid handshakes and the compute loop that waits for `output_valid`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for `seed_ready` after asserting `seed_valid`.
    SeedLoad,
    /// Waiting for `input_ready` after asserting `input_valid`.
    DataLoad,
    /// Waiting for `output_valid` while sampling each cycle.
    Compute,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeedLoad => write!(f, "seed-load"),
            Self::DataLoad => write!(f, "data-load"),
            Self::Compute => write!(f, "compute"),
        }
    }
}

/// Errors returned by [`crate::RunSequencer::run`].
///
/// A bare testbench loop has neither failure mode: a short buffer is an
/// out-of-bounds read and a dead handshake is an infinite loop. Both are
/// surfaced as errors here; the timeout only fires when a ceiling is
/// configured.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SequencerError {
    /// The input buffer is too short for the configured share count.
    ///
    /// Raised before any circuit mutation. `required` is
    /// `SEED_BYTES + 2 * BLOCK_BYTES * shares`.
    #[error("input buffer too short for {shares} shares: need {required} bytes, got {actual}")]
    InvalidInputLength {
        /// Configured masking share count.
        shares: usize,
        /// Minimum buffer length for that share count.
        required: usize,
        /// Actual buffer length supplied.
        actual: usize,
    },

    /// A wait loop exhausted its configured cycle ceiling.
    ///
    /// The circuit model never asserted the awaited signal within `limit`
    /// clock advances. Indicates a misbehaving model, a mis-wired signal, or
    /// a share-count mismatch between buffer and circuit.
    #[error("{phase} handshake stalled: no ready after {limit} cycles")]
    HandshakeTimeout {
        /// Which wait loop stalled.
        phase: Phase,
        /// The ceiling that was exhausted.
        limit: u64,
    },
}

/// Probe-side sampling failure.
///
/// Returned by [`crate::circuit::Probe::sample`]. The sequencer logs these at
/// `warn` and counts them in the run summary; they never abort a trace.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("probe sample failed: {reason}")]
pub struct SampleError {
    /// Human-readable description of the failure.
    pub reason: String,
}

impl SampleError {
    /// Creates a sample error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
