//! Masked-AES trace capture library.
//!
//! This crate drives a simulated masked AES core through encryption traces for
//! side-channel analysis. It provides the following:
//! 1. **Sequencer:** Reset, seed-load, data-load, and compute phases over a ready/valid handshake.
//! 2. **Seams:** `ClockedCircuit` and `Probe` traits for the circuit model and leakage sampler.
//! 3. **Layout:** The seed/plaintext-shares/key-shares input buffer wire format.
//! 4. **Model:** A behavioral reference circuit for testing and demonstration runs.
//! 5. **Configuration:** Share count and wait ceilings, JSON-deserializable.

/// Circuit and probe traits (the external-collaborator seams).
pub mod circuit;
/// Sequencer configuration (defaults, share count, wait ceilings).
pub mod config;
/// Error and phase types.
pub mod error;
/// Input buffer wire layout (seed, plaintext shares, key shares).
pub mod layout;
/// Behavioral reference circuit model.
pub mod model;
/// Recording and null probes.
pub mod probe;
/// The run sequencer (phase protocol and run summary).
pub mod sequencer;

/// Circuit seam; implemented by every drivable core model.
pub use crate::circuit::ClockedCircuit;
/// Root configuration type; use `SequencerConfig::default()` or deserialize from JSON.
pub use crate::config::SequencerConfig;
/// Library error type returned by sequencer runs.
pub use crate::error::SequencerError;
/// Main driver type; construct with `RunSequencer::new`.
pub use crate::sequencer::RunSequencer;
