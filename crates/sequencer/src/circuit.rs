//! Circuit and probe traits for the simulation seams.
//!
//! This module defines the two collaborator boundaries of the sequencer. It provides:
//! 1. **Signals:** Named control and data signal accessors on the circuit model.
//! 2. **Clocking:** One-cycle advance and combinational re-evaluation operations.
//! 3. **Sampling:** The per-cycle probe hook for leakage capture.
//!
//! Both collaborators are caller-owned: the sequencer never constructs,
//! resets-to-null, or tears down either; it only reads and writes through
//! the handles for the duration of one trace.

use crate::error::SampleError;

/// Trait for a simulated synchronous circuit driven by the sequencer.
///
/// Implementors expose the masked-AES core's top-level interface: a reset
/// line, the seed and input ready/valid handshake pairs with their data
/// buffers, and the completion flag. The trait also carries the two clocking
/// operations, advancing a full cycle and re-evaluating combinational
/// outputs in place.
pub trait ClockedCircuit {
    /// Drives the top-level reset line.
    fn set_reset(&mut self, level: bool);

    /// Drives `seed_valid`, announcing that the seed buffer holds fresh data.
    fn set_seed_valid(&mut self, level: bool);
    /// Reads the `seed_ready` acknowledgment from the core's mask generator.
    fn seed_ready(&self) -> bool;
    /// Clears the latched `seed_ready` acknowledgment.
    ///
    /// The modeled core latches its seed acknowledgment and expects the host
    /// to clear it after consuming the handshake. This is specific to the
    /// seed path; the input handshake clears `input_valid` instead.
    fn clear_seed_ready(&mut self);
    /// Writes the PRNG seed into the core's seed buffer.
    fn write_seed(&mut self, seed: &[u8]);

    /// Drives `input_valid`, announcing that plaintext and key shares are loaded.
    fn set_input_valid(&mut self, level: bool);
    /// Reads the `input_ready` acknowledgment for the data-load handshake.
    fn input_ready(&self) -> bool;
    /// Writes the shared plaintext into the core's plaintext buffer.
    fn write_plaintext_shares(&mut self, shares: &[u8]);
    /// Writes the shared key into the core's key buffer.
    fn write_key_shares(&mut self, shares: &[u8]);

    /// Reads `output_valid`, the end-of-computation flag.
    fn output_valid(&self) -> bool;

    /// Advances the circuit by one full clock cycle.
    fn advance_cycle(&mut self);
    /// Re-evaluates combinational outputs without advancing the clock.
    ///
    /// Used after driving a `valid` line so the matching `ready` output
    /// reflects the new inputs within the same cycle.
    fn recompute_outputs(&mut self);
}

/// Trait for the leakage-sampling collaborator.
///
/// Called once per cycle during the compute phase, plus once on the
/// completion cycle. The sequencer treats sampling as fire-and-forget:
/// failures are logged and counted, never propagated as run failures.
pub trait Probe<C: ?Sized> {
    /// Samples and records the circuit's current state.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError`] when the sample could not be recorded; the
    /// sequencer downgrades this to a warning.
    fn sample(&mut self, circuit: &C) -> Result<(), SampleError>;
}
