//! The run sequencer.
//!
//! This module drives one complete masked-AES encryption trace through a
//! clocked circuit model. It performs:
//! 1. **Reset:** Two unconditional cycles with the reset line asserted then cleared.
//! 2. **Seed load:** Ready/valid handshake feeding the 80-bit PRNG seed.
//! 3. **Data load:** Ready/valid handshake feeding plaintext and key shares.
//! 4. **Compute:** Per-cycle probe sampling until the core signals completion.
//!
//! The phase sequence is strictly linear:
//! reset → seed load → data load → compute → done, with no re-entry. One
//! invocation produces one trace.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::circuit::{ClockedCircuit, Probe};
use crate::config::SequencerConfig;
use crate::error::{Phase, SequencerError};
use crate::layout::TraceInput;

/// Drives encryption traces through a caller-supplied circuit model.
///
/// The sequencer owns no simulation state of its own; it holds only its
/// configuration and mutates the circuit and probe through the handles
/// passed to [`run`](Self::run). It is single-threaded by construction:
/// both handles are taken by exclusive reference for the whole run.
#[derive(Debug, Clone)]
pub struct RunSequencer {
    config: SequencerConfig,
}

/// Cycle and sample accounting for one completed trace run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Total clock advances over the whole run, reset included.
    pub total_cycles: u64,
    /// Cycles spent polling for `seed_ready`.
    pub seed_wait_cycles: u64,
    /// Cycles spent polling for `input_ready`.
    pub input_wait_cycles: u64,
    /// Compute cycles strictly before `output_valid` asserted.
    pub compute_cycles: u64,
    /// Probe samples taken (always `compute_cycles + 1`).
    pub samples: u64,
    /// Probe samples that returned an error and were dropped.
    pub failed_samples: u64,
}

impl RunSequencer {
    /// Creates a sequencer with the given configuration.
    pub const fn new(config: SequencerConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    pub const fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Runs one encryption trace: reset, seed load, data load, compute.
    ///
    /// `data` must hold the seed, plaintext shares, and key shares in the
    /// [`crate::layout`] wire format for the configured share count. The
    /// probe is invoked once per compute cycle plus once on the completion
    /// cycle; its failures are logged and counted but never abort the run.
    ///
    /// # Arguments
    ///
    /// * `circuit` - Live circuit model handle; mutated in place.
    /// * `probe` - Leakage sampler invoked during the compute phase.
    /// * `data` - Flat input buffer (seed ∥ plaintext shares ∥ key shares).
    ///
    /// # Errors
    ///
    /// * [`SequencerError::InvalidInputLength`] if `data` is too short for
    ///   the configured share count. The circuit is untouched in this case.
    /// * [`SequencerError::HandshakeTimeout`] if a configured ceiling is
    ///   exhausted while waiting for a ready or completion signal.
    pub fn run<C, P>(
        &self,
        circuit: &mut C,
        probe: &mut P,
        data: &[u8],
    ) -> Result<RunSummary, SequencerError>
    where
        C: ClockedCircuit,
        P: Probe<C>,
    {
        // Validate before the first signal write so a bad buffer leaves the
        // circuit untouched.
        let input = TraceInput::parse(data, self.config.shares)?;

        let mut total_cycles: u64 = 0;

        debug!(shares = self.config.shares, "trace run: reset");
        circuit.set_input_valid(false);
        circuit.set_seed_valid(false);
        circuit.set_reset(true);
        circuit.advance_cycle();
        circuit.set_reset(false);
        circuit.advance_cycle();
        total_cycles += 2;

        debug!("trace run: seed load");
        circuit.write_seed(input.seed);
        circuit.set_seed_valid(true);
        circuit.recompute_outputs();

        let seed_wait_cycles = Self::wait_for(
            circuit,
            Phase::SeedLoad,
            self.config.handshake_ceiling,
            ClockedCircuit::seed_ready,
        )?;
        total_cycles += seed_wait_cycles;

        // One more cycle so the core consumes the ready/valid transfer, then
        // clear the latched acknowledgment on the core's behalf. The seed
        // path latches ready until the host clears it; the input path below
        // does not.
        circuit.advance_cycle();
        total_cycles += 1;
        circuit.clear_seed_ready();

        debug!("trace run: data load");
        circuit.write_plaintext_shares(input.plaintext_shares);
        circuit.write_key_shares(input.key_shares);
        circuit.set_input_valid(true);
        circuit.recompute_outputs();

        let input_wait_cycles = Self::wait_for(
            circuit,
            Phase::DataLoad,
            self.config.handshake_ceiling,
            ClockedCircuit::input_ready,
        )?;
        total_cycles += input_wait_cycles;

        circuit.advance_cycle();
        total_cycles += 1;
        circuit.set_input_valid(false);
        circuit.recompute_outputs();

        debug!("trace run: compute");
        let mut compute_cycles: u64 = 0;
        let mut samples: u64 = 0;
        let mut failed_samples: u64 = 0;
        while !circuit.output_valid() {
            if let Some(limit) = self.config.compute_ceiling {
                if compute_cycles >= limit {
                    return Err(SequencerError::HandshakeTimeout {
                        phase: Phase::Compute,
                        limit,
                    });
                }
            }
            Self::take_sample(circuit, probe, &mut samples, &mut failed_samples);
            circuit.advance_cycle();
            compute_cycles += 1;
        }
        total_cycles += compute_cycles;

        // The loop body never runs on the completion cycle; sample it here
        // so the final state is always captured.
        Self::take_sample(circuit, probe, &mut samples, &mut failed_samples);

        let summary = RunSummary {
            total_cycles,
            seed_wait_cycles,
            input_wait_cycles,
            compute_cycles,
            samples,
            failed_samples,
        };
        debug!(?summary, "trace run: done");
        Ok(summary)
    }

    /// Polls `ready` once per clock advance until it asserts.
    ///
    /// Returns the number of advances spent waiting. With `ceiling` set,
    /// fails after exactly that many advances without the signal.
    fn wait_for<C: ClockedCircuit>(
        circuit: &mut C,
        phase: Phase,
        ceiling: Option<u64>,
        ready: impl Fn(&C) -> bool,
    ) -> Result<u64, SequencerError> {
        let mut waited: u64 = 0;
        while !ready(&*circuit) {
            if let Some(limit) = ceiling {
                if waited >= limit {
                    warn!(%phase, limit, "handshake stalled");
                    return Err(SequencerError::HandshakeTimeout { phase, limit });
                }
            }
            circuit.advance_cycle();
            waited += 1;
            trace!(%phase, waited, "polling ready");
        }
        Ok(waited)
    }

    /// Invokes the probe once, downgrading failures to warnings.
    fn take_sample<C, P>(circuit: &C, probe: &mut P, samples: &mut u64, failed: &mut u64)
    where
        C: ClockedCircuit,
        P: Probe<C>,
    {
        *samples += 1;
        if let Err(e) = probe.sample(circuit) {
            *failed += 1;
            warn!(error = %e, "probe sample dropped");
        }
    }
}
