//! Recording and null probes.
//!
//! This module provides the probes shipped with the crate:
//! 1. **Recorder:** Captures one activity sample per compute cycle for later
//!    side-channel analysis (JSON-serializable records).
//! 2. **Null:** Discards everything; useful for timing-only runs.
//!
//! Production leakage capture lives in the caller; these cover the CLI and
//! the test suite.

use serde::Serialize;

use crate::circuit::Probe;
use crate::error::SampleError;
use crate::model::ReferenceCircuit;

/// One captured sample: the circuit's activity word at a given cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleRecord {
    /// Circuit cycle count at sampling time.
    pub cycle: u64,
    /// Activity word captured from the model.
    pub activity: u64,
}

/// Probe that records [`ReferenceCircuit`] activity words in memory.
#[derive(Debug, Clone, Default)]
pub struct ActivityRecorder {
    records: Vec<SampleRecord>,
}

impl ActivityRecorder {
    /// Creates an empty recorder.
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Returns the captured samples in sampling order.
    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    /// Consumes the recorder and returns the captured samples.
    pub fn into_records(self) -> Vec<SampleRecord> {
        self.records
    }
}

impl Probe<ReferenceCircuit> for ActivityRecorder {
    fn sample(&mut self, circuit: &ReferenceCircuit) -> Result<(), SampleError> {
        self.records.push(SampleRecord {
            cycle: circuit.cycle_count(),
            activity: circuit.activity_word(),
        });
        Ok(())
    }
}

/// Probe that ignores every sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProbe;

impl<C> Probe<C> for NullProbe {
    fn sample(&mut self, _circuit: &C) -> Result<(), SampleError> {
        Ok(())
    }
}
