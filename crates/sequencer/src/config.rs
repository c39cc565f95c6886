//! Configuration for the run sequencer.
//!
//! This module defines the configuration structure used to parameterize trace
//! runs. It provides:
//! 1. **Defaults:** Baseline share count and wait ceilings.
//! 2. **Structure:** `SequencerConfig`, deserializable from JSON.
//!
//! Configuration is supplied via JSON (CLI `--config`) or use
//! `SequencerConfig::default()` in embedding code.

use serde::Deserialize;

/// Default configuration constants for the sequencer.
mod defaults {
    /// Default masking share count `d` (first-order masking).
    ///
    /// Must match the share count the circuit model was generated with;
    /// a mismatch shows up as a stalled data-load handshake.
    pub const SHARES: usize = 2;
}

/// Root configuration for [`crate::RunSequencer`].
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use masksim_core::SequencerConfig;
///
/// let config = SequencerConfig::default();
/// assert_eq!(config.shares, 2);
/// assert_eq!(config.handshake_ceiling, None);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use masksim_core::SequencerConfig;
///
/// let json = r#"{
///     "shares": 3,
///     "handshake_ceiling": 1000,
///     "compute_ceiling": 100000
/// }"#;
///
/// let config: SequencerConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.shares, 3);
/// assert_eq!(config.handshake_ceiling, Some(1000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SequencerConfig {
    /// Masking share count `d`; sizes the plaintext and key share fields.
    #[serde(default = "SequencerConfig::default_shares")]
    pub shares: usize,

    /// Maximum clock advances to wait for `seed_ready`/`input_ready`.
    ///
    /// `None` waits forever, matching the behavior of a bare testbench
    /// loop. Set a ceiling to turn a dead handshake into a
    /// [`crate::SequencerError::HandshakeTimeout`] instead of a hang.
    #[serde(default)]
    pub handshake_ceiling: Option<u64>,

    /// Maximum clock advances to wait for `output_valid` during compute.
    ///
    /// `None` waits forever. A ceiling converts a core that never asserts
    /// `output_valid` into a reported error.
    #[serde(default)]
    pub compute_ceiling: Option<u64>,
}

impl SequencerConfig {
    /// Returns the default masking share count.
    fn default_shares() -> usize {
        defaults::SHARES
    }
}

impl Default for SequencerConfig {
    /// Creates a default configuration: first-order masking, unbounded waits.
    fn default() -> Self {
        Self {
            shares: defaults::SHARES,
            handshake_ceiling: None,
            compute_ceiling: None,
        }
    }
}
