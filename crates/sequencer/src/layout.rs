//! Input buffer wire layout.
//!
//! This module defines the flat byte format fed to the sequencer. It provides:
//! 1. **Constants:** Seed and block sizes shared by the whole crate.
//! 2. **Parsing:** Length-validated borrowed views over the three fields.
//! 3. **Encoding:** Construction of a conforming buffer from its parts.
//!
//! The layout is raw bytes in field order; nothing is interpreted numerically,
//! so endianness does not apply.
//!
//! | Field            | Offset   | Length |
//! |------------------|----------|--------|
//! | PRNG seed        | 0        | 10     |
//! | Plaintext shares | 10       | 16·d   |
//! | Key shares       | 10+16·d  | 16·d   |
//!
//! `d` is the masking share count from [`crate::SequencerConfig`]; it is not
//! carried in the buffer itself.

use crate::error::SequencerError;

/// PRNG seed length in bytes (80 bits).
pub const SEED_BYTES: usize = 10;

/// AES-128 block length in bytes; each share of plaintext and key is one block.
pub const BLOCK_BYTES: usize = 16;

/// Minimum buffer length for `shares` masking shares.
///
/// Seed plus one block of plaintext shares and one block of key shares,
/// each split `shares` ways.
#[inline]
pub const fn required_len(shares: usize) -> usize {
    SEED_BYTES + 2 * BLOCK_BYTES * shares
}

/// Borrowed view of one trace input buffer, split into its three fields.
///
/// Constructed by [`TraceInput::parse`], which validates the buffer length
/// before anything touches the circuit. Trailing bytes beyond the required
/// length are permitted and ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceInput<'a> {
    /// PRNG seed for the core's mask generator (10 bytes).
    pub seed: &'a [u8],
    /// Plaintext split into `d` shares (16·d bytes).
    pub plaintext_shares: &'a [u8],
    /// Key split into `d` shares (16·d bytes).
    pub key_shares: &'a [u8],
}

impl<'a> TraceInput<'a> {
    /// Splits `data` into seed, plaintext-share, and key-share fields.
    ///
    /// # Arguments
    ///
    /// * `data` - The flat input buffer.
    /// * `shares` - The masking share count `d`.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::InvalidInputLength`] when `data` is shorter
    /// than [`required_len`]`(shares)`.
    pub fn parse(data: &'a [u8], shares: usize) -> Result<Self, SequencerError> {
        let required = required_len(shares);
        if data.len() < required {
            return Err(SequencerError::InvalidInputLength {
                shares,
                required,
                actual: data.len(),
            });
        }
        let share_bytes = BLOCK_BYTES * shares;
        Ok(Self {
            seed: &data[..SEED_BYTES],
            plaintext_shares: &data[SEED_BYTES..SEED_BYTES + share_bytes],
            key_shares: &data[SEED_BYTES + share_bytes..required],
        })
    }
}

/// Builds a conforming input buffer from seed, plaintext shares, and key shares.
///
/// # Errors
///
/// Returns [`SequencerError::InvalidInputLength`] when the seed is not exactly
/// [`SEED_BYTES`] long or the share fields differ in length or are not a
/// whole number of [`BLOCK_BYTES`] blocks.
pub fn encode_trace_input(
    seed: &[u8],
    plaintext_shares: &[u8],
    key_shares: &[u8],
) -> Result<Vec<u8>, SequencerError> {
    let share_bytes = plaintext_shares.len();
    let well_formed = seed.len() == SEED_BYTES
        && key_shares.len() == share_bytes
        && share_bytes % BLOCK_BYTES == 0
        && share_bytes != 0;
    if !well_formed {
        let shares = share_bytes / BLOCK_BYTES;
        return Err(SequencerError::InvalidInputLength {
            shares,
            required: required_len(shares.max(1)),
            actual: seed.len() + plaintext_shares.len() + key_shares.len(),
        });
    }

    let mut buf = Vec::with_capacity(SEED_BYTES + 2 * share_bytes);
    buf.extend_from_slice(seed);
    buf.extend_from_slice(plaintext_shares);
    buf.extend_from_slice(key_shares);
    Ok(buf)
}
