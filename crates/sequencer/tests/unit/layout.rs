//! # Wire Layout Tests
//!
//! Property tests for the input buffer format, complementing the focused
//! offset tests that live next to the implementation.

use masksim_core::layout::{BLOCK_BYTES, SEED_BYTES, TraceInput, encode_trace_input, required_len};
use proptest::prelude::*;

proptest! {
    /// Any buffer of at least the required length parses, and the three
    /// fields tile the required prefix exactly.
    #[test]
    fn test_parse_tiles_required_prefix(
        shares in 1usize..8,
        extra in 0usize..64,
        fill in any::<u8>(),
    ) {
        let data = vec![fill; required_len(shares) + extra];
        let input = TraceInput::parse(&data, shares).unwrap();

        prop_assert_eq!(input.seed.len(), SEED_BYTES);
        prop_assert_eq!(input.plaintext_shares.len(), BLOCK_BYTES * shares);
        prop_assert_eq!(input.key_shares.len(), BLOCK_BYTES * shares);
        prop_assert_eq!(
            input.seed.len() + input.plaintext_shares.len() + input.key_shares.len(),
            required_len(shares)
        );
    }

    /// Buffers below the required length always fail and never panic.
    #[test]
    fn test_parse_rejects_all_short_buffers(
        shares in 1usize..8,
        deficit in 1usize..80,
    ) {
        let len = required_len(shares).saturating_sub(deficit);
        let data = vec![0u8; len];
        prop_assert!(TraceInput::parse(&data, shares).is_err());
    }

    /// Encoding from parts and parsing back reproduces the exact bytes.
    #[test]
    fn test_encode_parse_identity(
        seed in proptest::collection::vec(any::<u8>(), SEED_BYTES),
        shares in 1usize..4,
        pt_fill in any::<u8>(),
        key_fill in any::<u8>(),
    ) {
        let pt = vec![pt_fill; BLOCK_BYTES * shares];
        let key = vec![key_fill; BLOCK_BYTES * shares];

        let buf = encode_trace_input(&seed, &pt, &key).unwrap();
        prop_assert_eq!(buf.len(), required_len(shares));

        let input = TraceInput::parse(&buf, shares).unwrap();
        prop_assert_eq!(input.seed, &seed[..]);
        prop_assert_eq!(input.plaintext_shares, &pt[..]);
        prop_assert_eq!(input.key_shares, &key[..]);
    }
}
