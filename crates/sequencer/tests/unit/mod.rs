//! # Unit Tests
//!
//! Fine-grained tests for the sequencer crate, organized by module.

/// Input buffer wire layout.
pub mod layout;
/// Behavioral reference circuit model.
pub mod model;
