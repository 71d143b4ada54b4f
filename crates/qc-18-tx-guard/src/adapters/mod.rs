//! Adapters layer - port implementations for workspace types.
//!
//! - `chain_entities`: `GuardedBlock` / `GuardedTransaction` for
//!   `ValidatedBlock` / `ValidatedTransaction`

pub mod chain_entities;
