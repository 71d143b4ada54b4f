//! # Shared Types Crate
//!
//! Chain entities shared across subsystems: blocks, headers and
//! (possibly bundled) transactions.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Hashes are cached**: `ValidatedBlock` and `ValidatedTransaction` carry
//!   their hash so consumers never recompute it.

pub mod entities;

pub use entities::*;
