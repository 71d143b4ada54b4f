//! # Domain Layer - Transaction Guard Subsystem
//!
//! Pure data structures, no locking. `TxGuard` composes them under one lock.
//!
//! ## Components
//!
//! - `hash_set`: `BlockHashSet`
//! - `time_buckets`: `TimeBuckets`, sliding block-time window
//! - `block_cache`: `BlockCache`, fork-ancestry queries
//! - `tx_tracer`: `TxTracer`, transaction -> blocks index
//! - `value_objects`: `BlockNode`, `TxGuardConfig`, `TxGuardStatus`

pub mod block_cache;
pub mod hash_set;
pub mod time_buckets;
pub mod tx_tracer;
pub mod value_objects;

pub use block_cache::*;
pub use hash_set::*;
pub use time_buckets::*;
pub use tx_tracer::*;
pub use value_objects::*;
