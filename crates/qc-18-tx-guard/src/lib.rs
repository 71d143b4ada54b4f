//! # Transaction Guard Subsystem
//!
//! **Subsystem ID:** 18
//!
//! ## Purpose
//!
//! Replay protection for the transaction-admission path. Answers "has this
//! transaction already been included in an ancestor block of the fork I am
//! about to extend?" within a bounded time-to-live window, and ages data out
//! as the stable (finalized) block advances.
//!
//! ## Data Flow
//!
//! ```text
//! Consensus (8) ──save_block──→ TimeBuckets + BlockCache + TxTracer
//!
//! Mempool (6) ──exist_tx(s)──→ TxTracer.load_traces ──→ BlockCache.is_appeared_on_fork
//!
//! Finality (9) ──del_old_blocks──→ TimeBuckets.expire ──→ BlockCache.del
//!                                                     └──→ TxTracer.del_trace
//!
//! Consensus (8) ──get_txs_by_branch──→ BlockCache (lowest common ancestor walk)
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Window base is bucket aligned and only moves forward | `domain/time_buckets.rs` |
//! | Cached blocks are never replaced | `domain/block_cache.rs` - `add()` |
//! | Traced tx keys map to non-empty sets | `domain/tx_tracer.rs` |
//! | Block, bucket entry and traces expire together | `service.rs` - `del_old_blocks()` |
//! | All three structures mutate under one lock | `service.rs` - `TxGuard` |
//!
//! ## Failure Model
//!
//! `TimeBucketTime` and `TimeBucketHorizon` are recoverable and absorbed by
//! `save_block`. Missing
//! ancestors and forks without a shared genesis can only come from a broken
//! caller contract; they are surfaced as errors for which
//! `TxGuardError::is_invariant_violation()` is true and the supervising
//! boundary must treat them as fatal.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/ - ports for shared-types ValidatedBlock / Tx         │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - TxGuardApi trait                           │
//! │  ports/outbound.rs - GuardedBlock, GuardedTransaction traits    │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  service.rs              - TxGuard (single RwLock)              │
//! │  domain/time_buckets.rs  - TimeBuckets                          │
//! │  domain/block_cache.rs   - BlockCache                           │
//! │  domain/tx_tracer.rs     - TxTracer                             │
//! │  domain/hash_set.rs      - BlockHashSet                         │
//! │  domain/value_objects.rs - BlockNode, TxGuardConfig             │
//! │  error.rs                - TxGuardError                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::*;
pub use error::{TxGuardError, TxGuardResult};
pub use ports::inbound::TxGuardApi;
pub use ports::outbound::{GuardedBlock, GuardedTransaction};
pub use service::TxGuard;
