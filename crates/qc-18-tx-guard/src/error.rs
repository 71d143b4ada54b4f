//! Error types for the Transaction Guard subsystem
//!
//! Two classes of failure exist. `TimeBucketTime`, `TimeBucketHorizon` and
//! `InvalidConfig` are ordinary, recoverable conditions. Everything else can only happen when a
//! caller breaks the contract that referenced ancestors are cached and that
//! forks share a genesis; those are surfaced as invariant violations and must
//! never be silently recovered from.

use shared_types::Hash;
use thiserror::Error;

/// Transaction Guard errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxGuardError {
    /// Insertion time precedes the time bucket base
    #[error("Time {time} precedes time bucket base {time_base}")]
    TimeBucketTime { time: u64, time_base: u64 },

    /// Insertion time lies beyond the furthest bucket the index may grow to
    #[error("Time {time} is beyond time bucket horizon {horizon}")]
    TimeBucketHorizon { time: u64, horizon: u64 },

    /// Referenced block is not in the block cache
    #[error("Block not found in block cache: {}", short_hex(.hash))]
    NotFoundBlockCache { hash: Hash },

    /// Two branches walked down to height 0 without meeting
    #[error("Branches do not share a genesis block")]
    DifferentGenesis,

    /// Internal invariant violated (corruption or caller bug)
    #[error("Internal invariant violated: {reason}")]
    InternalInvariant { reason: String },

    /// Configuration rejected at construction
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl TxGuardError {
    /// True for conditions a supervising boundary must treat as fatal.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::NotFoundBlockCache { .. } | Self::DifferentGenesis | Self::InternalInvariant { .. }
        )
    }
}

/// Result type for guard operations
pub type TxGuardResult<T> = Result<T, TxGuardError>;

/// First four bytes of a hash, hex encoded. Used in logs and error messages.
pub(crate) fn short_hex(hash: &Hash) -> String {
    hex::encode(&hash[..4])
}
