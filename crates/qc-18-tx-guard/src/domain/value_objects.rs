//! Value objects and configuration for the Transaction Guard subsystem.

use crate::error::{TxGuardError, TxGuardResult};
use crate::ports::outbound::{GuardedBlock, GuardedTransaction};
use shared_types::Hash;

/// Granularity of the block-time index (seconds).
pub const BUCKET_DURATION_SECS: u64 = 60;

/// Replay-protection window (seconds). Also the minimum stable block time
/// accepted by `del_old_blocks`.
pub const MAX_TX_LIFETIME_SECS: u64 = 86_400;

/// Extra buckets preallocated beyond the lifetime window.
pub const BUCKET_MARGIN: usize = 10;

/// Largest accepted window, in buckets (lifetime / bucket duration), and
/// largest accepted margin.
pub const MAX_WINDOW_BUCKETS: u64 = 1 << 18;

/// The index may grow to this many times its preallocated capacity before
/// block times are rejected as too far in the future.
pub const BUCKET_HORIZON_FACTOR: usize = 4;

/// Transaction Guard configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxGuardConfig {
    /// Replay-protection window (seconds).
    pub max_tx_lifetime_secs: u64,
    /// Width of one time bucket (seconds).
    pub bucket_duration_secs: u64,
    /// Buckets preallocated beyond the window.
    pub bucket_margin: usize,
}

impl Default for TxGuardConfig {
    fn default() -> Self {
        Self {
            max_tx_lifetime_secs: MAX_TX_LIFETIME_SECS,
            bucket_duration_secs: BUCKET_DURATION_SECS,
            bucket_margin: BUCKET_MARGIN,
        }
    }
}

impl TxGuardConfig {
    /// Creates a short-window config for testing (10 minutes).
    pub fn for_testing() -> Self {
        Self {
            max_tx_lifetime_secs: 600,
            ..Default::default()
        }
    }

    /// Rejects configurations the window arithmetic cannot work with.
    pub fn validate(&self) -> TxGuardResult<()> {
        if self.bucket_duration_secs == 0 {
            return Err(TxGuardError::InvalidConfig {
                reason: "bucket_duration_secs must be non-zero".into(),
            });
        }
        if self.max_tx_lifetime_secs == 0 {
            return Err(TxGuardError::InvalidConfig {
                reason: "max_tx_lifetime_secs must be non-zero".into(),
            });
        }
        if self.max_tx_lifetime_secs % self.bucket_duration_secs != 0 {
            return Err(TxGuardError::InvalidConfig {
                reason: format!(
                    "max_tx_lifetime_secs {} is not a multiple of bucket_duration_secs {}",
                    self.max_tx_lifetime_secs, self.bucket_duration_secs
                ),
            });
        }
        let window = self.max_tx_lifetime_secs / self.bucket_duration_secs;
        if window > MAX_WINDOW_BUCKETS {
            return Err(TxGuardError::InvalidConfig {
                reason: format!(
                    "max_tx_lifetime_secs {} spans {} buckets, limit is {}",
                    self.max_tx_lifetime_secs, window, MAX_WINDOW_BUCKETS
                ),
            });
        }
        if self.bucket_margin as u64 > MAX_WINDOW_BUCKETS {
            return Err(TxGuardError::InvalidConfig {
                reason: format!(
                    "bucket_margin {} exceeds limit {}",
                    self.bucket_margin, MAX_WINDOW_BUCKETS
                ),
            });
        }
        Ok(())
    }

    /// Number of buckets preallocated by a fresh index.
    pub fn bucket_capacity(&self) -> usize {
        let window = self
            .max_tx_lifetime_secs
            .checked_div(self.bucket_duration_secs)
            .unwrap_or(0);
        usize::try_from(window)
            .unwrap_or(usize::MAX)
            .saturating_add(self.bucket_margin)
    }

    /// Most buckets the index may hold; later block times are rejected.
    pub fn max_buckets(&self) -> usize {
        self.bucket_capacity().saturating_mul(BUCKET_HORIZON_FACTOR)
    }
}

/// Header fields of a cached block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeHeader {
    /// Block height.
    pub height: u64,
    /// Parent block hash.
    pub parent_hash: Hash,
}

/// Immutable projection of a block kept by the block cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockNode<T> {
    /// Height and parent linkage.
    pub header: NodeHeader,
    /// Transactions in block order.
    pub txs: Vec<T>,
}

impl<T: GuardedTransaction> BlockNode<T> {
    /// Projects a block.
    pub fn from_block<B>(block: &B) -> Self
    where
        B: GuardedBlock<Tx = T>,
    {
        Self {
            header: NodeHeader {
                height: block.height(),
                parent_hash: block.parent_hash(),
            },
            txs: block.transactions().to_vec(),
        }
    }
}

/// Guard status snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxGuardStatus {
    /// Bucket-aligned lower edge of the block-time window.
    pub time_base: u64,
    /// Number of live time buckets.
    pub bucket_count: usize,
    /// Number of cached blocks.
    pub cached_blocks: usize,
    /// Number of traced transaction hashes.
    pub traced_txs: usize,
}
