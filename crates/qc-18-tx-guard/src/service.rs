//! Transaction Guard Service
//!
//! Owns the block-time index, the block cache and the transaction tracer and
//! mutates them only as a unit under one lock.
//!
//! ## Consistency
//!
//! - A cached block always has a live entry in the block-time index until
//!   expiry removes both.
//! - Every transaction traced to a block is untraced in the same expiry pass
//!   that drops the block.
//! - Every API call, including the read-only replay checks, takes the write
//!   lock, so no call observes the three structures half-updated.

use crate::domain::{BlockCache, TimeBuckets, TxGuardConfig, TxGuardStatus, TxTracer};
use crate::error::{short_hex, TxGuardError, TxGuardResult};
use crate::ports::inbound::TxGuardApi;
use crate::ports::outbound::{GuardedBlock, GuardedTransaction};
use parking_lot::RwLock;
use shared_types::Hash;
use tracing::{debug, error, warn};

/// Internal state guarded by the service lock
struct TxGuardState<T> {
    /// Block hashes indexed by block time
    block_times: TimeBuckets,
    /// Cached block projections
    blocks: BlockCache<T>,
    /// Transaction -> blocks index
    tracer: TxTracer,
}

/// Replay-protection service
pub struct TxGuard<T: GuardedTransaction> {
    config: TxGuardConfig,
    state: RwLock<TxGuardState<T>>,
}

impl<T: GuardedTransaction> TxGuard<T> {
    /// Create a guard with the default configuration.
    ///
    /// The window starts at `stable_block_time - max_tx_lifetime`, floored at 0.
    pub fn new(stable_block_time: u64) -> Self {
        Self::build(TxGuardConfig::default(), stable_block_time)
    }

    /// Create a guard with a custom configuration.
    pub fn with_config(config: TxGuardConfig, stable_block_time: u64) -> TxGuardResult<Self> {
        config.validate()?;
        Ok(Self::build(config, stable_block_time))
    }

    fn build(config: TxGuardConfig, stable_block_time: u64) -> Self {
        let time_base = stable_block_time.saturating_sub(config.max_tx_lifetime_secs);
        let block_times = TimeBuckets::new(
            time_base,
            config.bucket_duration_secs,
            config.bucket_capacity(),
            config.max_buckets(),
        );
        Self {
            config,
            state: RwLock::new(TxGuardState {
                block_times,
                blocks: BlockCache::new(),
                tracer: TxTracer::new(),
            }),
        }
    }

    pub fn config(&self) -> &TxGuardConfig {
        &self.config
    }

    /// Snapshot of the guard's counters.
    pub fn status(&self) -> TxGuardStatus {
        let state = self.state.read();
        TxGuardStatus {
            time_base: state.block_times.time_base(),
            bucket_count: state.block_times.len(),
            cached_blocks: state.blocks.len(),
            traced_txs: state.tracer.len(),
        }
    }
}

/// Logs and wraps an internal failure that must not be recovered from.
fn invariant_violation(context: &str, err: TxGuardError) -> TxGuardError {
    error!("[qc-18] Invariant violation during {}: {}", context, err);
    TxGuardError::InternalInvariant {
        reason: format!("{context}: {err}"),
    }
}

impl<T: GuardedTransaction> TxGuardApi<T> for TxGuard<T> {
    fn save_block<B>(&self, block: &B)
    where
        B: GuardedBlock<Tx = T>,
    {
        let block_hash = block.block_hash();
        let mut state = self.state.write();

        if state.blocks.contains(&block_hash) {
            debug!("[qc-18] Block {} already saved", short_hex(&block_hash));
            return;
        }

        if let Err(e) = state.block_times.add(block.time(), block_hash) {
            warn!(
                "[qc-18] Block {} at height {} not indexed: {}",
                short_hex(&block_hash),
                block.height(),
                e
            );
            return;
        }

        state.blocks.add(block);
        for tx in block.transactions() {
            state.tracer.add_trace(tx, block_hash);
        }
    }

    fn exist_tx(&self, start_block_hash: &Hash, tx: &T) -> TxGuardResult<bool> {
        self.exist_txs(start_block_hash, std::slice::from_ref(tx))
    }

    fn exist_txs(&self, start_block_hash: &Hash, txs: &[T]) -> TxGuardResult<bool> {
        let state = self.state.write();
        let trace = state.tracer.load_traces(txs);
        state
            .blocks
            .is_appeared_on_fork(&trace, start_block_hash)
            .map_err(|e| invariant_violation("replay check", e))
    }

    fn del_old_blocks(&self, new_stable_block_time: u64) -> TxGuardResult<usize> {
        let lifetime = self.config.max_tx_lifetime_secs;
        if new_stable_block_time < lifetime {
            let reason = format!(
                "stable block time {new_stable_block_time} is below tx lifetime {lifetime}"
            );
            error!("[qc-18] Invariant violation during expiry: {}", reason);
            return Err(TxGuardError::InternalInvariant { reason });
        }

        let mut guard = self.state.write();
        let state = &mut *guard;

        let expired = state.block_times.expire(new_stable_block_time - lifetime);
        let mut removed = 0;
        for hash in &expired {
            let Some(node) = state.blocks.del(hash) else {
                warn!(
                    "[qc-18] Expired block {} missing from block cache",
                    short_hex(hash)
                );
                continue;
            };
            for tx in &node.txs {
                state.tracer.del_trace(tx);
            }
            removed += 1;
        }

        if removed > 0 {
            debug!(
                "[qc-18] Expired {} blocks, time base now {}",
                removed,
                state.block_times.time_base()
            );
        }
        Ok(removed)
    }

    fn get_txs_by_branch<B>(&self, block1: &B, block2: &B) -> TxGuardResult<(Vec<T>, Vec<T>)>
    where
        B: GuardedBlock<Tx = T>,
    {
        let state = self.state.write();
        let left = BranchCursor::from_block(block1);
        let right = BranchCursor::from_block(block2);

        diff_branches(&state.blocks, left, right).map_err(|e| {
            error!(
                "[qc-18] Branch diff {} / {} failed: {}",
                short_hex(&block1.block_hash()),
                short_hex(&block2.block_hash()),
                e
            );
            e
        })
    }
}

/// Walks both cursors down to their lowest common ancestor, collecting the
/// transactions of every block passed on each side (leaf first).
fn diff_branches<'a, T: GuardedTransaction>(
    blocks: &'a BlockCache<T>,
    mut left: BranchCursor<'a, T>,
    mut right: BranchCursor<'a, T>,
) -> TxGuardResult<(Vec<T>, Vec<T>)> {
    let mut txs1 = Vec::new();
    let mut txs2 = Vec::new();

    while left.hash != right.hash {
        if left.height > right.height {
            txs1.extend_from_slice(left.txs);
            left = left.parent(blocks)?;
        } else if right.height > left.height {
            txs2.extend_from_slice(right.txs);
            right = right.parent(blocks)?;
        } else {
            if left.height == 0 {
                return Err(TxGuardError::DifferentGenesis);
            }
            txs1.extend_from_slice(left.txs);
            txs2.extend_from_slice(right.txs);
            left = left.parent(blocks)?;
            right = right.parent(blocks)?;
        }
    }
    Ok((txs1, txs2))
}

/// One side of the lowest-common-ancestor walk
struct BranchCursor<'a, T> {
    hash: Hash,
    height: u64,
    parent_hash: Hash,
    txs: &'a [T],
}

impl<'a, T: GuardedTransaction> BranchCursor<'a, T> {
    fn from_block<B>(block: &'a B) -> Self
    where
        B: GuardedBlock<Tx = T>,
    {
        Self {
            hash: block.block_hash(),
            height: block.height(),
            parent_hash: block.parent_hash(),
            txs: block.transactions(),
        }
    }

    fn parent(&self, blocks: &'a BlockCache<T>) -> TxGuardResult<Self> {
        let node = blocks
            .get(&self.parent_hash)
            .ok_or(TxGuardError::NotFoundBlockCache {
                hash: self.parent_hash,
            })?;
        Ok(Self {
            hash: self.parent_hash,
            height: node.header.height,
            parent_hash: node.header.parent_hash,
            txs: &node.txs,
        })
    }
}
