//! # Inbound Port - TxGuardApi
//!
//! Primary driving port exposing replay protection.
//!
//! | Method | Caller |
//! |--------|--------|
//! | `save_block` | Consensus (8), on every validated block |
//! | `exist_tx` / `exist_txs` | Mempool (6), before admitting a transaction |
//! | `del_old_blocks` | Finality (9), whenever the stable block advances |
//! | `get_txs_by_branch` | Consensus (8), when the head switches forks |

use super::outbound::{GuardedBlock, GuardedTransaction};
use crate::error::TxGuardResult;
use shared_types::Hash;

/// Primary API for the Transaction Guard subsystem.
///
/// Every call is atomic with respect to every other call on the same guard.
///
/// # Example
///
/// ```rust,ignore
/// use qc_18_tx_guard::{TxGuard, TxGuardApi};
///
/// let guard = TxGuard::new(stable_block.header.timestamp);
/// guard.save_block(&block);
///
/// if guard.exist_tx(&head_hash, &incoming)? {
///     // already included on this fork: reject
/// }
///
/// guard.del_old_blocks(new_stable_time)?;
/// ```
pub trait TxGuardApi<T: GuardedTransaction>: Send + Sync {
    /// Indexes a block by time, caches it and traces its transactions.
    ///
    /// A block older than the current window is logged and not indexed.
    /// Saving an already cached block is a no-op.
    fn save_block<B>(&self, block: &B)
    where
        B: GuardedBlock<Tx = T>;

    /// Returns true if `tx` (or any nested transaction) appears on the
    /// ancestor path of `start_block_hash`.
    ///
    /// # Errors
    /// - `InternalInvariant`: a traced block could not be resolved
    fn exist_tx(&self, start_block_hash: &Hash, tx: &T) -> TxGuardResult<bool>;

    /// Returns true if any of `txs` appears on the ancestor path of
    /// `start_block_hash`.
    ///
    /// # Errors
    /// - `InternalInvariant`: a traced block could not be resolved
    fn exist_txs(&self, start_block_hash: &Hash, txs: &[T]) -> TxGuardResult<bool>;

    /// Expires every block older than `new_stable_block_time - max_tx_lifetime`
    /// together with its transaction traces. Returns the number of blocks removed.
    ///
    /// # Errors
    /// - `InternalInvariant`: `new_stable_block_time` is below the lifetime window
    fn del_old_blocks(&self, new_stable_block_time: u64) -> TxGuardResult<usize>;

    /// Returns the transactions of each branch strictly above the lowest
    /// common ancestor of `block1` and `block2`, leaf first.
    ///
    /// # Errors
    /// - `NotFoundBlockCache`: an ancestor is not cached
    /// - `DifferentGenesis`: the branches never meet
    fn get_txs_by_branch<B>(&self, block1: &B, block2: &B) -> TxGuardResult<(Vec<T>, Vec<T>)>
    where
        B: GuardedBlock<Tx = T>;
}
