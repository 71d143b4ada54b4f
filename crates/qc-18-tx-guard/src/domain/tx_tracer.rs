//! # Transaction Tracer
//!
//! Maps a transaction hash to the set of blocks it appeared in. Nested
//! transactions of a box transaction are traced individually.
//!
//! Entries are only ever removed whole: every transaction of an expiring
//! block expires with it, so there is no per-block removal.

use super::hash_set::BlockHashSet;
use crate::ports::outbound::GuardedTransaction;
use shared_types::Hash;
use std::collections::HashMap;

/// Transaction appearance index.
///
/// INVARIANT: a present key maps to a non-empty set.
#[derive(Debug, Default)]
pub struct TxTracer {
    traces: HashMap<Hash, BlockHashSet>,
}

impl TxTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `tx` and all of its nested transactions appeared in
    /// `block_hash`.
    pub fn add_trace<T: GuardedTransaction>(&mut self, tx: &T, block_hash: Hash) {
        self.traces.entry(tx.tx_hash()).or_default().add(block_hash);
        for sub in tx.sub_transactions() {
            self.add_trace(&sub, block_hash);
        }
    }

    /// Drops every trace of `tx` and of its nested transactions.
    pub fn del_trace<T: GuardedTransaction>(&mut self, tx: &T) {
        self.traces.remove(&tx.tx_hash());
        for sub in tx.sub_transactions() {
            self.del_trace(&sub);
        }
    }

    /// Union of the block sets of `txs` and their nested transactions.
    pub fn load_traces<T: GuardedTransaction>(&self, txs: &[T]) -> BlockHashSet {
        let mut blocks = BlockHashSet::new();
        for tx in txs {
            self.load_into(tx, &mut blocks);
        }
        blocks
    }

    fn load_into<T: GuardedTransaction>(&self, tx: &T, blocks: &mut BlockHashSet) {
        if let Some(trace) = self.traces.get(&tx.tx_hash()) {
            blocks.merge(trace);
        }
        for sub in tx.sub_transactions() {
            self.load_into(&sub, blocks);
        }
    }

    /// Blocks `tx_hash` was traced to, if any.
    pub fn get(&self, tx_hash: &Hash) -> Option<&BlockHashSet> {
        self.traces.get(tx_hash)
    }

    /// Number of traced transaction hashes.
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}
