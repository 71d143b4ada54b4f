//! # Block Cache - Hash-Indexed Block Projections
//!
//! Stores `BlockNode`s keyed by block hash and answers fork-ancestry
//! questions by walking parent links.
//!
//! ## Invariants
//!
//! - First write wins: a node is never replaced once cached.
//! - Assumed, not enforced: a cached parent sits exactly one height below
//!   its child.
//! - Ancestors may be missing below the window a caller asks about; a sibling
//!   fork's expiry can prune them at any time.

use super::hash_set::BlockHashSet;
use super::value_objects::BlockNode;
use crate::error::{short_hex, TxGuardError, TxGuardResult};
use crate::ports::outbound::{GuardedBlock, GuardedTransaction};
use shared_types::{Hash, ZERO_HASH};
use std::collections::HashMap;
use tracing::debug;

/// Hash-indexed store of block projections.
#[derive(Debug)]
pub struct BlockCache<T> {
    blocks: HashMap<Hash, BlockNode<T>>,
}

impl<T> Default for BlockCache<T> {
    fn default() -> Self {
        Self {
            blocks: HashMap::new(),
        }
    }
}

impl<T: GuardedTransaction> BlockCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caches a projection of `block`. No-op if the hash is already cached.
    pub fn add<B>(&mut self, block: &B)
    where
        B: GuardedBlock<Tx = T>,
    {
        self.blocks
            .entry(block.block_hash())
            .or_insert_with(|| BlockNode::from_block(block));
    }

    /// Removes a block, returning its node if it was cached.
    pub fn del(&mut self, hash: &Hash) -> Option<BlockNode<T>> {
        self.blocks.remove(hash)
    }

    pub fn get(&self, hash: &Hash) -> Option<&BlockNode<T>> {
        self.blocks.get(hash)
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.blocks.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Resolves every hash in `hashes`. All or nothing.
    ///
    /// # Errors
    /// - `NotFoundBlockCache`: any single hash is not cached
    pub fn collect_blocks(&self, hashes: &BlockHashSet) -> TxGuardResult<Vec<&BlockNode<T>>> {
        hashes
            .iter()
            .map(|hash| {
                self.blocks
                    .get(hash)
                    .ok_or(TxGuardError::NotFoundBlockCache { hash: *hash })
            })
            .collect()
    }

    /// Hashes on the ancestor path of `start_hash` (inclusive) whose height
    /// lies in `[min_height, max_height]`, leaf first.
    ///
    /// Returns an empty path for the zero hash or an inverted range. The walk
    /// stops quietly at the first ancestor that is no longer cached.
    ///
    /// # Errors
    /// - `NotFoundBlockCache`: `start_hash` itself is not cached
    pub fn slice_on_fork(
        &self,
        start_hash: &Hash,
        min_height: u64,
        max_height: u64,
    ) -> TxGuardResult<Vec<Hash>> {
        if *start_hash == ZERO_HASH || min_height > max_height {
            return Ok(Vec::new());
        }

        let mut hash = *start_hash;
        let mut node = self
            .blocks
            .get(&hash)
            .ok_or(TxGuardError::NotFoundBlockCache { hash })?;

        let mut path = Vec::new();
        while node.header.height >= min_height {
            if node.header.height <= max_height {
                path.push(hash);
            }
            if node.header.height == min_height {
                break;
            }
            hash = node.header.parent_hash;
            match self.blocks.get(&hash) {
                Some(parent) => node = parent,
                None => {
                    debug!(
                        "[qc-18] Fork walk from {} stopped at uncached ancestor {}",
                        short_hex(start_hash),
                        short_hex(&hash)
                    );
                    break;
                }
            }
        }
        Ok(path)
    }

    /// True iff some hash in `trace` lies on the ancestor path of
    /// `start_hash` within the height span of `trace`.
    ///
    /// # Errors
    /// - `NotFoundBlockCache`: a hash in `trace` or `start_hash` is not cached
    pub fn is_appeared_on_fork(&self, trace: &BlockHashSet, start_hash: &Hash) -> TxGuardResult<bool> {
        if trace.is_empty() {
            return Ok(false);
        }

        let nodes = self.collect_blocks(trace)?;
        let (min_height, max_height) = nodes.iter().fold((u64::MAX, 0), |(lo, hi), node| {
            (lo.min(node.header.height), hi.max(node.header.height))
        });

        let path = self.slice_on_fork(start_hash, min_height, max_height)?;
        Ok(path.iter().any(|hash| trace.has(hash)))
    }
}
