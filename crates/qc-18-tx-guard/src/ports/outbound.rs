//! Outbound (Driven) ports for the Transaction Guard subsystem.
//!
//! The guard consumes blocks and transactions owned by other subsystems.
//! It only needs a thin projection of each, described by these traits.

use shared_types::Hash;

/// A transaction as seen by the guard.
pub trait GuardedTransaction: Clone + Send + Sync {
    /// The transaction hash (replay identity).
    fn tx_hash(&self) -> Hash;

    /// Nested transactions of a box transaction, one level deep.
    ///
    /// Plain transactions return an empty list. Nested transactions may
    /// themselves be bundles; the guard recurses.
    fn sub_transactions(&self) -> Vec<Self> {
        Vec::new()
    }
}

/// A validated block as seen by the guard.
pub trait GuardedBlock {
    /// Transaction type carried by the block.
    type Tx: GuardedTransaction;

    /// Block hash.
    fn block_hash(&self) -> Hash;

    /// Block height.
    fn height(&self) -> u64;

    /// Parent block hash.
    fn parent_hash(&self) -> Hash;

    /// Block time in seconds.
    fn time(&self) -> u64;

    /// Transactions in block order.
    fn transactions(&self) -> &[Self::Tx];
}

/// Mock transaction for testing.
#[cfg(test)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockTx {
    pub hash: Hash,
    pub subs: Vec<MockTx>,
}

#[cfg(test)]
impl MockTx {
    pub fn new(n: u8) -> Self {
        let mut hash = [0x77; 32];
        hash[0] = n;
        Self {
            hash,
            subs: Vec::new(),
        }
    }

    pub fn bundle(n: u8, subs: Vec<MockTx>) -> Self {
        Self {
            subs,
            ..Self::new(n)
        }
    }
}

#[cfg(test)]
impl GuardedTransaction for MockTx {
    fn tx_hash(&self) -> Hash {
        self.hash
    }

    fn sub_transactions(&self) -> Vec<Self> {
        self.subs.clone()
    }
}

/// Mock block for testing.
#[cfg(test)]
#[derive(Clone, Debug)]
pub struct MockBlock {
    pub hash: Hash,
    pub height: u64,
    pub parent_hash: Hash,
    pub time: u64,
    pub txs: Vec<MockTx>,
}

#[cfg(test)]
impl MockBlock {
    pub fn new(hash: Hash, height: u64, parent_hash: Hash) -> Self {
        Self {
            hash,
            height,
            parent_hash,
            time: 0,
            txs: Vec::new(),
        }
    }

    pub fn with_time(mut self, time: u64) -> Self {
        self.time = time;
        self
    }

    pub fn with_txs(mut self, txs: Vec<MockTx>) -> Self {
        self.txs = txs;
        self
    }
}

#[cfg(test)]
impl GuardedBlock for MockBlock {
    type Tx = MockTx;

    fn block_hash(&self) -> Hash {
        self.hash
    }

    fn height(&self) -> u64 {
        self.height
    }

    fn parent_hash(&self) -> Hash {
        self.parent_hash
    }

    fn time(&self) -> u64 {
        self.time
    }

    fn transactions(&self) -> &[MockTx] {
        &self.txs
    }
}
