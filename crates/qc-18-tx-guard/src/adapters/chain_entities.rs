//! Outbound port implementations for the workspace chain entities.
//!
//! `ValidatedBlock` and `ValidatedTransaction` come from Consensus already
//! hashed, so the adapters only project fields.

use crate::ports::outbound::{GuardedBlock, GuardedTransaction};
use shared_types::{Hash, ValidatedBlock, ValidatedTransaction};

impl GuardedTransaction for ValidatedTransaction {
    fn tx_hash(&self) -> Hash {
        self.tx_hash
    }

    fn sub_transactions(&self) -> Vec<Self> {
        shared_types::sub_transactions(self)
    }
}

impl GuardedBlock for ValidatedBlock {
    type Tx = ValidatedTransaction;

    fn block_hash(&self) -> Hash {
        self.block_hash
    }

    fn height(&self) -> u64 {
        self.header.height
    }

    fn parent_hash(&self) -> Hash {
        self.header.parent_hash
    }

    fn time(&self) -> u64 {
        self.header.timestamp
    }

    fn transactions(&self) -> &[ValidatedTransaction] {
        &self.transactions
    }
}
