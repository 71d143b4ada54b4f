//! # Core Domain Entities
//!
//! Chain entities shared by every subsystem that follows the block tree.
//!
//! ## Clusters
//!
//! - **Chain**: `BlockHeader`, `ValidatedBlock`
//! - **Transactions**: `Transaction`, `TxKind`, `ValidatedTransaction`

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha2::{Digest, Sha256};

// =============================================================================
// CLUSTER A: THE CHAIN
// =============================================================================

/// A 32-byte hash (SHA-256).
pub type Hash = [u8; 32];

/// The all-zero hash. Used as "no block" (e.g. the genesis parent).
pub const ZERO_HASH: Hash = [0u8; 32];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// A 32-byte Ed25519 public key.
pub type PublicKey = [u8; 32];

/// The header of a block containing metadata and root hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BlockHeader {
    /// Protocol version for this block.
    pub version: u16,
    /// Block height in the chain.
    pub height: u64,
    /// Hash of the parent block (creates the chain linkage).
    pub parent_hash: Hash,
    /// Merkle root of all transactions in the block.
    pub merkle_root: Hash,
    /// Unix timestamp (seconds) when the block was proposed.
    pub timestamp: u64,
    /// The validator who proposed this block.
    pub proposer: PublicKey,
}

impl BlockHeader {
    /// Compute the header hash.
    pub fn hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(self.version.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update(self.parent_hash);
        hasher.update(self.merkle_root);
        hasher.update(self.timestamp.to_le_bytes());
        hasher.update(self.proposer);
        hasher.finalize().into()
    }
}

/// A validated block as emitted by Consensus.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ValidatedBlock {
    /// The block header.
    pub header: BlockHeader,
    /// All validated transactions in this block, in block order.
    pub transactions: Vec<ValidatedTransaction>,
    /// Hash of `header`, cached at validation time.
    pub block_hash: Hash,
}

impl ValidatedBlock {
    /// Builds a block and caches its header hash.
    pub fn new(header: BlockHeader, transactions: Vec<ValidatedTransaction>) -> Self {
        let block_hash = header.hash();
        Self {
            header,
            transactions,
            block_hash,
        }
    }
}

// =============================================================================
// CLUSTER B: TRANSACTIONS
// =============================================================================

/// Payload kind of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TxKind {
    /// Plain value transfer / contract call.
    #[default]
    Transfer,
    /// A box transaction carrying nested transactions. Each nested
    /// transaction is independently subject to replay checks.
    Bundle(Vec<Transaction>),
}

/// A raw transaction as received from the network.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sender's public key.
    pub from: PublicKey,
    /// Recipient's public key (optional for contract creation).
    pub to: Option<PublicKey>,
    /// Transaction amount in base units.
    pub value: u64,
    /// Sender's nonce.
    pub nonce: u64,
    /// Transaction payload (contract call data, etc.).
    pub data: Vec<u8>,
    /// Transfer or bundle.
    pub kind: TxKind,
    /// Sender's signature over the transaction.
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
}

impl Transaction {
    /// Compute the transaction hash. The signature is not covered.
    ///
    /// Bundles commit to the hashes of their nested transactions.
    pub fn hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(self.from);
        if let Some(to) = &self.to {
            hasher.update(to);
        }
        hasher.update(self.value.to_le_bytes());
        hasher.update(self.nonce.to_le_bytes());
        hasher.update(&self.data);
        if let TxKind::Bundle(inner) = &self.kind {
            hasher.update((inner.len() as u64).to_le_bytes());
            for tx in inner {
                hasher.update(tx.hash());
            }
        }
        hasher.finalize().into()
    }

    /// Returns true for box transactions.
    pub fn is_bundle(&self) -> bool {
        matches!(self.kind, TxKind::Bundle(_))
    }
}

/// A transaction that has passed signature and format validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedTransaction {
    /// The underlying transaction.
    pub inner: Transaction,
    /// Hash of the transaction for indexing.
    pub tx_hash: Hash,
}

impl ValidatedTransaction {
    /// Wraps a transaction and caches its hash.
    pub fn new(inner: Transaction) -> Self {
        let tx_hash = inner.hash();
        Self { inner, tx_hash }
    }
}

/// Decomposes a box transaction into its nested transactions (one level).
///
/// Plain transfers have no sub-transactions.
pub fn sub_transactions(tx: &ValidatedTransaction) -> Vec<ValidatedTransaction> {
    match &tx.inner.kind {
        TxKind::Transfer => Vec::new(),
        TxKind::Bundle(inner) => inner.iter().cloned().map(ValidatedTransaction::new).collect(),
    }
}
