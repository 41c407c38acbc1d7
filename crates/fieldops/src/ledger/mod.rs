//! Append-only hash-chained ledger with a proof-of-work admission cost.
//!
//! Single-writer tamper-evidence, not distributed agreement: callers are
//! expected to serialize `append` through one owner (see
//! [`crate::workflows::dispatch::service::DispatchService`]).

mod proof;

pub use proof::{proof_of_work, valid_proof, DEFAULT_DIFFICULTY};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

/// Sentinel `previous_hash` carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Fixed proof seeded into the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// One append-only unit of the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block<T> {
    /// 1-based sequential position.
    pub index: u64,
    /// Creation instant; informational only, but included in the hash.
    pub timestamp: DateTime<Utc>,
    /// Entries sealed into this block, in insertion order.
    pub entries: Vec<T>,
    /// Proof satisfying the difficulty predicate against the previous proof.
    pub proof: u64,
    /// Hex digest of the prior block; `"1"` for genesis.
    pub previous_hash: String,
}

/// Mining knobs. `batch_size = 1` seals one block per appended entry so each
/// entry stays individually auditable; larger batches trade that for
/// throughput.
#[derive(Debug, Clone, Copy)]
pub struct MiningPolicy {
    pub difficulty: u32,
    pub batch_size: usize,
}

impl Default for MiningPolicy {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            batch_size: 1,
        }
    }
}

/// Hash a block over its canonical byte form.
///
/// `serde_json::to_value` stores object members in a key-sorted map (this
/// requires the `preserve_order` feature to stay disabled), so two logically
/// equal blocks always serialize to identical bytes.
pub fn hash_block<T: Serialize>(block: &Block<T>) -> String {
    let canonical = serde_json::to_value(block).expect("block serialization is infallible");
    let bytes = canonical.to_string();
    hex::encode(Sha256::digest(bytes.as_bytes()))
}

/// Walk a chain and check every hash link and proof transition.
///
/// An empty chain and a genesis-only chain are vacuously valid. The genesis
/// block itself is structurally trusted; checks start at the second block.
pub fn verify_chain<T: Serialize>(blocks: &[Block<T>], difficulty: u32) -> bool {
    for pair in blocks.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        if current.previous_hash != hash_block(previous) {
            return false;
        }
        if !valid_proof(previous.proof, current.proof, difficulty) {
            return false;
        }
    }
    true
}

/// The hash-chained ledger: a block sequence plus the pending-entries buffer.
///
/// Blocks are never mutated or removed once appended. The only reportable
/// condition is a failed [`Ledger::verify`], which is a diagnostic result,
/// not an error.
#[derive(Debug)]
pub struct Ledger<T> {
    chain: Vec<Block<T>>,
    pending: Vec<T>,
    policy: MiningPolicy,
}

impl<T: Serialize + Clone> Ledger<T> {
    /// Construct a ledger holding only the genesis block.
    pub fn new(policy: MiningPolicy) -> Self {
        let genesis = Block {
            index: 1,
            timestamp: Utc::now(),
            entries: Vec::new(),
            proof: GENESIS_PROOF,
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
        };
        Self {
            chain: vec![genesis],
            pending: Vec::new(),
            policy,
        }
    }

    /// Add an entry to the pending buffer and, once the buffer reaches the
    /// policy's batch size, mine and seal a block containing exactly that
    /// buffer. Returns the new block's hex digest when a block was sealed.
    ///
    /// With the default batch size of 1 a receipt is returned on every call.
    /// Mining runs to completion before this returns; callers experience it
    /// as latency, never as background work.
    pub fn append(&mut self, entry: T) -> Option<String> {
        self.pending.push(entry);
        if self.pending.len() < self.policy.batch_size {
            return None;
        }
        Some(self.seal())
    }

    /// Force-mine a block from a non-empty pending buffer.
    pub fn flush(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        Some(self.seal())
    }

    fn seal(&mut self) -> String {
        let last = self
            .chain
            .last()
            .expect("chain always holds the genesis block");
        let proof = proof_of_work(last.proof, self.policy.difficulty);
        let block = Block {
            index: last.index + 1,
            timestamp: Utc::now(),
            entries: std::mem::take(&mut self.pending),
            proof,
            previous_hash: hash_block(last),
        };
        let digest = hash_block(&block);
        info!(index = block.index, entries = block.entries.len(), "sealed ledger block");
        self.chain.push(block);
        digest
    }

    /// Recheck every hash link and proof transition in the chain.
    pub fn verify(&self) -> bool {
        verify_chain(&self.chain, self.policy.difficulty)
    }

    pub fn blocks(&self) -> &[Block<T>] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Entries buffered but not yet sealed into a block.
    pub fn pending(&self) -> &[T] {
        &self.pending
    }

    /// Digest of the most recent block.
    pub fn last_block_hash(&self) -> Option<String> {
        self.chain.last().map(hash_block)
    }
}
