//! Blocks and the proof-of-work search that seals them.

use crate::core::Transaction;
use crate::crypto::{self, pow, pow::MiningProgress};
use crate::utils::time::current_timestamp_millis;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// Previous-hash sentinel carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// An ordered batch of transactions linked to its predecessor by hash and
/// sealed by a proof-of-work search.
///
/// A freshly constructed block carries a provisional hash computed at
/// nonce 0; `mine` mutates nonce and hash in place until the difficulty
/// target is met. Once appended to a chain the block is logically immutable;
/// only the explicit `tamper` hook breaks that, on purpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    /// Unix timestamp in milliseconds, captured at construction.
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
    pub previous_hash: String,
    /// Required count of leading zero hex characters in `hash`.
    pub difficulty: u32,
    pub nonce: u64,
    pub hash: String,
    /// Seconds the successful search took; 0 for genesis.
    pub mining_time: f64,
}

/// Per-transaction encoding used in the block-hash preimage.
///
/// Field order is fixed so the serialized form is stable regardless of how
/// the in-memory transaction was produced; transaction order follows the
/// pool order the block was built with.
#[derive(Serialize)]
struct CanonicalTx<'a> {
    amount: u64,
    id: &'a str,
    receiver: &'a str,
    sender: &'a str,
    timestamp: u64,
}

impl Block {
    /// Create the transaction-free genesis block.
    ///
    /// Index 0, sentinel previous hash, difficulty 1. Its hash is computed
    /// once; no search is performed.
    pub fn genesis() -> Self {
        let mut block = Self {
            index: 0,
            timestamp: current_timestamp_millis(),
            transactions: Vec::new(),
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
            difficulty: 1,
            nonce: 0,
            hash: String::new(),
            mining_time: 0.0,
        };
        block.hash = block.compute_hash();
        block
    }

    /// Create a block over `transactions` with a provisional hash.
    ///
    /// The initial hash is computed at nonce 0 and will almost certainly not
    /// satisfy the difficulty target until `mine` runs.
    pub fn new(
        index: u64,
        previous_hash: impl Into<String>,
        transactions: Vec<Transaction>,
        difficulty: u32,
    ) -> Self {
        let mut block = Self {
            index,
            timestamp: current_timestamp_millis(),
            transactions,
            previous_hash: previous_hash.into(),
            difficulty,
            nonce: 0,
            hash: String::new(),
            mining_time: 0.0,
        };
        block.hash = block.compute_hash();
        block
    }

    /// Recompute the digest over the block's current contents.
    ///
    /// This is the exact function the mining loop and chain validation use;
    /// a stored hash that disagrees with it means the block was altered
    /// after sealing.
    pub fn compute_hash(&self) -> String {
        let canonical: Vec<CanonicalTx<'_>> = self
            .transactions
            .iter()
            .map(|tx| CanonicalTx {
                amount: tx.amount,
                id: &tx.id,
                receiver: &tx.receiver,
                sender: &tx.sender,
                timestamp: tx.timestamp,
            })
            .collect();
        let tx_json = serde_json::to_string(&canonical).unwrap_or_default();
        crypto::sha256_hex(
            format!(
                "{}{}{}{}{}{}",
                self.index, self.timestamp, tx_json, self.previous_hash, self.difficulty, self.nonce
            )
            .as_bytes(),
        )
    }

    /// Whether the stored hash satisfies this block's difficulty target.
    pub fn meets_target(&self) -> bool {
        pow::meets_difficulty(&self.hash, self.difficulty)
    }

    /// Brute-force the nonce until the hash carries the required number of
    /// leading zero hex characters. Returns the elapsed search time in
    /// seconds, which is also recorded on the block.
    ///
    /// The observer, when given, is called every
    /// [`pow::PROGRESS_ATTEMPT_INTERVAL`] attempts with a progress snapshot;
    /// reporting never alters the final nonce or hash.
    pub fn mine(&mut self, observer: Option<&dyn Fn(&MiningProgress)>) -> f64 {
        let started = Instant::now();
        let mut attempts: u64 = 0;

        while !self.meets_target() {
            self.nonce += 1;
            self.hash = self.compute_hash();
            attempts += 1;

            if attempts % pow::PROGRESS_ATTEMPT_INTERVAL == 0 {
                if let Some(observer) = observer {
                    let elapsed = started.elapsed().as_secs_f64();
                    observer(&MiningProgress {
                        nonce: self.nonce,
                        attempts,
                        hash: self.hash.clone(),
                        elapsed_seconds: elapsed,
                        hash_rate: if elapsed > 0.0 {
                            attempts as f64 / elapsed
                        } else {
                            0.0
                        },
                    });
                }
            }
        }

        self.mining_time = started.elapsed().as_secs_f64();
        debug!(
            index = self.index,
            nonce = self.nonce,
            attempts,
            elapsed = self.mining_time,
            "block sealed"
        );
        self.mining_time
    }

    /// Corruption hook: overwrite the first transaction's amount without
    /// recomputing the block hash, leaving a detectable mismatch behind.
    ///
    /// Returns false when the block has no transactions to corrupt.
    pub fn tamper(&mut self, new_amount: u64) -> bool {
        match self.transactions.first_mut() {
            Some(tx) => {
                tx.amount = new_amount;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::DIGEST_HEX_LEN;
    use std::cell::RefCell;

    const TS: u64 = 1_700_000_000_000;

    fn tx(amount: u64) -> Transaction {
        Transaction::with_timestamp("Alice", "Bob", amount, TS)
    }

    #[test]
    fn test_genesis_shape() {
        let genesis = Block::genesis();
        assert_eq!(genesis.index, 0);
        assert_eq!(genesis.previous_hash, GENESIS_PREVIOUS_HASH);
        assert_eq!(genesis.difficulty, 1);
        assert!(genesis.transactions.is_empty());
        assert_eq!(genesis.nonce, 0);
        assert_eq!(genesis.mining_time, 0.0);
        assert_eq!(genesis.hash, genesis.compute_hash());
        assert_eq!(genesis.hash.len(), DIGEST_HEX_LEN);
    }

    #[test]
    fn test_provisional_hash_matches_contents() {
        let block = Block::new(1, "0", vec![tx(10)], 2);
        assert_eq!(block.nonce, 0);
        assert_eq!(block.hash, block.compute_hash());
    }

    #[test]
    fn test_hash_changes_with_nonce() {
        let mut block = Block::new(1, "0", vec![tx(10)], 2);
        let before = block.compute_hash();
        block.nonce += 1;
        assert_ne!(before, block.compute_hash());
    }

    #[test]
    fn test_hash_is_reproducible_for_equal_contents() {
        let a = Block::new(1, "0", vec![tx(10), tx(5)], 2);
        let mut b = Block::new(1, "0", vec![tx(10), tx(5)], 2);
        b.timestamp = a.timestamp;
        assert_eq!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_mining_satisfies_target() {
        let mut block = Block::new(1, "0", vec![tx(10)], 1);
        let elapsed = block.mine(None);
        assert!(block.meets_target());
        assert!(block.hash.starts_with('0'));
        assert_eq!(block.hash, block.compute_hash());
        assert_eq!(block.mining_time, elapsed);
    }

    #[test]
    fn test_progress_reports_follow_the_cadence() {
        let mut block = Block::new(1, "0", vec![tx(10)], 4);
        let reports: RefCell<Vec<u64>> = RefCell::new(Vec::new());
        let observer = |p: &MiningProgress| reports.borrow_mut().push(p.attempts);

        block.mine(Some(&observer));

        let reports = reports.into_inner();
        // The search for this content happens to need more attempts than one
        // reporting interval unless it got lucky early; either way every
        // report must land exactly on the cadence.
        if block.nonce >= pow::PROGRESS_ATTEMPT_INTERVAL {
            assert!(!reports.is_empty());
        }
        for (i, attempts) in reports.iter().enumerate() {
            assert_eq!(*attempts, (i as u64 + 1) * pow::PROGRESS_ATTEMPT_INTERVAL);
        }
        assert!(block.meets_target());
    }

    #[test]
    fn test_tamper_breaks_recompute() {
        let mut block = Block::new(1, "0", vec![tx(10)], 1);
        block.mine(None);
        assert!(block.tamper(999_999));
        assert_eq!(block.transactions[0].amount, 999_999);
        assert_ne!(block.hash, block.compute_hash());
    }

    #[test]
    fn test_tamper_fails_on_empty_block() {
        let mut genesis = Block::genesis();
        assert!(!genesis.tamper(999_999));
    }
}
