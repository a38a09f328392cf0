//! Chain state: the block sequence, pending pool, replay ledger, and
//! difficulty policy.
//!
//! One `Blockchain` value owns everything for a simulation session. All
//! mutating operations run to completion on the caller's thread; a reset is
//! the caller discarding the value and constructing a fresh one.

use crate::config::ChainConfig;
use crate::core::{Block, Transaction};
use crate::crypto::pow::{self, MiningProgress};
use crate::error::{ChainError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{info, warn};

/// Summary of a successful `mine_pending` call.
///
/// The miner identity is recorded for display only; it has no effect on the
/// chain and no reward is minted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MineReceipt {
    pub index: u64,
    pub hash: String,
    pub nonce: u64,
    pub difficulty: u32,
    pub transaction_count: usize,
    pub duration_seconds: f64,
    pub miner: String,
}

impl fmt::Display for MineReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block #{} mined by {} in {:.4}s (nonce {})",
            self.index, self.miner, self.duration_seconds, self.nonce
        )
    }
}

/// The blockchain state machine.
///
/// Owns the block sequence (genesis first), the pending transaction pool,
/// the set of every transaction id ever accepted, and the current
/// difficulty. Blocks move through `pool -> mining -> appended`; validation
/// is a stateless query available at any point.
#[derive(Debug)]
pub struct Blockchain {
    blocks: Vec<Block>,
    pending: Vec<Transaction>,
    processed_ids: HashSet<String>,
    difficulty: u32,
    target_block_time: f64,
    mining_times: Vec<f64>,
}

impl Blockchain {
    /// Create a chain with default configuration. The genesis block is
    /// created synchronously.
    pub fn new() -> Self {
        Self::with_config(ChainConfig::default())
    }

    /// Create a chain from an explicit configuration.
    pub fn with_config(config: ChainConfig) -> Self {
        Self {
            blocks: vec![Block::genesis()],
            pending: Vec::new(),
            processed_ids: HashSet::new(),
            difficulty: config.initial_difficulty.max(1),
            target_block_time: config.target_block_time,
            mining_times: Vec::new(),
        }
    }

    /// All blocks, genesis first.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The most recently appended block. The chain always holds at least
    /// genesis.
    pub fn latest_block(&self) -> &Block {
        self.blocks.last().expect("chain starts with genesis")
    }

    /// Number of blocks in the chain, genesis included.
    pub fn height(&self) -> usize {
        self.blocks.len()
    }

    /// Transactions awaiting inclusion in the next block.
    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    /// Current difficulty applied to the next mined block.
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Manual difficulty override, clamped to at least 1.
    pub fn set_difficulty(&mut self, difficulty: u32) {
        self.difficulty = difficulty.max(1);
    }

    /// Durations of every successful mining search, in order.
    pub fn mining_times(&self) -> &[f64] {
        &self.mining_times
    }

    /// Whether `id` was ever accepted with replay protection on, or mined.
    pub fn is_processed(&self, id: &str) -> bool {
        self.processed_ids.contains(id)
    }

    /// Add a transaction to the pending pool.
    ///
    /// With `replay_protection` on, a transaction whose id was ever accepted
    /// before — mined or still pending — is rejected, and the id is
    /// registered immediately so a resubmission during the same pending
    /// window also fails. With it off the pool accepts anything and keeps no
    /// id bookkeeping; that is the deliberately vulnerable mode for
    /// demonstrating replay attacks.
    pub fn submit_transaction(&mut self, tx: Transaction, replay_protection: bool) -> Result<()> {
        if replay_protection {
            if self.processed_ids.contains(&tx.id) || self.pending.iter().any(|p| p.id == tx.id) {
                warn!(id = %tx.id, "rejected replayed transaction");
                return Err(ChainError::DuplicateTransaction { id: tx.id });
            }
            self.processed_ids.insert(tx.id.clone());
        }

        info!(
            id = %tx.id,
            sender = %tx.sender,
            receiver = %tx.receiver,
            amount = tx.amount,
            "transaction accepted"
        );
        self.pending.push(tx);
        Ok(())
    }

    /// Build a block from the whole pending pool and run its proof-of-work
    /// search synchronously; the call blocks until a conforming hash is
    /// found.
    ///
    /// On success the block is appended, every mined transaction id is
    /// registered (idempotent for ids recorded at submission), the pool is
    /// cleared, and the search duration is recorded. With `auto_adjust` set
    /// the difficulty controller runs afterwards. The observer is forwarded
    /// to the block's mining loop.
    pub fn mine_pending(
        &mut self,
        miner: &str,
        auto_adjust: bool,
        observer: Option<&dyn Fn(&MiningProgress)>,
    ) -> Result<MineReceipt> {
        if self.pending.is_empty() {
            return Err(ChainError::EmptyPool);
        }

        let mut block = Block::new(
            self.blocks.len() as u64,
            self.latest_block().hash.clone(),
            std::mem::take(&mut self.pending),
            self.difficulty,
        );
        let duration = block.mine(observer);

        for tx in &block.transactions {
            self.processed_ids.insert(tx.id.clone());
        }
        self.mining_times.push(duration);

        info!(
            index = block.index,
            hash = %block.hash,
            nonce = block.nonce,
            duration,
            miner,
            "block appended"
        );

        let receipt = MineReceipt {
            index: block.index,
            hash: block.hash.clone(),
            nonce: block.nonce,
            difficulty: block.difficulty,
            transaction_count: block.transactions.len(),
            duration_seconds: duration,
            miner: miner.to_string(),
        };
        self.blocks.push(block);

        if auto_adjust {
            self.adjust_difficulty();
        }

        Ok(receipt)
    }

    /// Re-target difficulty from the most recent block's mining time.
    ///
    /// No-op until the chain holds a mined block beyond genesis. Reacts to
    /// the single most recent sample: strictly under target raises the
    /// difficulty by one, strictly over lowers it by one (never below 1).
    pub fn adjust_difficulty(&mut self) {
        if self.blocks.len() < 2 {
            return;
        }

        let last_mining_time = self.latest_block().mining_time;
        let next = pow::adjust_difficulty(self.difficulty, self.target_block_time, last_mining_time);
        if next != self.difficulty {
            info!(
                from = self.difficulty,
                to = next,
                mining_time = last_mining_time,
                "difficulty adjusted"
            );
            self.difficulty = next;
        }
    }

    /// Walk the chain from the first mined block and check both invariants:
    /// every stored hash matches its recomputed hash, and every block links
    /// to its predecessor's stored hash. Read-only; reports the first
    /// offending block.
    pub fn is_valid(&self) -> Result<()> {
        for index in 1..self.blocks.len() {
            let current = &self.blocks[index];
            let previous = &self.blocks[index - 1];

            if current.hash != current.compute_hash() {
                return Err(ChainError::TamperedBlock { index });
            }
            if current.previous_hash != previous.hash {
                return Err(ChainError::BrokenLink { index });
            }
        }
        Ok(())
    }

    /// Testing hook: overwrite the first transaction amount of
    /// `blocks[index]` without recomputing its hash, so the next `is_valid`
    /// walk detects the mismatch.
    pub fn corrupt_block(&mut self, index: usize, new_amount: u64) -> Result<()> {
        let height = self.blocks.len();
        let block = self
            .blocks
            .get_mut(index)
            .ok_or(ChainError::InvalidIndex { index, height })?;

        if !block.tamper(new_amount) {
            return Err(ChainError::NoTransactions { index });
        }
        warn!(index, new_amount, "block contents tampered");
        Ok(())
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}
