//! Proof-of-work primitives for the EduChain simulation.
//!
//! Difficulty is the number of leading zero hex characters a block hash must
//! carry; the expected search cost grows as 16^difficulty. The nonce search
//! itself runs on [`crate::core::Block`]; this module provides the target
//! predicate, the progress snapshot handed to observers, and the reactive
//! difficulty controller.

use serde::{Deserialize, Serialize};

/// Attempts between progress reports during mining.
pub const PROGRESS_ATTEMPT_INTERVAL: u64 = 500;

/// Check whether a hex `hash` carries at least `difficulty` leading zeros.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    let required = difficulty as usize;
    hash.len() >= required && hash.as_bytes()[..required].iter().all(|&b| b == b'0')
}

/// Expected number of attempts to find a conforming hash.
pub fn expected_attempts(difficulty: u32) -> u64 {
    16u64.saturating_pow(difficulty)
}

/// Snapshot handed to a mining progress observer.
///
/// Advisory only: observers see the search pass by, they cannot steer it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiningProgress {
    /// Nonce most recently tried.
    pub nonce: u64,
    /// Attempts made so far.
    pub attempts: u64,
    /// Hash produced by the most recent attempt.
    pub hash: String,
    /// Seconds elapsed since the search started.
    pub elapsed_seconds: f64,
    /// Attempts per second.
    pub hash_rate: f64,
}

/// Single-sample reactive difficulty controller.
///
/// Compares the most recent mining time against the target: strictly faster
/// raises difficulty by one, strictly slower lowers it by one but never below
/// 1, and an exact match leaves it unchanged. Deliberately reacts to one
/// sample rather than a windowed average.
pub fn adjust_difficulty(current: u32, target_seconds: f64, actual_seconds: f64) -> u32 {
    if actual_seconds < target_seconds {
        current + 1
    } else if actual_seconds > target_seconds && current > 1 {
        current - 1
    } else {
        current
    }
}
