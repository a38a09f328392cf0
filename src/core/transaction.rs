//! Transaction records and their content-derived identifiers.

use crate::crypto::sha256_hex;
use crate::utils::time::current_timestamp_millis;
use serde::{Deserialize, Serialize};

/// An immutable record of a value transfer.
///
/// The `id` is a digest of the remaining fields, so two transactions with
/// identical sender, receiver, amount, and timestamp carry identical ids.
/// That property is what replay detection keys on.
///
/// Callers are expected to pass a positive `amount`; the chain does not
/// validate transfer semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub receiver: String,
    pub amount: u64,
    /// Unix timestamp in milliseconds.
    pub timestamp: u64,
    /// SHA-256 digest of the other four fields.
    pub id: String,
}

impl Transaction {
    /// Create a transaction stamped with the current time.
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, amount: u64) -> Self {
        Self::with_timestamp(sender, receiver, amount, current_timestamp_millis())
    }

    /// Create a transaction with an explicit timestamp.
    pub fn with_timestamp(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: u64,
        timestamp: u64,
    ) -> Self {
        let sender = sender.into();
        let receiver = receiver.into();
        let id = Self::digest(&sender, &receiver, amount, timestamp);
        Self {
            sender,
            receiver,
            amount,
            timestamp,
            id,
        }
    }

    /// Deterministic content digest over the canonical field concatenation.
    ///
    /// Same inputs, including the timestamp, always yield the same output.
    pub fn digest(sender: &str, receiver: &str, amount: u64, timestamp: u64) -> String {
        sha256_hex(format!("{}{}{}{}", sender, receiver, amount, timestamp).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::DIGEST_HEX_LEN;
    use std::collections::HashSet;

    const TS: u64 = 1_700_000_000_000;

    #[test]
    fn test_digest_is_deterministic() {
        let a = Transaction::digest("Alice", "Bob", 10, TS);
        let b = Transaction::digest("Alice", "Bob", 10, TS);
        assert_eq!(a, b);
        assert_eq!(a.len(), DIGEST_HEX_LEN);
    }

    #[test]
    fn test_digest_changes_with_any_field() {
        let digests: HashSet<String> = [
            Transaction::digest("Alice", "Bob", 10, TS),
            Transaction::digest("Eve", "Bob", 10, TS),
            Transaction::digest("Alice", "Charlie", 10, TS),
            Transaction::digest("Alice", "Bob", 11, TS),
            Transaction::digest("Alice", "Bob", 10, TS + 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(digests.len(), 5);
    }

    #[test]
    fn test_identical_fields_produce_identical_ids() {
        let a = Transaction::with_timestamp("Alice", "Bob", 10, TS);
        let b = Transaction::with_timestamp("Alice", "Bob", 10, TS);
        assert_eq!(a.id, b.id);
        assert_eq!(a, b);
    }

    #[test]
    fn test_new_stamps_current_time() {
        let tx = Transaction::new("Alice", "Bob", 10);
        assert!(tx.timestamp > 0);
        assert_eq!(
            tx.id,
            Transaction::digest(&tx.sender, &tx.receiver, tx.amount, tx.timestamp)
        );
    }
}
