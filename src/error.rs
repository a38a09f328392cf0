use serde::{Deserialize, Serialize};

/// Errors surfaced by chain operations.
///
/// Every variant is a recoverable, user-facing outcome of a single requested
/// operation. Nothing here aborts the simulation; callers render the message
/// and move on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ChainError {
    #[error("replay blocked: transaction {id} was already processed")]
    DuplicateTransaction { id: String },
    #[error("no pending transactions to mine")]
    EmptyPool,
    #[error("block index {index} is out of range (chain height {height})")]
    InvalidIndex { index: usize, height: usize },
    #[error("block {index} has no transactions to tamper with")]
    NoTransactions { index: usize },
    #[error("block {index} hash mismatch, contents were tampered with")]
    TamperedBlock { index: usize },
    #[error("block {index} does not link to its predecessor's hash")]
    BrokenLink { index: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("could not parse {var}={value}")]
    Parse { var: String, value: String },
}

/// Result type alias for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;
