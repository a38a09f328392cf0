//! EduChain — an educational proof-of-work blockchain simulation.
//!
//! Transactions are pooled, batched into blocks, mined by a brute-force
//! nonce search, and chained by hash linkage. The chain enforces replay
//! protection over a processed-id ledger and re-targets its difficulty from
//! the most recent mining time.
//!
//! The crate is a single-process, single-actor state machine: no networking,
//! no persistence, no real signing. One owned [`Blockchain`] value carries a
//! session; discarding it and constructing a fresh one is a reset.

pub mod config;
pub mod core;
pub mod crypto;
pub mod error;
pub mod utils;

pub use crate::config::ChainConfig;
pub use crate::core::{Block, Blockchain, MineReceipt, Transaction};
pub use crate::error::{ChainError, Result};
