//! UTXO Ledger: a block validation and balance tracking engine in Rust
//!
//! This crate provides a complete ledger service featuring:
//! - Deterministic block identity (SHA-256 over height and transaction ids)
//! - UTXO-based transaction model with strict value conservation
//! - Atomic per-block validation (a block fully applies or not at all)
//! - Balance queries backed by an address index
//! - Bounded rollback with recomputed balances
//! - JSON block-row persistence
//! - REST API for block submission, balance queries and rollback
//!
//! # Example
//!
//! ```rust
//! use utxo_ledger::core::{Block, LedgerEngine, Output, Transaction};
//!
//! // Create an in-memory ledger
//! let mut engine = LedgerEngine::new();
//!
//! // Submit a genesis block creating 100 coins for addr1
//! let genesis = Block::new(
//!     1,
//!     vec![Transaction::new(
//!         "tx1",
//!         vec![],
//!         vec![Output {
//!             address: "addr1".to_string(),
//!             value: 100,
//!         }],
//!     )],
//! );
//! let tip = engine.submit_block(genesis).unwrap();
//! assert_eq!(tip, 1);
//!
//! // Check balance
//! assert_eq!(engine.get_balance("addr1"), 100);
//! ```

pub mod api;
pub mod core;
pub mod crypto;
pub mod storage;

// Re-export commonly used types
pub use api::{create_router, ApiState};
pub use core::{
    BalanceResolver, Block, BlockValidator, ChainStats, LedgerEngine, LedgerError, Output,
    OutputRef, RollbackSummary, Transaction, UtxoError, UtxoIndex, MAX_ROLLBACK_DEPTH,
};
pub use storage::{BlockStore, StoreConfig, StoreError};
