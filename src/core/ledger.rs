//! Ledger engine
//!
//! The single source of truth for chain state. Owns the committed chain,
//! the derived UTXO index and the durable block store, and funnels every
//! mutation through one validate-apply-commit sequence.

use crate::core::balance::BalanceResolver;
use crate::core::block::Block;
use crate::core::utxo::{UtxoError, UtxoIndex};
use crate::core::validator::BlockValidator;
use crate::storage::{BlockStore, StoreError};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Maximum number of blocks a single rollback may unwind
pub const MAX_ROLLBACK_DEPTH: u64 = 2000;

/// Ledger-level errors
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid height: expected {expected}, got {got}")]
    InvalidHeight { expected: u64, got: u64 },
    #[error("Block id does not match its contents: {0}")]
    InvalidBlockId(String),
    #[error("Duplicate block id: {0}")]
    DuplicateBlockId(String),
    #[error(transparent)]
    Utxo(#[from] UtxoError),
    #[error("Rollback target height must be at least 1, got {0}")]
    HeightTooLow(u64),
    #[error("Rollback distance {distance} exceeds maximum of {limit} blocks")]
    RollbackLimitExceeded { distance: u64, limit: u64 },
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result of a successful rollback
#[derive(Debug, Clone, Serialize)]
pub struct RollbackSummary {
    /// Tip height after truncation
    pub tip_height: u64,
    /// Recomputed balances, grouped by address
    pub balances: BTreeMap<String, u64>,
}

/// Chain statistics
#[derive(Debug, Clone, Serialize)]
pub struct ChainStats {
    pub tip_height: u64,
    pub total_blocks: u64,
    pub total_transactions: u64,
    pub utxo_count: u64,
}

/// The ledger engine
///
/// Mutations (`submit_block`, `rollback_to`) must be externally serialized;
/// the API layer does this by holding the engine behind a write lock.
pub struct LedgerEngine {
    /// The committed chain, ascending by height
    chain: Vec<Block>,
    /// Live outputs derived from the chain
    utxos: UtxoIndex,
    /// Ids of every committed block
    known_ids: HashSet<String>,
    /// Durable block rows, absent for in-memory engines
    store: Option<Arc<BlockStore>>,
}

impl LedgerEngine {
    /// Create an empty in-memory engine
    pub fn new() -> Self {
        Self {
            chain: Vec::new(),
            utxos: UtxoIndex::new(),
            known_ids: HashSet::new(),
            store: None,
        }
    }

    /// Open an engine backed by a block store, replaying the stored rows
    ///
    /// Every row passes the same checks as a freshly submitted block; a row
    /// that fails means the store is corrupt and the engine refuses to
    /// start.
    pub fn open(store: Arc<BlockStore>) -> Result<Self, LedgerError> {
        let rows = store.list_block_rows()?;
        let mut engine = Self::new();
        for block in rows {
            BlockValidator::check(&block, engine.tip_height(), &engine.known_ids)?;
            engine.utxos.apply(&block)?;
            engine.known_ids.insert(block.id.clone());
            engine.chain.push(block);
        }
        engine.store = Some(store);
        log::info!(
            "ledger opened: {} blocks, {} live outputs",
            engine.chain.len(),
            engine.utxos.len()
        );
        Ok(engine)
    }

    /// Height of the tip block, 0 when the chain is empty
    pub fn tip_height(&self) -> u64 {
        self.chain.last().map(|block| block.height).unwrap_or(0)
    }

    /// The committed chain
    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    /// Get a committed block by height
    pub fn block_at(&self, height: u64) -> Option<&Block> {
        // Heights are contiguous from 1
        self.chain.get(height.checked_sub(1)? as usize)
    }

    /// The current UTXO index
    pub fn utxos(&self) -> &UtxoIndex {
        &self.utxos
    }

    /// Validate and append a candidate block
    ///
    /// Returns the new tip height. On any rejection the chain, the UTXO
    /// index and the store are left exactly as they were.
    pub fn submit_block(&mut self, block: Block) -> Result<u64, LedgerError> {
        BlockValidator::check(&block, self.tip_height(), &self.known_ids)?;

        // Stage the UTXO mutation; only a fully valid block may touch
        // durable state
        let mut staged = self.utxos.clone();
        staged.apply(&block)?;

        if let Some(store) = &self.store {
            store.append_block_row(&block)?;
        }

        self.utxos = staged;
        self.known_ids.insert(block.id.clone());
        self.chain.push(block);

        let tip = self.tip_height();
        log::info!("committed block at height {}", tip);
        Ok(tip)
    }

    /// Total unspent value owned by an address
    pub fn get_balance(&self, address: &str) -> u64 {
        BalanceResolver::new(&self.utxos).balance_of(address)
    }

    /// Truncate the chain to `target_height` and recompute the UTXO index
    ///
    /// Rolling back to the current tip (or above it) is a legal no-op that
    /// returns the unchanged state.
    pub fn rollback_to(&mut self, target_height: u64) -> Result<RollbackSummary, LedgerError> {
        if target_height < 1 {
            return Err(LedgerError::HeightTooLow(target_height));
        }

        let tip = self.tip_height();
        let distance = tip.saturating_sub(target_height);
        if distance > MAX_ROLLBACK_DEPTH {
            return Err(LedgerError::RollbackLimitExceeded {
                distance,
                limit: MAX_ROLLBACK_DEPTH,
            });
        }

        if target_height < tip {
            let retained: Vec<Block> = self
                .chain
                .iter()
                .filter(|block| block.height <= target_height)
                .cloned()
                .collect();
            let rebuilt = UtxoIndex::rebuild_from(&retained)?;

            if let Some(store) = &self.store {
                store.truncate_rows(target_height)?;
            }

            self.known_ids = retained.iter().map(|block| block.id.clone()).collect();
            self.chain = retained;
            self.utxos = rebuilt;
            log::info!("rolled back to height {}", self.tip_height());
        }

        Ok(RollbackSummary {
            tip_height: self.tip_height(),
            balances: BalanceResolver::new(&self.utxos).all_balances(),
        })
    }

    /// Chain statistics
    pub fn stats(&self) -> ChainStats {
        let total_transactions: usize = self.chain.iter().map(|block| block.tx_count()).sum();
        ChainStats {
            tip_height: self.tip_height(),
            total_blocks: self.chain.len() as u64,
            total_transactions: total_transactions as u64,
            utxo_count: self.utxos.len() as u64,
        }
    }
}

impl Default for LedgerEngine {
    fn default() -> Self {
        Self::new()
    }
}
