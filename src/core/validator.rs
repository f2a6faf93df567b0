//! Pre-admission block validation
//!
//! Stateless checks run against the current chain tip before a candidate
//! block is allowed anywhere near the UTXO index.

use crate::core::block::Block;
use crate::core::identity;
use crate::core::ledger::LedgerError;
use std::collections::HashSet;

/// Rule engine for candidate blocks
pub struct BlockValidator;

impl BlockValidator {
    /// Check a candidate against the tip height and the committed block ids
    ///
    /// `tip_height` is 0 for an empty chain, so the first block must carry
    /// height 1. Checks run in order: height, identity, uniqueness; the
    /// first failure is returned.
    pub fn check(
        candidate: &Block,
        tip_height: u64,
        known_ids: &HashSet<String>,
    ) -> Result<(), LedgerError> {
        let expected = tip_height + 1;
        if candidate.height != expected {
            return Err(LedgerError::InvalidHeight {
                expected,
                got: candidate.height,
            });
        }

        if !identity::verify_id(candidate) {
            return Err(LedgerError::InvalidBlockId(candidate.id.clone()));
        }

        if known_ids.contains(&candidate.id) {
            return Err(LedgerError::DuplicateBlockId(candidate.id.clone()));
        }

        Ok(())
    }
}
