//! Block and transaction data model
//!
//! Implements a UTXO-based ledger model: transactions spend previously
//! created outputs and create new ones, blocks carry an ordered list of
//! transactions and a content-derived identity.

use crate::core::identity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A spendable unit created by a transaction at a specific output index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    /// Owner's address
    pub address: String,
    /// Amount of value carried by this output
    pub value: u64,
}

impl Output {
    /// Check if this output belongs to the given address
    pub fn is_owned_by(&self, address: &str) -> bool {
        self.address == address
    }
}

/// Reference to one output within the ledger history
///
/// Used both as the UTXO map key and as the shape of a transaction input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputRef {
    /// Id of the transaction that created the output
    pub tx_id: String,
    /// Index of the output within that transaction
    pub output_index: u32,
}

impl OutputRef {
    pub fn new(tx_id: impl Into<String>, output_index: u32) -> Self {
        Self {
            tx_id: tx_id.into(),
            output_index,
        }
    }
}

impl fmt::Display for OutputRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tx_id, self.output_index)
    }
}

/// A ledger transaction
///
/// A transaction with inputs moves value and must conserve it exactly; a
/// transaction without inputs creates value (genesis-style).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction id
    pub id: String,
    /// References to the outputs being spent
    pub inputs: Vec<OutputRef>,
    /// Outputs created by this transaction
    pub outputs: Vec<Output>,
}

impl Transaction {
    pub fn new(id: impl Into<String>, inputs: Vec<OutputRef>, outputs: Vec<Output>) -> Self {
        Self {
            id: id.into(),
            inputs,
            outputs,
        }
    }

    /// Get total output value
    pub fn total_output(&self) -> u64 {
        self.outputs.iter().map(|o| o.value).sum()
    }

    /// Check if this transaction creates value rather than moving it
    pub fn is_value_creating(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// A block in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Content-derived block id (sha-256 hex digest)
    pub id: String,
    /// Block height, contiguous from 1
    pub height: u64,
    /// Ordered list of transactions
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Create a block with its id computed from height and transaction ids
    pub fn new(height: u64, transactions: Vec<Transaction>) -> Self {
        let id = identity::compute_id(height, transactions.iter().map(|tx| tx.id.as_str()));
        Self {
            id,
            height,
            transactions,
        }
    }

    /// Create a block with an explicit id, as received over the wire
    pub fn with_id(id: impl Into<String>, height: u64, transactions: Vec<Transaction>) -> Self {
        Self {
            id: id.into(),
            height,
            transactions,
        }
    }

    /// Get number of transactions in this block
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_ref_display() {
        let output_ref = OutputRef::new("tx1", 3);
        assert_eq!(output_ref.to_string(), "tx1:3");
    }

    #[test]
    fn test_total_output() {
        let tx = Transaction::new(
            "tx1",
            vec![],
            vec![
                Output {
                    address: "addr1".to_string(),
                    value: 50,
                },
                Output {
                    address: "addr2".to_string(),
                    value: 25,
                },
            ],
        );
        assert_eq!(tx.total_output(), 75);
        assert!(tx.is_value_creating());
    }

    #[test]
    fn test_block_new_computes_id() {
        let block = Block::new(
            1,
            vec![Transaction::new("tx1", vec![], vec![]), Transaction::new("tx2", vec![], vec![])],
        );
        assert!(identity::verify_id(&block));
    }

    #[test]
    fn test_block_serde_round_trip() {
        let block = Block::new(
            2,
            vec![Transaction::new(
                "tx3",
                vec![OutputRef::new("tx1", 0)],
                vec![Output {
                    address: "addr1".to_string(),
                    value: 10,
                }],
            )],
        );

        let json = serde_json::to_string(&block).unwrap();
        let decoded: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(block, decoded);
    }

    #[test]
    fn test_negative_value_fails_deserialization() {
        let json = r#"{"address":"addr1","value":-5}"#;
        assert!(serde_json::from_str::<Output>(json).is_err());
    }
}
