//! Deterministic block identity
//!
//! A block's id is the SHA-256 hex digest of its decimal height followed by
//! the concatenation of its transaction ids in order. Reordering the
//! transactions yields a different id.

use crate::core::block::Block;
use crate::crypto::sha256_hex;

/// Compute the block id for a height and an ordered list of transaction ids
pub fn compute_id<'a>(height: u64, tx_ids: impl IntoIterator<Item = &'a str>) -> String {
    let mut data = height.to_string();
    for id in tx_ids {
        data.push_str(id);
    }
    sha256_hex(data.as_bytes())
}

/// Recompute a block's id and compare it against the stored one
pub fn verify_id(block: &Block) -> bool {
    let computed = compute_id(block.height, block.transactions.iter().map(|tx| tx.id.as_str()));
    computed == block.id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::Transaction;

    #[test]
    fn test_compute_id_known_digest() {
        // sha256("1tx1tx2")
        assert_eq!(
            compute_id(1, ["tx1", "tx2"]),
            "74a9608142770b46c9eec3f39f41b4fb38d8d7f4063ac5676ccc2ed1d670c92b"
        );
        // sha256("1") for a block with no transactions
        assert_eq!(
            compute_id(1, std::iter::empty::<&str>()),
            "6b86b273ff34fce19d6b804eff5a3f5747ada4eaa22f1d49c01e52ddb7875b4b"
        );
    }

    #[test]
    fn test_compute_id_is_deterministic() {
        assert_eq!(compute_id(7, ["a", "b"]), compute_id(7, ["a", "b"]));
    }

    #[test]
    fn test_compute_id_is_order_sensitive() {
        // sha256("1tx2tx1")
        assert_eq!(
            compute_id(1, ["tx2", "tx1"]),
            "72689ae2637a48e02a801a785e4737625be522f7d49520a7146aecc1f5309c2c"
        );
        assert_ne!(compute_id(1, ["tx1", "tx2"]), compute_id(1, ["tx2", "tx1"]));
    }

    #[test]
    fn test_compute_id_depends_on_height() {
        assert_ne!(compute_id(1, ["tx1"]), compute_id(2, ["tx1"]));
    }

    #[test]
    fn test_verify_id() {
        let mut block = Block::new(1, vec![Transaction::new("tx1", vec![], vec![])]);
        assert!(verify_id(&block));

        block.id = "0".repeat(64);
        assert!(!verify_id(&block));
    }

    #[test]
    fn test_verify_id_detects_reordered_transactions() {
        let mut block = Block::new(
            1,
            vec![Transaction::new("tx1", vec![], vec![]), Transaction::new("tx2", vec![], vec![])],
        );
        block.transactions.swap(0, 1);
        assert!(!verify_id(&block));
    }
}
