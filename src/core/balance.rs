//! Balance queries
//!
//! Read-only projection over a [`UtxoIndex`] snapshot.

use crate::core::utxo::UtxoIndex;
use std::collections::BTreeMap;

/// Answers "total unspent value owned by address X"
pub struct BalanceResolver<'a> {
    index: &'a UtxoIndex,
}

impl<'a> BalanceResolver<'a> {
    pub fn new(index: &'a UtxoIndex) -> Self {
        Self { index }
    }

    /// Total unspent value owned by an address; 0 for unknown addresses
    pub fn balance_of(&self, address: &str) -> u64 {
        self.index.balance_of(address)
    }

    /// Number of live outputs owned by an address
    pub fn utxo_count(&self, address: &str) -> usize {
        self.index.refs_for_address(address).count()
    }

    /// All balances, grouped by address
    pub fn all_balances(&self) -> BTreeMap<String, u64> {
        let mut balances = BTreeMap::new();
        for (_, output) in self.index.iter() {
            *balances.entry(output.address.clone()).or_insert(0) += output.value;
        }
        balances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::{Block, Output, Transaction};

    fn populated_index() -> UtxoIndex {
        let block = Block::new(
            1,
            vec![Transaction::new(
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
                    Output {
                        address: "addr1".to_string(),
                        value: 75,
                    },
                ],
            )],
        );
        UtxoIndex::rebuild_from(&[block]).unwrap()
    }

    #[test]
    fn test_balance_of() {
        let index = populated_index();
        let resolver = BalanceResolver::new(&index);

        assert_eq!(resolver.balance_of("addr1"), 125);
        assert_eq!(resolver.balance_of("addr2"), 25);
        assert_eq!(resolver.balance_of("addr3"), 0);
    }

    #[test]
    fn test_utxo_count() {
        let index = populated_index();
        let resolver = BalanceResolver::new(&index);

        assert_eq!(resolver.utxo_count("addr1"), 2);
        assert_eq!(resolver.utxo_count("addr3"), 0);
    }

    #[test]
    fn test_all_balances_groups_by_address() {
        let index = populated_index();
        let balances = BalanceResolver::new(&index).all_balances();

        assert_eq!(balances.len(), 2);
        assert_eq!(balances["addr1"], 125);
        assert_eq!(balances["addr2"], 25);
    }
}
