// Copyright (c) 2024 Botho Foundation

//! The pool of unspent transaction outputs.
//!
//! A [`UtxoPool`] maps every still-spendable output to its value and owner.
//! Removing an entry marks the output spent; adding one marks a newly created
//! output. The pool is a plain value: cloning it yields an independent copy,
//! which is how settlement works on a snapshot without touching the caller's
//! pool.

#![deny(missing_docs)]

use std::collections::{hash_map, HashMap};

use scrooge_transaction_core::{Transaction, TxOutput, UtxoId};

/// Unspent outputs by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UtxoPool {
    utxos: HashMap<UtxoId, TxOutput>,
}

impl UtxoPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool holding every output of `tx`, typically a genesis
    /// coinbase.
    pub fn from_transaction(tx: &Transaction) -> Self {
        tx.produced_utxos()
            .map(|(utxo, output)| (utxo, *output))
            .collect()
    }

    /// Is `utxo` unspent?
    pub fn contains(&self, utxo: &UtxoId) -> bool {
        self.utxos.contains_key(utxo)
    }

    /// The output named by `utxo`, or `None` if it is not in the pool.
    pub fn get(&self, utxo: &UtxoId) -> Option<&TxOutput> {
        self.utxos.get(utxo)
    }

    /// Insert `output` under `utxo`, replacing any previous entry.
    pub fn add(&mut self, utxo: UtxoId, output: TxOutput) {
        self.utxos.insert(utxo, output);
    }

    /// Remove `utxo`, returning its output if it was present.
    pub fn remove(&mut self, utxo: &UtxoId) -> Option<TxOutput> {
        self.utxos.remove(utxo)
    }

    /// An independent copy of this pool.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Spend every UTXO `tx` consumes and add every output it creates.
    ///
    /// No validation happens here; callers apply only validated
    /// transactions.
    pub fn apply(&mut self, tx: &Transaction) {
        for utxo in tx.consumed_utxos() {
            self.utxos.remove(&utxo);
        }
        for (utxo, output) in tx.produced_utxos() {
            self.utxos.insert(utxo, *output);
        }
    }

    /// Number of unspent outputs.
    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    /// True if nothing is spendable.
    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// Iterate over all entries, in no particular order.
    pub fn iter(&self) -> hash_map::Iter<'_, UtxoId, TxOutput> {
        self.utxos.iter()
    }

    /// All unspent ids, sorted.
    pub fn utxo_ids(&self) -> Vec<UtxoId> {
        let mut ids: Vec<UtxoId> = self.utxos.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Sum of every unspent output's value.
    pub fn total_value(&self) -> i128 {
        self.utxos.values().map(|o| o.value as i128).sum()
    }
}

impl FromIterator<(UtxoId, TxOutput)> for UtxoPool {
    fn from_iter<I: IntoIterator<Item = (UtxoId, TxOutput)>>(iter: I) -> Self {
        Self {
            utxos: iter.into_iter().collect(),
        }
    }
}

impl Extend<(UtxoId, TxOutput)> for UtxoPool {
    fn extend<I: IntoIterator<Item = (UtxoId, TxOutput)>>(&mut self, iter: I) {
        self.utxos.extend(iter)
    }
}

impl<'a> IntoIterator for &'a UtxoPool {
    type Item = (&'a UtxoId, &'a TxOutput);
    type IntoIter = hash_map::Iter<'a, UtxoId, TxOutput>;

    fn into_iter(self) -> Self::IntoIter {
        self.utxos.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrooge_transaction_core_test_utils::{create_coinbase, create_transfer, test_keypair};

    fn output(value: i64, id: u8) -> TxOutput {
        TxOutput::new(value, test_keypair(id).address())
    }

    #[test]
    fn test_add_get_remove() {
        let mut pool = UtxoPool::new();
        let utxo = UtxoId::new([1u8; 32], 0);
        assert!(!pool.contains(&utxo));
        assert_eq!(pool.get(&utxo), None);

        pool.add(utxo, output(5, 1));
        assert!(pool.contains(&utxo));
        assert_eq!(pool.get(&utxo).map(|o| o.value), Some(5));

        // Overwrites
        pool.add(utxo, output(7, 1));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(&utxo).map(|o| o.value), Some(7));

        assert_eq!(pool.remove(&utxo).map(|o| o.value), Some(7));
        assert!(pool.is_empty());
        // Removing again is a no-op
        assert_eq!(pool.remove(&utxo), None);
    }

    #[test]
    fn test_copy_is_independent() {
        let utxo = UtxoId::new([1u8; 32], 0);
        let mut original = UtxoPool::new();
        original.add(utxo, output(5, 1));

        let mut copy = original.copy();
        copy.remove(&utxo);
        copy.add(UtxoId::new([2u8; 32], 0), output(3, 2));

        assert!(original.contains(&utxo));
        assert_eq!(original.len(), 1);
        assert!(!copy.contains(&utxo));
        assert_eq!(copy.len(), 1);
    }

    #[test]
    fn test_from_transaction_seeds_every_output() {
        let genesis = create_coinbase(&[
            (10, test_keypair(1).address()),
            (20, test_keypair(2).address()),
        ]);
        let pool = UtxoPool::from_transaction(&genesis);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.total_value(), 30);
        assert_eq!(
            pool.utxo_ids(),
            vec![UtxoId::new(genesis.hash(), 0), UtxoId::new(genesis.hash(), 1)]
        );
    }

    #[test]
    fn test_apply_moves_value() {
        let scrooge = test_keypair(1);
        let alice = test_keypair(2);
        let genesis = create_coinbase(&[(10, scrooge.address())]);
        let mut pool = UtxoPool::from_transaction(&genesis);

        let spent = UtxoId::new(genesis.hash(), 0);
        let tx = create_transfer(spent, &scrooge, 9, alice.address());
        pool.apply(&tx);

        assert!(!pool.contains(&spent));
        let created = UtxoId::new(tx.hash(), 0);
        assert_eq!(pool.get(&created), Some(&TxOutput::new(9, alice.address())));
        assert_eq!(pool.len(), 1);
    }
}
