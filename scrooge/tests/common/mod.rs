// Copyright (c) 2024 Botho Foundation
//
//! Common helpers for settlement integration tests.
//!
//! Builds genesis pools for deterministic test keys and checks the
//! invariants every `handle_batch` result must satisfy, so each test can
//! focus on its own scenario.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use scrooge::{BatchOutcome, HandlerConfig, SelectionPolicy, TxHandler, UtxoPool};
pub use scrooge_transaction_core_test_utils::{
    create_coinbase, create_signed_tx, create_transfer, create_unsigned_tx, test_keypair, Amount,
    Keypair, PublicAddress, Transaction, TxOutput, UtxoId,
};

/// A handler using real Ed25519 signatures and the given policy.
pub fn handler(policy: SelectionPolicy) -> TxHandler {
    TxHandler::new(&HandlerConfig { policy })
}

/// A pool holding one genesis output per `(value, owner)` pair, along with
/// the genesis transaction that created them.
pub fn genesis_pool(outputs: &[(Amount, &Keypair)]) -> (Transaction, UtxoPool) {
    let genesis = create_coinbase(
        &outputs
            .iter()
            .map(|(value, owner)| (*value, owner.address()))
            .collect::<Vec<_>>(),
    );
    let pool = UtxoPool::from_transaction(&genesis);
    (genesis, pool)
}

/// Assert the properties every settlement result must have.
///
/// * every submitted transaction is reported exactly once, either accepted
///   or rejected
/// * no two accepted transactions consume the same output
/// * no accepted transaction creates value
/// * the output pool is the input pool plus everything produced minus
///   everything consumed
/// * replaying the accepted transactions in order is valid at every step
pub fn assert_settlement_invariants(
    handler: &TxHandler,
    original: &UtxoPool,
    submitted: &[Transaction],
    outcome: &BatchOutcome,
) {
    assert_eq!(
        outcome.accepted.len() + outcome.rejected.len(),
        submitted.len(),
        "every transaction is either accepted or rejected"
    );
    for rejected in &outcome.rejected {
        assert_eq!(submitted[rejected.position].hash(), rejected.tx_hash);
    }

    let mut consumed = HashSet::new();
    for tx in &outcome.accepted {
        for utxo in tx.consumed_utxos() {
            assert!(consumed.insert(utxo), "{utxo} consumed twice");
        }
    }

    let mut known: HashMap<UtxoId, TxOutput> = original.iter().map(|(k, v)| (*k, *v)).collect();
    for tx in &outcome.accepted {
        known.extend(tx.produced_utxos().map(|(utxo, output)| (utxo, *output)));
    }
    let mut fees = 0i128;
    for tx in &outcome.accepted {
        let inputs: i128 = tx
            .consumed_utxos()
            .map(|utxo| i128::from(known[&utxo].value))
            .sum();
        assert!(inputs >= tx.total_output_value(), "value created");
        fees += inputs - tx.total_output_value();
    }
    assert_eq!(outcome.total_fees, fees);

    let mut expected = original.copy();
    for tx in &outcome.accepted {
        for (utxo, output) in tx.produced_utxos() {
            expected.add(utxo, *output);
        }
    }
    for utxo in &consumed {
        expected.remove(utxo);
    }
    assert_eq!(outcome.pool, expected);
    assert_eq!(outcome.pool.total_value(), original.total_value() - fees);

    let mut replay = original.copy();
    for tx in &outcome.accepted {
        assert!(handler.is_valid(&replay, tx), "accepted tx invalid on replay");
        replay.apply(tx);
    }
}
