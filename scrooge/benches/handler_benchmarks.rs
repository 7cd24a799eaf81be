// Copyright (c) 2024 Botho Foundation

//! Benchmarks for transaction validation and batch settlement.
//!
//! Run with: cargo bench -p scrooge --bench handler_benchmarks
//!
//! These benchmarks measure:
//! - single transaction validation against a pool
//! - settlement of independent transfers
//! - settlement of a dependency chain submitted in reverse, the worst case
//!   for the number of passes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand_core::OsRng;

use scrooge::{HandlerConfig, SelectionPolicy, Transaction, TxHandler, UtxoPool};
use scrooge_transaction_core_test_utils::{create_coinbase, create_transfer, Keypair, UtxoId};

/// A pool of `count` outputs, one per fresh key, and a transfer spending each.
fn independent_transfers(count: usize) -> (UtxoPool, Vec<Transaction>) {
    let keys: Vec<Keypair> = (0..count).map(|_| Keypair::generate(&mut OsRng)).collect();
    let genesis = create_coinbase(&keys.iter().map(|k| (1_000, k.address())).collect::<Vec<_>>());
    let pool = UtxoPool::from_transaction(&genesis);

    let txs = keys
        .iter()
        .enumerate()
        .map(|(i, key)| {
            let recipient = keys[(i + 1) % count].address();
            create_transfer(UtxoId::new(genesis.hash(), i as u32), key, 999, recipient)
        })
        .collect();
    (pool, txs)
}

/// A chain of `length` transfers between fresh keys, each spending the
/// previous one's output, returned last link first.
fn reversed_chain(length: usize) -> (UtxoPool, Vec<Transaction>) {
    let keys: Vec<Keypair> = (0..=length).map(|_| Keypair::generate(&mut OsRng)).collect();
    let genesis = create_coinbase(&[(1_000_000, keys[0].address())]);
    let pool = UtxoPool::from_transaction(&genesis);

    let mut utxo = UtxoId::new(genesis.hash(), 0);
    let mut txs = Vec::with_capacity(length);
    for i in 0..length {
        let tx = create_transfer(utxo, &keys[i], 1_000_000 - i as i64 - 1, keys[i + 1].address());
        utxo = UtxoId::new(tx.hash(), 0);
        txs.push(tx);
    }
    txs.reverse();
    (pool, txs)
}

fn handler(policy: SelectionPolicy) -> TxHandler {
    TxHandler::new(&HandlerConfig { policy })
}

/// Benchmark validating one transfer
fn bench_validate(c: &mut Criterion) {
    let (pool, txs) = independent_transfers(1);
    let handler = handler(SelectionPolicy::FirstSeen);

    c.bench_function("TxHandler validate", |b| {
        b.iter(|| black_box(handler.validate(&pool, &txs[0])))
    });
}

/// Benchmark settling batches of non-conflicting transfers
fn bench_independent_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("TxHandler handle_batch independent");

    for size in [10usize, 100, 500] {
        let (pool, txs) = independent_transfers(size);
        for policy in [SelectionPolicy::FirstSeen, SelectionPolicy::MaxFee] {
            let handler = handler(policy);
            group.bench_with_input(
                BenchmarkId::new(format!("{policy:?}"), size),
                &txs,
                |b, txs| b.iter(|| black_box(handler.handle_batch(&pool, txs))),
            );
        }
    }

    group.finish();
}

/// Benchmark settling a chain that needs one pass per link
fn bench_reversed_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("TxHandler handle_batch reversed chain");

    for length in [10usize, 50] {
        let (pool, txs) = reversed_chain(length);
        let handler = handler(SelectionPolicy::FirstSeen);
        group.bench_with_input(BenchmarkId::new("FirstSeen", length), &txs, |b, txs| {
            b.iter(|| black_box(handler.handle_batch(&pool, txs)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_validate,
    bench_independent_batch,
    bench_reversed_chain
);
criterion_main!(benches);
