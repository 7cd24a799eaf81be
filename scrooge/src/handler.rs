// Copyright (c) 2024 Botho Foundation

//! Batch settlement.
//!
//! [`TxHandler::handle_batch`] takes a pool snapshot and an unordered batch
//! of proposed transactions and returns a mutually consistent subset of them
//! together with the pool that results from applying exactly that subset.
//!
//! Each transaction moves through `Undecided -> {Accepted, Rejected}` once
//! per call. Transactions that spend outputs created by other transactions of
//! the same batch are retried after every commit, so the order in which a
//! dependency chain is submitted does not matter. Settlement stops at the
//! first pass that commits nothing; since every other pass commits at least
//! one transaction, a batch of `n` transactions needs at most `n + 1` passes.

use std::collections::HashSet;

use displaydoc::Display;
use scrooge_crypto_sig::{Ed25519Verifier, SignatureVerifier};
use scrooge_ledger_pool::UtxoPool;
use scrooge_transaction_core::{Transaction, TxHash};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::{
    config::HandlerConfig,
    validation::{self, TransactionValidationError, TransactionValidationResult},
};

/// How conflicting valid transactions are chosen between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Walk the batch in submission order and commit every transaction that
    /// is valid against the pool as left by earlier commits.
    FirstSeen,
    /// Repeatedly commit the valid transaction paying the highest fee;
    /// equal fees go to the one submitted first.
    MaxFee,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::FirstSeen
    }
}

/// Why a transaction was left out of a batch.
#[derive(Clone, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
pub enum RejectionReason {
    /// {0}
    Invalid(TransactionValidationError),
    /// Transaction was already accepted earlier in this batch
    DuplicateTransaction,
}

impl std::error::Error for RejectionReason {}

/// A transaction that was not accepted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RejectedTx {
    /// Position in the submitted batch.
    pub position: usize,
    /// Hash of the rejected transaction.
    pub tx_hash: TxHash,
    /// Outcome of its last validation against the working pool.
    pub reason: RejectionReason,
}

/// The result of settling one batch.
#[derive(Clone, Debug)]
pub struct BatchOutcome {
    /// Accepted transactions, in the order they were committed.
    pub accepted: Vec<Transaction>,
    /// The input pool with exactly the accepted transactions applied.
    pub pool: UtxoPool,
    /// Transactions left out, in submission order.
    pub rejected: Vec<RejectedTx>,
    /// Sum of the fees left by the accepted transactions.
    pub total_fees: i128,
}

impl BatchOutcome {
    /// Split into the accepted transactions and the new pool.
    pub fn into_parts(self) -> (Vec<Transaction>, UtxoPool) {
        (self.accepted, self.pool)
    }
}

/// Validates transactions and settles batches of them.
///
/// The handler holds no ledger state: every call takes a pool snapshot and
/// hands back a new one, leaving the caller's pool untouched.
#[derive(Clone, Debug)]
pub struct TxHandler<V = Ed25519Verifier> {
    verifier: V,
    policy: SelectionPolicy,
}

impl TxHandler<Ed25519Verifier> {
    /// Create a handler that checks Ed25519 signatures.
    pub fn new(config: &HandlerConfig) -> Self {
        Self::with_verifier(Ed25519Verifier, config)
    }
}

impl Default for TxHandler<Ed25519Verifier> {
    fn default() -> Self {
        Self::new(&HandlerConfig::default())
    }
}

impl<V: SignatureVerifier> TxHandler<V> {
    /// Create a handler using `verifier` for input signatures.
    pub fn with_verifier(verifier: V, config: &HandlerConfig) -> Self {
        Self {
            verifier,
            policy: config.policy,
        }
    }

    /// The conflict resolution policy in use.
    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Validate `tx` against `pool`, returning its fee.
    pub fn validate(&self, pool: &UtxoPool, tx: &Transaction) -> TransactionValidationResult<i128> {
        validation::validate(pool, tx, &self.verifier)
    }

    /// Is `tx` valid against `pool`?
    pub fn is_valid(&self, pool: &UtxoPool, tx: &Transaction) -> bool {
        validation::is_valid(pool, tx, &self.verifier)
    }

    /// Settle `txs` against `pool`.
    ///
    /// Returns a conflict-free subset of `txs`, in commit order, and the pool
    /// that results from applying it to `pool`. `pool` itself is not
    /// modified.
    pub fn handle_batch(&self, pool: &UtxoPool, txs: &[Transaction]) -> BatchOutcome {
        let mut settlement = Settlement::new(pool, txs);

        let passes = match self.policy {
            SelectionPolicy::FirstSeen => self.settle_first_seen(&mut settlement),
            SelectionPolicy::MaxFee => self.settle_max_fee(&mut settlement),
        };

        let outcome = settlement.finish();
        info!(
            policy = ?self.policy,
            submitted = txs.len(),
            accepted = outcome.accepted.len(),
            rejected = outcome.rejected.len(),
            passes,
            total_fees = %outcome.total_fees,
            "Settled transaction batch"
        );
        outcome
    }

    /// Commit every valid transaction in submission order, and repeat until
    /// a pass commits nothing. Returns the number of passes.
    fn settle_first_seen(&self, settlement: &mut Settlement<'_>) -> usize {
        let mut passes = 0;
        loop {
            passes += 1;
            let mut committed = 0;
            for position in 0..settlement.txs.len() {
                if !settlement.is_undecided(position) {
                    continue;
                }
                if let Some(fee) = settlement.evaluate(position, &self.verifier) {
                    settlement.commit(position, fee);
                    committed += 1;
                }
            }
            trace!(pass = passes, committed, "Settlement pass complete");
            if committed == 0 {
                return passes;
            }
        }
    }

    /// Commit the highest-fee valid transaction, one per round, until none
    /// is valid. Returns the number of rounds.
    fn settle_max_fee(&self, settlement: &mut Settlement<'_>) -> usize {
        let mut rounds = 0;
        loop {
            rounds += 1;
            let mut best: Option<(usize, i128)> = None;
            for position in 0..settlement.txs.len() {
                if !settlement.is_undecided(position) {
                    continue;
                }
                if let Some(fee) = settlement.evaluate(position, &self.verifier) {
                    // Strictly greater, so the earliest submission wins ties
                    if best.map_or(true, |(_, best_fee)| fee > best_fee) {
                        best = Some((position, fee));
                    }
                }
            }
            match best {
                Some((position, fee)) => {
                    trace!(round = rounds, position, fee = %fee, "Selected highest fee");
                    settlement.commit(position, fee);
                }
                None => return rounds,
            }
        }
    }
}

/// Where a transaction stands within one call.
#[derive(Clone, Debug)]
enum TxState {
    /// Not looked at yet.
    Undecided,
    /// Invalid against the working pool as of its last evaluation; retried
    /// on the next pass.
    Failed(RejectionReason),
    Accepted,
    /// Never retried.
    Rejected(RejectionReason),
}

/// Working state of one `handle_batch` call.
struct Settlement<'a> {
    txs: &'a [Transaction],
    pool: UtxoPool,
    states: Vec<TxState>,
    committed: Vec<usize>,
    accepted_hashes: HashSet<TxHash>,
    total_fees: i128,
}

impl<'a> Settlement<'a> {
    fn new(pool: &UtxoPool, txs: &'a [Transaction]) -> Self {
        Self {
            txs,
            pool: pool.copy(),
            states: vec![TxState::Undecided; txs.len()],
            committed: Vec::new(),
            accepted_hashes: HashSet::new(),
            total_fees: 0,
        }
    }

    fn is_undecided(&self, position: usize) -> bool {
        matches!(
            self.states[position],
            TxState::Undecided | TxState::Failed(_)
        )
    }

    /// Validate the transaction at `position` against the working pool,
    /// recording why it failed if it did.
    fn evaluate<V: SignatureVerifier>(&mut self, position: usize, verifier: &V) -> Option<i128> {
        let tx = &self.txs[position];

        if self.accepted_hashes.contains(&tx.hash()) {
            debug!(
                tx = %hex::encode(&tx.hash()[0..8]),
                position,
                "Rejecting duplicate of an accepted transaction"
            );
            self.states[position] = TxState::Rejected(RejectionReason::DuplicateTransaction);
            return None;
        }

        match validation::validate(&self.pool, tx, verifier) {
            Ok(fee) => Some(fee),
            Err(err) => {
                trace!(
                    tx = %hex::encode(&tx.hash()[0..8]),
                    position,
                    error = %err,
                    "Transaction not valid against working pool"
                );
                self.states[position] = TxState::Failed(RejectionReason::Invalid(err));
                None
            }
        }
    }

    /// Accept the transaction at `position`, which must have just validated.
    fn commit(&mut self, position: usize, fee: i128) {
        let tx = &self.txs[position];
        self.pool.apply(tx);
        self.accepted_hashes.insert(tx.hash());
        self.states[position] = TxState::Accepted;
        self.committed.push(position);
        self.total_fees += fee;

        debug!(
            tx = %hex::encode(&tx.hash()[0..8]),
            position,
            inputs = tx.num_inputs(),
            outputs = tx.num_outputs(),
            fee = %fee,
            "Accepted transaction"
        );
    }

    fn finish(self) -> BatchOutcome {
        let txs = self.txs;
        let rejected = self
            .states
            .into_iter()
            .enumerate()
            .filter_map(|(position, state)| match state {
                TxState::Failed(reason) | TxState::Rejected(reason) => Some(RejectedTx {
                    position,
                    tx_hash: txs[position].hash(),
                    reason,
                }),
                TxState::Accepted | TxState::Undecided => None,
            })
            .collect();

        BatchOutcome {
            accepted: self.committed.iter().map(|&i| txs[i].clone()).collect(),
            pool: self.pool,
            rejected,
            total_fees: self.total_fees,
        }
    }
}
