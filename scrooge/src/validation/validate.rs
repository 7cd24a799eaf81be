// Copyright (c) 2024 Botho Foundation

//! Transaction validation.

use std::collections::HashSet;

use scrooge_crypto_sig::SignatureVerifier;
use scrooge_ledger_pool::UtxoPool;
use scrooge_transaction_core::Transaction;

use super::error::{TransactionValidationError, TransactionValidationResult};

/// Determines if the transaction is valid with respect to `pool`, returning
/// the fee it leaves behind.
///
/// A transaction is valid iff
/// * every input spends an output present in `pool`,
/// * every input carries a signature by that output's owner over the input's
///   signing message,
/// * no output is spent by more than one input,
/// * every output value is non-negative, and
/// * the spent outputs are worth at least as much as the created ones.
///
/// Transactions without inputs are held to the same rules: they are only
/// valid if they create no value.
pub fn validate<V: SignatureVerifier>(
    pool: &UtxoPool,
    tx: &Transaction,
    verifier: &V,
) -> TransactionValidationResult<i128> {
    validate_output_values_are_non_negative(tx)?;

    let input_value = validate_inputs(pool, tx, verifier)?;

    validate_value_is_conserved(input_value, tx)
}

/// Boolean form of [`validate`].
pub fn is_valid<V: SignatureVerifier>(pool: &UtxoPool, tx: &Transaction, verifier: &V) -> bool {
    validate(pool, tx, verifier).is_ok()
}

/// Every input must spend a distinct output from `pool` and be signed by its
/// owner. Returns the total value spent.
///
/// Inputs are checked in order and checking stops at the first bad input, so
/// no signature after it is verified.
pub fn validate_inputs<V: SignatureVerifier>(
    pool: &UtxoPool,
    tx: &Transaction,
    verifier: &V,
) -> TransactionValidationResult<i128> {
    let mut claimed = HashSet::with_capacity(tx.num_inputs());
    let mut input_value: i128 = 0;

    for (index, input) in tx.inputs().iter().enumerate() {
        let utxo = input.utxo_id();

        let output = pool
            .get(&utxo)
            .ok_or(TransactionValidationError::InputNotFound { index, utxo })?;

        if !claimed.insert(utxo) {
            return Err(TransactionValidationError::DuplicateInput { index, utxo });
        }

        let signature = input
            .signature
            .as_deref()
            .ok_or(TransactionValidationError::MissingSignature(index))?;

        if !verifier.verify(&output.address, &tx.signing_message(index), signature) {
            return Err(TransactionValidationError::InvalidSignature(index));
        }

        input_value += output.value as i128;
    }

    Ok(input_value)
}

/// Zero-valued outputs are allowed, negative ones are not.
pub fn validate_output_values_are_non_negative(
    tx: &Transaction,
) -> TransactionValidationResult<()> {
    match tx
        .outputs()
        .iter()
        .enumerate()
        .find(|(_, output)| output.value < 0)
    {
        Some((index, output)) => Err(TransactionValidationError::NegativeOutputValue {
            index,
            value: output.value,
        }),
        None => Ok(()),
    }
}

/// The outputs may not be worth more than `input_value`. Returns the fee.
pub fn validate_value_is_conserved(
    input_value: i128,
    tx: &Transaction,
) -> TransactionValidationResult<i128> {
    let output_value = tx.total_output_value();
    if input_value < output_value {
        return Err(TransactionValidationError::InsufficientInputValue {
            inputs: input_value,
            outputs: output_value,
        });
    }
    Ok(input_value - output_value)
}
