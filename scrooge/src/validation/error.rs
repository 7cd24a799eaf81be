// Copyright (c) 2024 Botho Foundation

use displaydoc::Display;
use scrooge_transaction_core::{Amount, UtxoId};
use serde::{Deserialize, Serialize};

/// Type alias for transaction validation results.
pub type TransactionValidationResult<T> = Result<T, TransactionValidationError>;

/// Reasons why a single transaction may fail to be valid with respect to a
/// pool of unspent outputs.
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum TransactionValidationError {
    /// Input {index} spends {utxo}, which is not in the pool
    InputNotFound {
        /// Position of the offending input.
        index: usize,
        /// The output it tried to spend.
        utxo: UtxoId,
    },

    /// Input {index} spends {utxo}, already claimed by an earlier input
    DuplicateInput {
        /// Position of the offending input.
        index: usize,
        /// The output claimed twice.
        utxo: UtxoId,
    },

    /// Input {0} is not signed
    MissingSignature(usize),

    /// Input {0} is not signed by the owner of the output it spends
    InvalidSignature(usize),

    /// Output {index} has negative value {value}
    NegativeOutputValue {
        /// Position of the offending output.
        index: usize,
        /// Its value.
        value: Amount,
    },

    /// Outputs total {outputs}, more than the {inputs} the inputs provide
    InsufficientInputValue {
        /// Sum of the spent outputs' values.
        inputs: i128,
        /// Sum of the created outputs' values.
        outputs: i128,
    },
}

impl std::error::Error for TransactionValidationError {}
