// Copyright (c) 2024 Botho Foundation

//! Errors that can occur when building a transaction

use displaydoc::Display;
use serde::{Deserialize, Serialize};

/// An error that occurs when modifying a transaction
#[derive(Clone, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
pub enum TxError {
    /// Input index {index} out of range for transaction with {num_inputs} inputs
    InputIndexOutOfRange {
        /// Requested input index.
        index: usize,
        /// Number of inputs in the transaction.
        num_inputs: usize,
    },
}

impl std::error::Error for TxError {}
