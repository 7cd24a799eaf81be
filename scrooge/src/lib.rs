// Copyright (c) 2024 Botho Foundation

//! Scrooge ledger engine.
//!
//! Validates transactions against a pool of unspent outputs and settles
//! unordered batches of them into a conflict-free accepted set plus the
//! resulting pool.

#![deny(clippy::print_stdout)]

pub mod config;
pub mod handler;
pub mod telemetry;
pub mod validation;

pub use crate::{
    config::{Config, HandlerConfig, LoggingConfig},
    handler::{BatchOutcome, RejectedTx, RejectionReason, SelectionPolicy, TxHandler},
    validation::{TransactionValidationError, TransactionValidationResult},
};
pub use scrooge_crypto_sig::{Ed25519Verifier, PublicAddress, SignatureVerifier};
pub use scrooge_ledger_pool::UtxoPool;
pub use scrooge_transaction_core::{Amount, Transaction, TxHash, TxInput, TxOutput, UtxoId};
