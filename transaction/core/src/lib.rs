// Copyright (c) 2024 Botho Foundation

//! Scrooge transaction data types.
//!
//! A [`Transaction`] consumes previously created outputs through its
//! [`TxInput`]s and creates new [`TxOutput`]s. Every output is named by a
//! [`UtxoId`]: the hash of the transaction that created it and its position
//! in that transaction's output list.

#![deny(missing_docs)]

pub mod constants;
pub mod tx;
mod tx_error;

pub use constants::{SIGNING_DOMAIN_TAG, TX_HASH_DOMAIN_TAG};
pub use scrooge_crypto_sig::{Keypair, PublicAddress};
pub use tx::{Amount, Transaction, TxHash, TxInput, TxOutput, UtxoId};
pub use tx_error::TxError;
