// Copyright (c) 2024 Botho Foundation

//! Owner addresses and signature verification for Scrooge transactions.
//!
//! The ledger treats signatures as opaque: it only ever asks a
//! [`SignatureVerifier`] whether `signature` over `message` was produced by
//! the owner of an address. [`Ed25519Verifier`] is the verifier used by
//! nodes, and [`Keypair`] produces signatures it accepts.

#![deny(missing_docs)]

mod address;
mod keypair;
mod verifier;

pub use address::{KeyError, PublicAddress, ADDRESS_LEN};
pub use keypair::Keypair;
pub use verifier::{Ed25519Verifier, SignatureVerifier, SIGNATURE_LEN};
