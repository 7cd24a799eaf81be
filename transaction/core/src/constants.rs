// Copyright (c) 2024 Botho Foundation

//! Transaction constants.

/// Domain separator for transaction content hashes.
pub const TX_HASH_DOMAIN_TAG: &[u8] = b"scrooge-tx-hash-v1";

/// Domain separator for per-input signing messages.
pub const SIGNING_DOMAIN_TAG: &[u8] = b"scrooge-tx-sign-v1";
