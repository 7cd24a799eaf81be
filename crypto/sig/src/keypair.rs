// Copyright (c) 2024 Botho Foundation

use crate::PublicAddress;
use ed25519_dalek::{Signer, SigningKey};
use rand_core::{CryptoRng, RngCore};

/// An Ed25519 signing key together with the address it controls.
///
/// Key management belongs to wallets; this type exists so that hosts and
/// tests can produce signatures the ledger accepts.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Derive a keypair from a 32-byte secret seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Generate a fresh keypair.
    pub fn generate<R: CryptoRng + RngCore>(csprng: &mut R) -> Self {
        Self {
            signing_key: SigningKey::generate(csprng),
        }
    }

    /// The address owned by this keypair.
    pub fn address(&self) -> PublicAddress {
        PublicAddress::from_bytes(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message, returning the 64 signature bytes.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.signing_key.sign(message).to_bytes().to_vec()
    }
}

impl core::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Keypair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
