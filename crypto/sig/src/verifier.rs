// Copyright (c) 2024 Botho Foundation

use crate::PublicAddress;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// Length of an Ed25519 signature in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// Checks that a signature over a message was produced by an address owner.
///
/// Implementations must never panic: malformed keys or signatures are
/// reported as `false`.
pub trait SignatureVerifier {
    /// Returns `true` iff `signature` is a valid signature of `message` by
    /// the owner of `address`.
    fn verify(&self, address: &PublicAddress, message: &[u8], signature: &[u8]) -> bool;
}

impl<V: SignatureVerifier + ?Sized> SignatureVerifier for &V {
    fn verify(&self, address: &PublicAddress, message: &[u8], signature: &[u8]) -> bool {
        (**self).verify(address, message, signature)
    }
}

/// Ed25519 signature verification.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, address: &PublicAddress, message: &[u8], signature: &[u8]) -> bool {
        // Signature must be exactly 64 bytes
        if signature.len() != SIGNATURE_LEN {
            return false;
        }

        let public_key = match VerifyingKey::from_bytes(address.as_bytes()) {
            Ok(pk) => pk,
            Err(_) => return false,
        };

        let signature = match Signature::from_slice(signature) {
            Ok(sig) => sig,
            Err(_) => return false,
        };

        public_key.verify(message, &signature).is_ok()
    }
}
