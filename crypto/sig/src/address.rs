// Copyright (c) 2024 Botho Foundation

use core::{fmt, str::FromStr};
use displaydoc::Display;
use serde::{Deserialize, Serialize};

/// Length of an encoded address in bytes.
pub const ADDRESS_LEN: usize = 32;

/// An error that occurs when parsing an address
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum KeyError {
    /// Address must be 32 bytes, got {0}
    LengthMismatch(usize),
    /// Address is not valid hex: {0}
    InvalidHex(String),
}

impl std::error::Error for KeyError {}

/// The identity that owns an output.
///
/// This is the compressed Ed25519 verifying key of the owner. It is only
/// decompressed when a signature is checked, so an address that is not a
/// valid curve point simply never verifies.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicAddress([u8; ADDRESS_LEN]);

impl PublicAddress {
    /// Wrap raw address bytes.
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw address bytes.
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Short hex prefix for log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[0..4])
    }
}

impl From<[u8; ADDRESS_LEN]> for PublicAddress {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for PublicAddress {
    type Error = KeyError;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; ADDRESS_LEN] = src
            .try_into()
            .map_err(|_| KeyError::LengthMismatch(src.len()))?;
        Ok(Self(bytes))
    }
}

impl FromStr for PublicAddress {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| KeyError::InvalidHex(e.to_string()))?;
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::Display for PublicAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for PublicAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicAddress({})", self.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let address = PublicAddress::from_bytes([7u8; ADDRESS_LEN]);
        let parsed: PublicAddress = address.to_string().parse().unwrap();
        assert_eq!(address, parsed);
    }

    #[test]
    fn test_wrong_length_rejected() {
        let err = PublicAddress::try_from(&[1u8; 31][..]).unwrap_err();
        assert_eq!(err, KeyError::LengthMismatch(31));
    }

    #[test]
    fn test_bad_hex_rejected() {
        assert!(matches!(
            "not-hex".parse::<PublicAddress>(),
            Err(KeyError::InvalidHex(_))
        ));
    }
}
