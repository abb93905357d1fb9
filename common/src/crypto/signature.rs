use serde::de::Error as SerdeError;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug, Display, Formatter},
    str::FromStr,
};

use super::CryptoError;

pub const SIGNATURE_SIZE: usize = 64;

/// An ed25519 transaction signature.
///
/// The first signature of a transaction doubles as its identifier on the ledger,
/// so this is also the key used to look up confirmation status.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Signature([u8; SIGNATURE_SIZE]);

impl Signature {
    pub const fn new(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Signature(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl Default for Signature {
    fn default() -> Self {
        Signature([0u8; SIGNATURE_SIZE])
    }
}

impl FromStr for Signature {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| CryptoError::InvalidBase58(e.to_string()))?;
        let len = bytes.len();
        let bytes: [u8; SIGNATURE_SIZE] =
            bytes.try_into().map_err(|_| CryptoError::InvalidLength {
                len,
                expected: SIGNATURE_SIZE,
            })?;
        Ok(Signature(bytes))
    }
}

impl From<ed25519_dalek::Signature> for Signature {
    fn from(signature: ed25519_dalek::Signature) -> Self {
        Signature(signature.to_bytes())
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_base58())
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'a> Deserialize<'a> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'a>,
    {
        let encoded = String::deserialize(deserializer)?;
        encoded.parse().map_err(SerdeError::custom)
    }
}
