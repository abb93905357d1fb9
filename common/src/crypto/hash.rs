use serde::de::Error as SerdeError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::{
    fmt::{Display, Error, Formatter},
    str::FromStr,
};

use super::CryptoError;

pub const HASH_SIZE: usize = 32; // 32 bytes / 256 bits

/// A 32-byte hash, used for recent blockhashes and instruction discriminators.
#[derive(Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Debug, Default, Hash)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    pub const fn zero() -> Self {
        Hash::new([0; HASH_SIZE])
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; HASH_SIZE] {
        self.0
    }
}

// Hash a byte slice using sha256
#[inline(always)]
pub fn hash(value: &[u8]) -> Hash {
    Hash(Sha256::digest(value).into())
}

impl FromStr for Hash {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| CryptoError::InvalidBase58(e.to_string()))?;
        let len = bytes.len();
        let bytes: [u8; HASH_SIZE] = bytes.try_into().map_err(|_| CryptoError::InvalidLength {
            len,
            expected: HASH_SIZE,
        })?;
        Ok(Hash::new(bytes))
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", bs58::encode(self.0).into_string())
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'a> Deserialize<'a> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'a>,
    {
        let encoded = String::deserialize(deserializer)?;
        encoded.parse().map_err(SerdeError::custom)
    }
}
