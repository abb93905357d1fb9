use curve25519_dalek::edwards::CompressedEdwardsY;
use serde::de::Error as SerdeError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::{
    fmt::{self, Debug, Display, Formatter},
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
};

use super::CryptoError;

pub const PUBKEY_SIZE: usize = 32; // 32 bytes / 256 bits

/// Maximum number of seeds accepted when deriving a program address
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed
pub const MAX_SEED_LEN: usize = 32;

// Domain separator appended to every program address preimage
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

const BASE58_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// A 32-byte ledger address (account, program or mint).
#[derive(Clone, Copy, Default, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Pubkey([u8; PUBKEY_SIZE]);

impl Pubkey {
    pub const fn new(bytes: [u8; PUBKEY_SIZE]) -> Self {
        Pubkey(bytes)
    }

    /// Decode a base58 address at compile time.
    ///
    /// Intended for well-known constant addresses. An invalid literal fails
    /// const evaluation.
    pub const fn from_str_const(s: &str) -> Self {
        let input = s.as_bytes();
        let mut out = [0u8; PUBKEY_SIZE];
        let mut i = 0;
        while i < input.len() {
            let mut carry = base58_digit(input[i]) as u32;
            let mut j = PUBKEY_SIZE;
            while j > 0 {
                j -= 1;
                carry += out[j] as u32 * 58;
                out[j] = (carry & 0xff) as u8;
                carry >>= 8;
            }
            assert!(carry == 0, "base58 literal does not fit in 32 bytes");
            i += 1;
        }
        Pubkey(out)
    }

    /// Unique address for tests and fixtures. Not derived from any key.
    pub fn new_unique() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        let id = COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0u8; PUBKEY_SIZE];
        bytes[..8].copy_from_slice(&id.to_be_bytes());
        bytes[PUBKEY_SIZE - 1] = 0xAA;
        Pubkey(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBKEY_SIZE] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; PUBKEY_SIZE] {
        self.0
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }

    /// Whether these bytes decode to a point on the ed25519 curve.
    ///
    /// Program addresses must be off-curve so that no private key exists for them.
    pub fn is_on_curve(&self) -> bool {
        CompressedEdwardsY(self.0).decompress().is_some()
    }

    /// Derive a program address from the given seeds without searching for a bump.
    pub fn create_program_address(
        seeds: &[&[u8]],
        program_id: &Pubkey,
    ) -> Result<Pubkey, CryptoError> {
        if seeds.len() > MAX_SEEDS {
            return Err(CryptoError::TooManySeeds {
                count: seeds.len(),
                max: MAX_SEEDS,
            });
        }

        let mut hasher = Sha256::new();
        for seed in seeds {
            if seed.len() > MAX_SEED_LEN {
                return Err(CryptoError::SeedTooLong {
                    len: seed.len(),
                    max: MAX_SEED_LEN,
                });
            }
            hasher.update(seed);
        }
        hasher.update(program_id.as_bytes());
        hasher.update(PDA_MARKER);

        let candidate = Pubkey(hasher.finalize().into());
        if candidate.is_on_curve() {
            return Err(CryptoError::InvalidSeeds);
        }

        Ok(candidate)
    }

    /// Find the first off-curve program address, trying bump seeds from 255 down to 0.
    ///
    /// Returns the address together with the bump that produced it.
    pub fn find_program_address(
        seeds: &[&[u8]],
        program_id: &Pubkey,
    ) -> Result<(Pubkey, u8), CryptoError> {
        // The bump occupies one seed slot
        if seeds.len() >= MAX_SEEDS {
            return Err(CryptoError::TooManySeeds {
                count: seeds.len() + 1,
                max: MAX_SEEDS,
            });
        }

        for bump in (0..=u8::MAX).rev() {
            let bump_seed = [bump];
            let mut seeds_with_bump: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 1);
            seeds_with_bump.extend_from_slice(seeds);
            seeds_with_bump.push(&bump_seed);

            match Self::create_program_address(&seeds_with_bump, program_id) {
                Ok(address) => return Ok((address, bump)),
                Err(CryptoError::InvalidSeeds) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(CryptoError::NoViableBump)
    }
}

const fn base58_digit(c: u8) -> u8 {
    let mut i = 0;
    while i < BASE58_ALPHABET.len() {
        if BASE58_ALPHABET[i] == c {
            return i as u8;
        }
        i += 1;
    }
    panic!("invalid base58 character")
}

impl FromStr for Pubkey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| CryptoError::InvalidBase58(e.to_string()))?;
        let len = bytes.len();
        let bytes: [u8; PUBKEY_SIZE] =
            bytes.try_into().map_err(|_| CryptoError::InvalidLength {
                len,
                expected: PUBKEY_SIZE,
            })?;
        Ok(Pubkey(bytes))
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBKEY_SIZE]> for Pubkey {
    fn from(bytes: [u8; PUBKEY_SIZE]) -> Self {
        Pubkey(bytes)
    }
}

impl Display for Pubkey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl Debug for Pubkey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({})", self.to_base58())
    }
}

impl Serialize for Pubkey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'a> Deserialize<'a> for Pubkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'a>,
    {
        let encoded = String::deserialize(deserializer)?;
        encoded.parse().map_err(SerdeError::custom)
    }
}
