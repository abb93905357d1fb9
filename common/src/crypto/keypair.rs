//! Ed25519 keypairs for signing transactions.
//!
//! Keypair files use the Solana CLI layout: a JSON array of 64 numbers, the
//! 32-byte secret key followed by the 32-byte public key.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey, KEYPAIR_LENGTH};
use rand::rngs::OsRng;
use std::{fmt, fs, io, path::Path};
use thiserror::Error;

use super::{CryptoError, Pubkey, Signature};

/// Error types for loading a keypair file.
#[derive(Error, Debug)]
pub enum KeypairFileError {
    /// The file could not be read.
    #[error("Failed to read keypair file: {0}")]
    Io(#[from] io::Error),

    /// The file is not a JSON byte array.
    #[error("Keypair file is not a JSON byte array: {0}")]
    Json(#[from] serde_json::Error),

    /// The bytes do not form a valid keypair.
    #[error(transparent)]
    Invalid(#[from] CryptoError),
}

/// Payer keypair.
#[derive(Clone)]
pub struct Keypair(SigningKey);

impl Keypair {
    /// Generate a fresh random keypair.
    pub fn new() -> Self {
        Keypair(SigningKey::generate(&mut OsRng))
    }

    /// Build a keypair from the 64-byte secret-then-public layout.
    ///
    /// The public half must match the secret half.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes: &[u8; KEYPAIR_LENGTH] =
            bytes.try_into().map_err(|_| CryptoError::InvalidLength {
                len: bytes.len(),
                expected: KEYPAIR_LENGTH,
            })?;
        SigningKey::from_keypair_bytes(bytes)
            .map(Keypair)
            .map_err(|e| CryptoError::InvalidKeypair(e.to_string()))
    }

    pub fn to_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        self.0.to_keypair_bytes()
    }

    pub fn pubkey(&self) -> Pubkey {
        Pubkey::new(self.0.verifying_key().to_bytes())
    }

    pub fn sign_message(&self, message: &[u8]) -> Signature {
        self.0.sign(message).into()
    }
}

impl Default for Keypair {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({})", self.pubkey())
    }
}

/// Read a keypair from a Solana CLI style JSON file.
pub fn read_keypair_file<P: AsRef<Path>>(path: P) -> Result<Keypair, KeypairFileError> {
    let content = fs::read_to_string(path)?;
    let bytes: Vec<u8> = serde_json::from_str(&content)?;
    Ok(Keypair::from_bytes(&bytes)?)
}

/// Check an ed25519 signature of `message` against `pubkey`.
pub fn verify_signature(pubkey: &Pubkey, message: &[u8], signature: &Signature) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(pubkey.as_bytes()) else {
        return false;
    };
    let signature = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
    key.verify(message, &signature).is_ok()
}
