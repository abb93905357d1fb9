use thiserror::Error;

/// Errors that can occur while parsing or deriving keys, hashes and signatures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Base58 string could not be decoded
    #[error("Invalid base58 string: {0}")]
    InvalidBase58(String),

    /// Decoded value has the wrong number of bytes
    #[error("Invalid length: {len} bytes, expected: {expected} bytes")]
    InvalidLength { len: usize, expected: usize },

    /// More seeds were supplied than a program address may use
    #[error("Too many seeds: {count}, maximum: {max}")]
    TooManySeeds { count: usize, max: usize },

    /// A single seed exceeds the maximum seed length
    #[error("Seed too long: {len} bytes, maximum: {max} bytes")]
    SeedTooLong { len: usize, max: usize },

    /// The derived address lies on the ed25519 curve and cannot be a program address
    #[error("Provided seeds do not result in a valid program address")]
    InvalidSeeds,

    /// No bump seed produced an off-curve address
    #[error("Unable to find a viable program address bump seed")]
    NoViableBump,

    /// Secret key bytes were rejected
    #[error("Invalid keypair: {0}")]
    InvalidKeypair(String),
}
