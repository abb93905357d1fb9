mod hash;
mod pubkey;
mod signature;

pub mod error;
pub mod keypair;

pub use error::CryptoError;
pub use hash::*;
pub use keypair::{read_keypair_file, verify_signature, Keypair, KeypairFileError};
pub use pubkey::*;
pub use signature::*;
