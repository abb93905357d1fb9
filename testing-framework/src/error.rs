use spl_common::{
    cluster::ConfigError, crypto::CryptoError, rpc::RpcError, transaction::EncodeError,
};
use std::io;
use thiserror::Error;

use crate::tier2_integration::ConfirmationError;

/// Failure of a provider or program client call.
#[derive(Error, Debug)]
pub enum ProgramError {
    #[error("Invalid provider configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to derive address: {0}")]
    Address(#[from] CryptoError),

    #[error("Failed to serialize instruction arguments: {0}")]
    Serialize(#[from] io::Error),

    /// Message compilation or signing failed, including an account marked as
    /// signer with no matching keypair. Nothing was submitted.
    #[error("Failed to build transaction: {0}")]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Confirmation(#[from] ConfirmationError),
}

impl ProgramError {
    /// Whether the call failed before anything reached the ledger.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Address(_) | Self::Serialize(_) | Self::Encode(_)
        )
    }

    pub fn is_missing_signer(&self) -> bool {
        matches!(self, Self::Encode(EncodeError::MissingSigner(_)))
    }
}
