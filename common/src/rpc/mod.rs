#[cfg(feature = "rpc-client")]
pub mod client;

mod error;
mod types;

pub use error::*;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    crypto::{Hash, Pubkey, Signature},
    transaction::Transaction,
};

/// Read/submit interface to a ledger node.
///
/// Implementations must tolerate concurrent independent callers; none of the
/// methods take `&mut self`.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Look up the status of each signature.
    ///
    /// The result has one entry per requested signature in the same order;
    /// `None` means the node has not observed that transaction. An empty
    /// result signals a malformed answer.
    async fn get_signature_statuses(
        &self,
        signatures: &[Signature],
        search_transaction_history: bool,
    ) -> Result<Vec<Option<TransactionStatus>>, RpcError>;

    /// Account contents, or `None` if the account does not exist.
    async fn get_account_info(&self, address: &Pubkey) -> Result<Option<AccountInfo>, RpcError>;

    /// Balance of a token account. Fails if the account does not exist yet.
    async fn get_token_account_balance(&self, address: &Pubkey)
        -> Result<UiTokenAmount, RpcError>;

    async fn get_latest_blockhash(&self) -> Result<Hash, RpcError>;

    /// Submit a signed transaction, returning its signature.
    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, RpcError>;
}

#[async_trait]
impl<T: LedgerRpc + ?Sized> LedgerRpc for Arc<T> {
    async fn get_signature_statuses(
        &self,
        signatures: &[Signature],
        search_transaction_history: bool,
    ) -> Result<Vec<Option<TransactionStatus>>, RpcError> {
        (**self)
            .get_signature_statuses(signatures, search_transaction_history)
            .await
    }

    async fn get_account_info(&self, address: &Pubkey) -> Result<Option<AccountInfo>, RpcError> {
        (**self).get_account_info(address).await
    }

    async fn get_token_account_balance(
        &self,
        address: &Pubkey,
    ) -> Result<UiTokenAmount, RpcError> {
        (**self).get_token_account_balance(address).await
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, RpcError> {
        (**self).get_latest_blockhash().await
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, RpcError> {
        (**self).send_transaction(transaction).await
    }
}
