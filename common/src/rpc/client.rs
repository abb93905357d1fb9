//! JSON-RPC 2.0 over HTTP client for a ledger node.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, trace};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use super::{
    AccountInfo, LatestBlockhash, LedgerRpc, RpcError, RpcResponse, SignatureStatuses,
    TransactionStatus, UiTokenAmount, JSON_RPC_VERSION,
};
use crate::{
    commitment::CommitmentLevel,
    crypto::{Hash, Pubkey, Signature},
    transaction::Transaction,
};

/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC response structure
#[derive(Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

/// JSON-RPC error structure
#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

pub struct RpcClient {
    client: Client,
    url: String,
    commitment: CommitmentLevel,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>) -> Result<Self, RpcError> {
        Self::new_with_commitment(url, CommitmentLevel::default())
    }

    /// Client whose queries and preflight checks run at `commitment`.
    pub fn new_with_commitment(
        url: impl Into<String>,
        commitment: CommitmentLevel,
    ) -> Result<Self, RpcError> {
        let client = Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RpcError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            commitment,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn commitment(&self) -> CommitmentLevel {
        self.commitment
    }

    /// Call `method` and deserialize its `result` field.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": JSON_RPC_VERSION,
            "id": id,
            "method": method,
            "params": params
        });
        trace!("rpc request #{} {}: {}", id, method, body);

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| RpcError::Network(e.to_string()))?;

        let rpc_response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| RpcError::InvalidResponse(e.to_string()))?;

        if let Some(error) = rpc_response.error {
            debug!("rpc #{} {} failed: {} ({})", id, method, error.message, error.code);
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = rpc_response.result.ok_or(RpcError::MissingResult)?;
        Ok(serde_json::from_value(result)?)
    }
}

#[async_trait]
impl LedgerRpc for RpcClient {
    async fn get_signature_statuses(
        &self,
        signatures: &[Signature],
        search_transaction_history: bool,
    ) -> Result<Vec<Option<TransactionStatus>>, RpcError> {
        let signatures: Vec<String> = signatures.iter().map(|s| s.to_string()).collect();
        let statuses: Result<SignatureStatuses, RpcError> = self
            .call(
                "getSignatureStatuses",
                json!([signatures, { "searchTransactionHistory": search_transaction_history }]),
            )
            .await;
        match statuses {
            Ok(statuses) => Ok(statuses.value),
            // A null result reads as an empty status list
            Err(RpcError::MissingResult) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    async fn get_account_info(&self, address: &Pubkey) -> Result<Option<AccountInfo>, RpcError> {
        let response: RpcResponse<Option<AccountInfo>> = self
            .call(
                "getAccountInfo",
                json!([address.to_string(), {
                    "encoding": "base64",
                    "commitment": self.commitment.as_str()
                }]),
            )
            .await?;
        Ok(response.value)
    }

    async fn get_token_account_balance(
        &self,
        address: &Pubkey,
    ) -> Result<UiTokenAmount, RpcError> {
        let response: RpcResponse<UiTokenAmount> = self
            .call(
                "getTokenAccountBalance",
                json!([address.to_string(), { "commitment": self.commitment.as_str() }]),
            )
            .await?;
        Ok(response.value)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, RpcError> {
        let response: RpcResponse<LatestBlockhash> = self
            .call(
                "getLatestBlockhash",
                json!([{ "commitment": self.commitment.as_str() }]),
            )
            .await?;
        Ok(response.value.blockhash)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, RpcError> {
        let wire = STANDARD.encode(transaction.serialize()?);
        let signature: String = self
            .call(
                "sendTransaction",
                json!([wire, {
                    "encoding": "base64",
                    "preflightCommitment": self.commitment.as_str()
                }]),
            )
            .await?;
        signature
            .parse()
            .map_err(|e| RpcError::InvalidResponse(format!("bad signature '{}': {}", signature, e)))
    }
}
