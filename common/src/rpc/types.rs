use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::de::Error as SerdeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    commitment::CommitmentLevel,
    crypto::{Hash, Pubkey},
};

pub const JSON_RPC_VERSION: &str = "2.0";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcResponseContext {
    pub slot: u64,
}

/// `{context, value}` envelope used by most ledger queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse<T> {
    #[serde(default)]
    pub context: RpcResponseContext,
    pub value: T,
}

/// Envelope for `getSignatureStatuses`.
///
/// A missing `value` deserializes as an empty list, which callers treat as a
/// malformed lookup rather than as "not yet observed".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SignatureStatuses {
    #[serde(default)]
    pub context: RpcResponseContext,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: Vec<Option<TransactionStatus>>,
}

/// Status of an observed transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatus {
    pub slot: u64,
    /// Blocks since the transaction; `None` once rooted.
    #[serde(default)]
    pub confirmations: Option<u64>,
    /// Ledger error payload, passed through verbatim.
    #[serde(default)]
    pub err: Option<Value>,
    #[serde(default)]
    pub confirmation_status: Option<CommitmentLevel>,
}

impl TransactionStatus {
    pub fn is_failed(&self) -> bool {
        self.err.is_some()
    }

    /// Whether this status satisfies `desired`; a status without a level never does.
    pub fn satisfies(&self, desired: CommitmentLevel) -> bool {
        self.confirmation_status
            .map(|level| level.satisfies(desired))
            .unwrap_or(false)
    }
}

/// On-chain account contents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub lamports: u64,
    pub owner: Pubkey,
    #[serde(deserialize_with = "decode_account_data")]
    pub data: Vec<u8>,
    pub executable: bool,
    #[serde(default)]
    pub rent_epoch: u64,
}

/// Token balance as reported by `getTokenAccountBalance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiTokenAmount {
    /// Raw amount in base units, as a decimal string.
    pub amount: String,
    pub decimals: u8,
    #[serde(default)]
    pub ui_amount: Option<f64>,
    #[serde(default)]
    pub ui_amount_string: String,
}

impl UiTokenAmount {
    /// Balance in whole tokens; zero when the node omits it.
    pub fn ui_amount_or_zero(&self) -> f64 {
        self.ui_amount.unwrap_or(0.0)
    }

    pub fn raw_amount(&self) -> Option<u64> {
        self.amount.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestBlockhash {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// Account data arrives as `["<payload>", "base64"]`
fn decode_account_data<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let (payload, encoding) = <(String, String)>::deserialize(deserializer)?;
    if encoding != "base64" {
        return Err(SerdeError::custom(format!(
            "unsupported account data encoding '{}'",
            encoding
        )));
    }
    STANDARD.decode(payload).map_err(SerdeError::custom)
}
