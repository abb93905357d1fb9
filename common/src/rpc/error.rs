use serde_json::Error as SerdeError;
use thiserror::Error;

use crate::transaction::EncodeError;

// JSON-RPC "invalid params", returned among others for unknown accounts
pub const INVALID_PARAMS_CODE: i64 = -32602;

// Message the node pairs with INVALID_PARAMS_CODE when the account does not exist
pub const ACCOUNT_NOT_FOUND_MESSAGE: &str = "could not find account";

#[derive(Error, Debug)]
pub enum RpcError {
    /// The request never produced a JSON-RPC answer (connection, HTTP status, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The node answered with a JSON-RPC error object
    #[error("RPC error ({code}): {message}")]
    Rpc { code: i64, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] SerdeError),

    #[error("Missing result field in response")]
    MissingResult,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl RpcError {
    /// The node reached a verdict on the request, as opposed to a transport failure.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Rpc { .. })
    }

    /// The node reported that the queried account does not exist.
    ///
    /// Other invalid-params answers, such as an account that exists but is
    /// not a token account, do not count.
    pub fn is_account_not_found(&self) -> bool {
        match self {
            Self::Rpc { code, message } => {
                *code == INVALID_PARAMS_CODE && message.contains(ACCOUNT_NOT_FOUND_MESSAGE)
            }
            _ => false,
        }
    }

    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpc(code: i64, message: &str) -> RpcError {
        RpcError::Rpc {
            code,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_account_not_found_classification() {
        let missing = rpc(INVALID_PARAMS_CODE, "Invalid param: could not find account");
        assert!(missing.is_account_not_found());

        let not_token = rpc(INVALID_PARAMS_CODE, "Invalid param: not a Token account");
        assert!(!not_token.is_account_not_found());
        assert!(!rpc(-32005, "Node is behind by 42 slots").is_account_not_found());
        assert!(!RpcError::Network("connection refused".into()).is_account_not_found());
        assert!(rpc(-32005, "Node is behind by 42 slots").is_server_error());
    }
}
