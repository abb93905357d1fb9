//! RPC assertion helpers for integration testing
//!
//! Assertion utilities for verifying ledger state through [`LedgerRpc`].
//! These helpers keep tests readable and produce error messages naming the
//! account and both values.

use anyhow::{Context, Result};
use log::warn;
use spl_common::{
    crypto::Pubkey,
    rpc::{AccountInfo, LedgerRpc, RpcError},
};

/// Tolerance used when comparing whole-token balances.
pub const BALANCE_EPSILON: f64 = 1e-9;

/// Token balance in whole tokens, with a missing account reading as zero.
///
/// A token account that was never created makes the node answer
/// `getTokenAccountBalance` with an invalid-params "could not find account"
/// error; only that case yields `0.0`. Every other failure is returned.
///
/// # Example
///
/// ```rust
/// # use spl_common::crypto::Pubkey;
/// # use spl_testing_framework::tier2_integration::{rpc_helpers::token_balance_or_zero, MockLedger};
/// # tokio_test::block_on(async {
/// let ledger = MockLedger::new();
/// let ata = Pubkey::new_unique();
/// assert_eq!(token_balance_or_zero(&ledger, &ata).await.unwrap(), 0.0);
///
/// ledger.set_token_balance(ata, 2_500_000_000, 9).await;
/// assert_eq!(token_balance_or_zero(&ledger, &ata).await.unwrap(), 2.5);
/// # });
/// ```
pub async fn token_balance_or_zero<L: LedgerRpc + ?Sized>(
    ledger: &L,
    address: &Pubkey,
) -> Result<f64, RpcError> {
    match ledger.get_token_account_balance(address).await {
        Ok(amount) => Ok(amount.ui_amount_or_zero()),
        Err(e) if e.is_account_not_found() => {
            warn!("Token account {} does not exist, treating balance as 0", address);
            Ok(0.0)
        }
        Err(e) => Err(e),
    }
}

/// Assert that an account exists at `address`
///
/// # Errors
///
/// Returns an error if:
/// - RPC call fails
/// - No account is stored at the address
pub async fn assert_account_exists<L: LedgerRpc + ?Sized>(
    ledger: &L,
    address: &Pubkey,
) -> Result<AccountInfo> {
    ledger
        .get_account_info(address)
        .await
        .with_context(|| format!("Failed to get account info for {}", address))?
        .with_context(|| format!("Account {} does not exist", address))
}

/// Assert that no account exists at `address`
pub async fn assert_account_missing<L: LedgerRpc + ?Sized>(
    ledger: &L,
    address: &Pubkey,
) -> Result<()> {
    let info = ledger
        .get_account_info(address)
        .await
        .with_context(|| format!("Failed to get account info for {}", address))?;

    if let Some(info) = info {
        anyhow::bail!(
            "Account {} unexpectedly exists (owner {}, {} lamports)",
            address,
            info.owner,
            info.lamports
        );
    }

    Ok(())
}

/// Assert that a token account holds `expected` whole tokens
///
/// Missing accounts read as zero, see [`token_balance_or_zero`].
///
/// # Errors
///
/// Returns an error if:
/// - RPC call fails
/// - Actual balance differs from expected
///
/// # Example
///
/// ```rust,ignore
/// assert_token_balance(&ledger, &ata, 10.0).await?;
/// ```
pub async fn assert_token_balance<L: LedgerRpc + ?Sized>(
    ledger: &L,
    address: &Pubkey,
    expected: f64,
) -> Result<()> {
    let actual = token_balance_or_zero(ledger, address)
        .await
        .with_context(|| format!("Failed to get token balance for {}", address))?;

    if (actual - expected).abs() > BALANCE_EPSILON {
        anyhow::bail!(
            "Token balance mismatch for {}: expected {}, got {}",
            address,
            expected,
            actual
        );
    }

    Ok(())
}

/// Assert that the program account at `program_id` is deployed
///
/// # Errors
///
/// Returns an error if the account is missing or not marked executable.
pub async fn assert_program_deployed<L: LedgerRpc + ?Sized>(
    ledger: &L,
    program_id: &Pubkey,
) -> Result<AccountInfo> {
    let info = assert_account_exists(ledger, program_id)
        .await
        .with_context(|| format!("Program {} is not deployed", program_id))?;

    if !info.executable {
        anyhow::bail!("Account {} exists but is not executable", program_id);
    }

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier2_integration::mock::MockLedger;
    use async_trait::async_trait;
    use spl_common::{
        crypto::{Hash, Signature},
        rpc::{TransactionStatus, UiTokenAmount, INVALID_PARAMS_CODE},
        transaction::Transaction,
    };

    // Ledger whose token balance query always fails with a fixed JSON-RPC error
    struct FailingBalance {
        code: i64,
        message: &'static str,
    }

    #[async_trait]
    impl LedgerRpc for FailingBalance {
        async fn get_signature_statuses(
            &self,
            _signatures: &[Signature],
            _search_transaction_history: bool,
        ) -> Result<Vec<Option<TransactionStatus>>, RpcError> {
            Ok(Vec::new())
        }

        async fn get_account_info(&self, _address: &Pubkey) -> Result<Option<AccountInfo>, RpcError> {
            Ok(None)
        }

        async fn get_token_account_balance(
            &self,
            _address: &Pubkey,
        ) -> Result<UiTokenAmount, RpcError> {
            Err(RpcError::Rpc {
                code: self.code,
                message: self.message.to_string(),
            })
        }

        async fn get_latest_blockhash(&self) -> Result<Hash, RpcError> {
            Ok(Hash::zero())
        }

        async fn send_transaction(&self, _transaction: &Transaction) -> Result<Signature, RpcError> {
            Err(RpcError::MissingResult)
        }
    }

    #[tokio::test]
    async fn test_missing_token_account_reads_zero() {
        let ledger = MockLedger::new();
        let balance = token_balance_or_zero(&ledger, &Pubkey::new_unique())
            .await
            .unwrap();
        assert_eq!(balance, 0.0);
    }

    #[tokio::test]
    async fn test_other_balance_errors_propagate() {
        let address = Pubkey::new_unique();

        let behind = FailingBalance {
            code: -32005,
            message: "Node is behind by 42 slots",
        };
        let err = token_balance_or_zero(&behind, &address).await.unwrap_err();
        assert_eq!(err.code(), Some(-32005));
        assert!(assert_token_balance(&behind, &address, 0.0).await.is_err());

        let not_token = FailingBalance {
            code: INVALID_PARAMS_CODE,
            message: "Invalid param: not a Token account",
        };
        assert!(token_balance_or_zero(&not_token, &address).await.is_err());

        let missing = FailingBalance {
            code: INVALID_PARAMS_CODE,
            message: "Invalid param: could not find account",
        };
        assert_eq!(token_balance_or_zero(&missing, &address).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_token_balance_in_whole_tokens() {
        let ledger = MockLedger::new();
        let ata = Pubkey::new_unique();
        ledger.set_token_balance(ata, 10_000_000_000, 9).await;

        assert_eq!(token_balance_or_zero(&ledger, &ata).await.unwrap(), 10.0);
        assert!(assert_token_balance(&ledger, &ata, 10.0).await.is_ok());

        let err = assert_token_balance(&ledger, &ata, 20.0).await.unwrap_err();
        assert!(err.to_string().contains("mismatch"));
    }

    #[tokio::test]
    async fn test_assert_account_exists() {
        let ledger = MockLedger::new();
        let address = Pubkey::new_unique();

        assert!(assert_account_exists(&ledger, &address).await.is_err());
        assert!(assert_account_missing(&ledger, &address).await.is_ok());

        ledger.set_account(address, MockLedger::account(42)).await;

        let info = assert_account_exists(&ledger, &address).await.unwrap();
        assert_eq!(info.lamports, 42);
        assert!(assert_account_missing(&ledger, &address).await.is_err());
    }

    #[tokio::test]
    async fn test_assert_program_deployed() {
        let ledger = MockLedger::new();
        let program_id = Pubkey::new_unique();

        assert!(assert_program_deployed(&ledger, &program_id).await.is_err());

        let mut info = MockLedger::account(1);
        ledger.set_account(program_id, info.clone()).await;
        assert!(assert_program_deployed(&ledger, &program_id).await.is_err());

        info.executable = true;
        ledger.set_account(program_id, info).await;
        assert!(assert_program_deployed(&ledger, &program_id).await.is_ok());
    }
}
