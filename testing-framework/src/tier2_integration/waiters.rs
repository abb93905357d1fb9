// File: testing-framework/src/tier2_integration/waiters.rs
//
// Waiter primitives for ledger state changes.
//
// Instead of sleeping a fixed amount and hoping the cluster caught up, tests
// poll the node through `LedgerRpc` until the state they expect shows up or a
// deadline passes. Time is read and slept through the injected `Clock`.

use log::{debug, info};
use serde_json::Value;
use spl_common::{
    commitment::CommitmentLevel,
    config::{DEFAULT_CONFIRM_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS},
    crypto::{Pubkey, Signature},
    rpc::{AccountInfo, LedgerRpc, RpcError, TransactionStatus},
};
use std::slice;
use thiserror::Error;
use tokio::time::Duration;

use crate::orchestrator::{Clock, SystemClock};

/// Options for [`wait_for_confirmation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmOptions {
    /// Level the transaction must reach; `finalized` always satisfies it.
    pub commitment: CommitmentLevel,
    /// Total time budget measured from the first query.
    pub timeout: Duration,
    /// Pause between queries that did not settle the outcome.
    pub poll_interval: Duration,
    /// Ask the node to search beyond its recent status cache.
    pub search_transaction_history: bool,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            commitment: CommitmentLevel::Confirmed,
            timeout: Duration::from_millis(DEFAULT_CONFIRM_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            search_transaction_history: false,
        }
    }
}

impl ConfirmOptions {
    pub fn with_commitment(mut self, commitment: CommitmentLevel) -> Self {
        self.commitment = commitment;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_search_transaction_history(mut self, search: bool) -> Self {
        self.search_transaction_history = search;
        self
    }
}

/// Why a confirmation wait ended without a satisfying status.
#[derive(Error, Debug)]
pub enum ConfirmationError {
    /// The node answered with an empty status list.
    #[error("Failed to look up status of transaction {signature}")]
    Lookup { signature: Signature },

    /// The transaction was observed and the ledger reported it as failed.
    #[error("Transaction {signature} failed: {err}")]
    Transaction { signature: Signature, err: Value },

    /// The budget ran out before the desired level was observed.
    #[error("Transaction {signature} was not confirmed within {timeout:?}")]
    Timeout {
        signature: Signature,
        timeout: Duration,
    },

    /// The status query itself could not be completed.
    #[error("Status query for transaction {signature} failed: {source}")]
    Rpc {
        signature: Signature,
        #[source]
        source: RpcError,
    },
}

impl ConfirmationError {
    pub fn signature(&self) -> &Signature {
        match self {
            Self::Lookup { signature }
            | Self::Transaction { signature, .. }
            | Self::Timeout { signature, .. }
            | Self::Rpc { signature, .. } => signature,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Poll until `signature` reaches `options.commitment` (or finalized).
///
/// One query per iteration while `clock.now() - start < timeout`:
/// - empty status list: [`ConfirmationError::Lookup`] right away
/// - `null` entry: not observed yet, sleep and retry
/// - entry with `err`: [`ConfirmationError::Transaction`] carrying the payload
/// - entry at the desired level or finalized: returned as is
/// - anything else: sleep and retry
///
/// When the loop exits, [`ConfirmationError::Timeout`] is returned. A failed
/// status query is not retried and surfaces as [`ConfirmationError::Rpc`].
///
/// # Example
///
/// ```rust,ignore
/// let status = wait_for_confirmation(&ledger, &SystemClock, &signature, &ConfirmOptions::default()).await?;
/// assert!(status.satisfies(CommitmentLevel::Confirmed));
/// ```
pub async fn wait_for_confirmation<L: LedgerRpc + ?Sized>(
    ledger: &L,
    clock: &dyn Clock,
    signature: &Signature,
    options: &ConfirmOptions,
) -> Result<TransactionStatus, ConfirmationError> {
    let start = clock.now();
    let mut polls = 0u32;

    while clock.now().duration_since(start) < options.timeout {
        polls += 1;
        let statuses = ledger
            .get_signature_statuses(
                slice::from_ref(signature),
                options.search_transaction_history,
            )
            .await
            .map_err(|source| ConfirmationError::Rpc {
                signature: *signature,
                source,
            })?;

        let Some(entry) = statuses.into_iter().next() else {
            return Err(ConfirmationError::Lookup {
                signature: *signature,
            });
        };

        match entry {
            None => debug!("Poll #{}: transaction {} not observed yet", polls, signature),
            Some(mut status) => {
                if let Some(err) = status.err.take() {
                    return Err(ConfirmationError::Transaction {
                        signature: *signature,
                        err,
                    });
                }

                if status.satisfies(options.commitment) {
                    info!(
                        "Transaction {} reached {:?} at slot {} after {} poll(s)",
                        signature, status.confirmation_status, status.slot, polls
                    );
                    return Ok(status);
                }

                debug!(
                    "Poll #{}: transaction {} at {:?}, waiting for {}",
                    polls, signature, status.confirmation_status, options.commitment
                );
            }
        }

        clock.sleep(options.poll_interval).await;
    }

    Err(ConfirmationError::Timeout {
        signature: *signature,
        timeout: options.timeout,
    })
}

/// [`wait_for_confirmation`] on real time with default options.
pub async fn confirm_transaction<L: LedgerRpc + ?Sized>(
    ledger: &L,
    signature: &Signature,
) -> Result<TransactionStatus, ConfirmationError> {
    wait_for_confirmation(ledger, &SystemClock, signature, &ConfirmOptions::default()).await
}

/// Poll until `address` holds an account, failing after `timeout`.
///
/// # Errors
///
/// Returns an error if an account query fails or the account does not show up
/// in time.
pub async fn wait_for_account<L: LedgerRpc + ?Sized>(
    ledger: &L,
    clock: &dyn Clock,
    address: &Pubkey,
    timeout: Duration,
    poll_interval: Duration,
) -> anyhow::Result<AccountInfo> {
    let start = clock.now();

    while clock.now().duration_since(start) < timeout {
        if let Some(info) = ledger.get_account_info(address).await? {
            return Ok(info);
        }
        debug!("Account {} does not exist yet", address);
        clock.sleep(poll_interval).await;
    }

    anyhow::bail!("Timeout waiting for account {} after {:?}", address, timeout)
}
