//! Convenient re-exports for writing tests.
//!
//! ```rust,ignore
//! use spl_testing_framework::prelude::*;
//! ```

pub use crate::error::ProgramError;
pub use crate::orchestrator::{Clock, PausedClock, SystemClock};
pub use crate::program::{
    ApproveAccounts, InitTokenAccounts, InitTokenParams, MintTokensAccounts, SplProgram,
    ToAccountMetas, TransferAccounts,
};
pub use crate::provider::Provider;
pub use crate::tier2_integration::{
    rpc_helpers::{
        assert_account_exists, assert_account_missing, assert_program_deployed,
        assert_token_balance, token_balance_or_zero,
    },
    waiters::{confirm_transaction, wait_for_account},
    wait_for_confirmation, ConfirmOptions, ConfirmationError, LedgerRpc, MockLedger, RpcError,
    StatusReply, TransactionStatus,
};

pub use spl_common::{
    cluster::{Cluster, ProviderConfig},
    commitment::CommitmentLevel,
    crypto::{Keypair, Pubkey, Signature},
};

pub use std::sync::Arc;
pub use tokio::time::Duration;
