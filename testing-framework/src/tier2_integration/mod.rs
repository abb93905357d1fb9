// File: testing-framework/src/tier2_integration/mod.rs
//
// Tier 2 Integration Testing Components
//
// Utilities for tests that run against a single ledger node through its RPC
// interface: waiter primitives, assertion helpers and an in-memory ledger.

/// Scriptable in-memory ledger
pub mod mock;
pub mod rpc_helpers;
/// Waiter primitives for ledger state changes
pub mod waiters;

pub use mock::{MockLedger, StatusReply};
pub use waiters::{wait_for_confirmation, ConfirmOptions, ConfirmationError};

// Re-export the collaborator interface for use across the testing framework
pub use spl_common::rpc::{LedgerRpc, RpcError, TransactionStatus};

#[cfg(test)]
mod tests {
    use super::*;
    use spl_common::{commitment::CommitmentLevel, crypto::Signature};

    #[tokio::test]
    async fn test_mock_ledger_script_repeats_last_reply() {
        let ledger = MockLedger::new();
        let signature = Signature::new([5u8; 64]);
        ledger
            .script_statuses(
                signature,
                vec![
                    StatusReply::Pending,
                    StatusReply::Status(CommitmentLevel::Processed),
                ],
            )
            .await;

        let first = ledger.get_signature_statuses(&[signature], false).await.unwrap();
        assert_eq!(first, vec![None]);

        for _ in 0..3 {
            let next = ledger.get_signature_statuses(&[signature], false).await.unwrap();
            let status = next[0].as_ref().unwrap();
            assert_eq!(status.confirmation_status, Some(CommitmentLevel::Processed));
        }
        assert_eq!(ledger.status_query_count().await, 4);
    }

    #[tokio::test]
    async fn test_mock_ledger_unknown_signature_pending() {
        let ledger = MockLedger::new();
        let statuses = ledger
            .get_signature_statuses(&[Signature::new([6u8; 64])], false)
            .await
            .unwrap();
        assert_eq!(statuses, vec![None]);
    }
}
