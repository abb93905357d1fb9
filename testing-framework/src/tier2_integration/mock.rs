// File: testing-framework/src/tier2_integration/mock.rs
//
// In-memory ledger for tests that should not need a running validator.
//
// Status answers are scripted per signature; accounts and token balances are
// plain maps the test fills in. Every submitted transaction is recorded so a
// test can inspect exactly what a client built and signed.

use async_trait::async_trait;
use serde_json::Value;
use spl_common::{
    commitment::CommitmentLevel,
    config::SYSTEM_PROGRAM_ID,
    crypto::{Hash, Pubkey, Signature},
    rpc::{AccountInfo, LedgerRpc, RpcError, TransactionStatus, UiTokenAmount, INVALID_PARAMS_CODE},
    transaction::Transaction,
};
use std::collections::{HashMap, VecDeque};
use tokio::sync::Mutex;

/// One scripted answer to a status query.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusReply {
    /// The node returns an empty status list.
    Empty,
    /// The node has not seen the transaction (`null` entry).
    Pending,
    /// Observed at the given level.
    Status(CommitmentLevel),
    /// Observed with an error payload.
    Failed(Value),
    /// The query fails at the transport level.
    Unreachable(String),
}

#[derive(Default)]
struct LedgerState {
    scripts: HashMap<Signature, VecDeque<StatusReply>>,
    accounts: HashMap<Pubkey, AccountInfo>,
    token_balances: HashMap<Pubkey, UiTokenAmount>,
    sent: Vec<Transaction>,
    history_searches: Vec<bool>,
    blockhash: Hash,
    slot: u64,
    auto_confirm: Option<CommitmentLevel>,
}

/// Scriptable [`LedgerRpc`] implementation.
///
/// A signature's script is consumed one reply per query; the last reply
/// repeats forever. Signatures without a script answer `Pending`, unless
/// auto-confirm is on and the transaction was submitted through this ledger.
pub struct MockLedger {
    state: Mutex<LedgerState>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LedgerState {
                blockhash: Hash::new([9u8; 32]),
                slot: 1,
                ..Default::default()
            }),
        }
    }

    /// Submitted transactions immediately report `level`.
    pub fn with_auto_confirm(mut self, level: CommitmentLevel) -> Self {
        self.state.get_mut().auto_confirm = Some(level);
        self
    }

    pub async fn script_statuses(&self, signature: Signature, replies: Vec<StatusReply>) {
        self.state
            .lock()
            .await
            .scripts
            .insert(signature, replies.into());
    }

    pub async fn set_account(&self, address: Pubkey, info: AccountInfo) {
        self.state.lock().await.accounts.insert(address, info);
    }

    pub async fn set_token_balance(&self, address: Pubkey, amount: u64, decimals: u8) {
        self.state
            .lock()
            .await
            .token_balances
            .insert(address, Self::token_amount(amount, decimals));
    }

    pub async fn set_blockhash(&self, blockhash: Hash) {
        self.state.lock().await.blockhash = blockhash;
    }

    pub async fn sent_transactions(&self) -> Vec<Transaction> {
        self.state.lock().await.sent.clone()
    }

    pub async fn status_query_count(&self) -> usize {
        self.state.lock().await.history_searches.len()
    }

    /// `search_transaction_history` flag of every status query, in order.
    pub async fn history_searches(&self) -> Vec<bool> {
        self.state.lock().await.history_searches.clone()
    }

    /// System-owned account holding `lamports`.
    pub fn account(lamports: u64) -> AccountInfo {
        AccountInfo {
            lamports,
            owner: SYSTEM_PROGRAM_ID,
            data: Vec::new(),
            executable: false,
            rent_epoch: 0,
        }
    }

    /// Token amount the way a node renders it.
    pub fn token_amount(amount: u64, decimals: u8) -> UiTokenAmount {
        let ui_amount = amount as f64 / 10f64.powi(i32::from(decimals));
        UiTokenAmount {
            amount: amount.to_string(),
            decimals,
            ui_amount: Some(ui_amount),
            ui_amount_string: ui_amount.to_string(),
        }
    }

    fn status(slot: u64, level: CommitmentLevel, err: Option<Value>) -> TransactionStatus {
        TransactionStatus {
            slot,
            confirmations: (!level.is_finalized()).then_some(0),
            err,
            confirmation_status: Some(level),
        }
    }
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerRpc for MockLedger {
    async fn get_signature_statuses(
        &self,
        signatures: &[Signature],
        search_transaction_history: bool,
    ) -> Result<Vec<Option<TransactionStatus>>, RpcError> {
        let mut state = self.state.lock().await;
        state.history_searches.push(search_transaction_history);
        state.slot += 1;
        let slot = state.slot;

        let mut statuses = Vec::with_capacity(signatures.len());
        for signature in signatures {
            let reply = match state.scripts.get_mut(signature) {
                Some(script) if script.len() > 1 => script.pop_front(),
                Some(script) => script.front().cloned(),
                None => None,
            };
            let reply = match reply {
                Some(reply) => reply,
                None => match state.auto_confirm {
                    Some(level) if state.sent.iter().any(|tx| tx.signature() == Some(signature)) => {
                        StatusReply::Status(level)
                    }
                    _ => StatusReply::Pending,
                },
            };

            match reply {
                StatusReply::Empty => return Ok(Vec::new()),
                StatusReply::Pending => statuses.push(None),
                StatusReply::Status(level) => statuses.push(Some(Self::status(slot, level, None))),
                StatusReply::Failed(err) => statuses.push(Some(Self::status(
                    slot,
                    CommitmentLevel::Processed,
                    Some(err),
                ))),
                StatusReply::Unreachable(reason) => return Err(RpcError::Network(reason)),
            }
        }

        Ok(statuses)
    }

    async fn get_account_info(&self, address: &Pubkey) -> Result<Option<AccountInfo>, RpcError> {
        Ok(self.state.lock().await.accounts.get(address).cloned())
    }

    async fn get_token_account_balance(
        &self,
        address: &Pubkey,
    ) -> Result<UiTokenAmount, RpcError> {
        self.state
            .lock()
            .await
            .token_balances
            .get(address)
            .cloned()
            .ok_or_else(|| RpcError::Rpc {
                code: INVALID_PARAMS_CODE,
                message: "Invalid param: could not find account".to_string(),
            })
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, RpcError> {
        Ok(self.state.lock().await.blockhash)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, RpcError> {
        let signature = transaction
            .signature()
            .copied()
            .ok_or_else(|| RpcError::InvalidResponse("transaction is not signed".to_string()))?;
        self.state.lock().await.sent.push(transaction.clone());
        Ok(signature)
    }
}
