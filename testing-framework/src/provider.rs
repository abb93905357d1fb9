// File: testing-framework/src/provider.rs
//
// Client context: ledger connection, payer and confirmation options.
//
// A provider is an explicit value handed to every program client; nothing is
// registered process-wide.

use log::{debug, info};
use spl_common::{
    cluster::{explorer_url, Cluster, ProviderConfig},
    crypto::{Keypair, Pubkey, Signature},
    rpc::{client::RpcClient, LedgerRpc, TransactionStatus},
    transaction::{Instruction, Transaction},
};
use std::sync::Arc;

use crate::{
    error::ProgramError,
    orchestrator::{Clock, SystemClock},
    tier2_integration::{wait_for_confirmation, ConfirmOptions, ConfirmationError},
};

/// Ledger connection plus the payer that funds and signs every transaction.
pub struct Provider {
    connection: Arc<dyn LedgerRpc>,
    payer: Keypair,
    clock: Arc<dyn Clock>,
    options: ConfirmOptions,
    cluster: Cluster,
}

impl Provider {
    /// Provider on real time with default confirmation options.
    pub fn new(connection: Arc<dyn LedgerRpc>, payer: Keypair) -> Self {
        Self {
            connection,
            payer,
            clock: Arc::new(SystemClock),
            options: ConfirmOptions::default(),
            cluster: Cluster::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_options(mut self, options: ConfirmOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_cluster(mut self, cluster: Cluster) -> Self {
        self.cluster = cluster;
        self
    }

    /// HTTP provider for `config`: loads the payer keypair and connects to the
    /// cluster URL at the configured commitment.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProgramError> {
        let payer = config.load_payer()?;
        let client = RpcClient::new_with_commitment(config.cluster.url(), config.commitment)?;
        info!(
            "Provider on {} ({}) with payer {}",
            config.cluster,
            config.cluster.url(),
            payer.pubkey()
        );

        Ok(Self::new(Arc::new(client), payer)
            .with_cluster(config.cluster.clone())
            .with_options(ConfirmOptions::default().with_commitment(config.commitment)))
    }

    /// Provider from `ANCHOR_PROVIDER_URL` and `ANCHOR_WALLET`.
    pub fn env() -> Result<Self, ProgramError> {
        Self::from_config(&ProviderConfig::from_env()?)
    }

    pub fn connection(&self) -> &Arc<dyn LedgerRpc> {
        &self.connection
    }

    pub fn payer(&self) -> &Keypair {
        &self.payer
    }

    pub fn pubkey(&self) -> Pubkey {
        self.payer.pubkey()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn options(&self) -> &ConfirmOptions {
        &self.options
    }

    pub fn cluster(&self) -> &Cluster {
        &self.cluster
    }

    /// Build, sign and submit a transaction without waiting for it.
    ///
    /// The payer signs first; `signers` covers any other account marked as
    /// signer. A signer with no matching keypair fails before submission.
    pub async fn send(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<Signature, ProgramError> {
        let blockhash = self.connection.get_latest_blockhash().await?;
        let transaction = Transaction::new_signed(instructions, &self.payer, signers, blockhash)?;

        let signature = self.connection.send_transaction(&transaction).await?;
        debug!(
            "Submitted transaction {} with {} instruction(s)",
            signature,
            instructions.len()
        );
        info!("  {}", explorer_url(&signature, &self.cluster));
        Ok(signature)
    }

    /// Wait for `signature` with this provider's clock and options.
    pub async fn confirm(
        &self,
        signature: &Signature,
    ) -> Result<TransactionStatus, ConfirmationError> {
        wait_for_confirmation(
            self.connection.as_ref(),
            self.clock.as_ref(),
            signature,
            &self.options,
        )
        .await
    }

    /// [`Provider::send`] followed by [`Provider::confirm`].
    pub async fn send_and_confirm(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<Signature, ProgramError> {
        let signature = self.send(instructions, signers).await?;
        self.confirm(&signature).await?;
        Ok(signature)
    }
}
