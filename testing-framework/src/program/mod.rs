// File: testing-framework/src/program/mod.rs
//
// Client for the SPL token program.
//
// Every method builds one instruction, submits it through the provider and
// waits for confirmation before returning the transaction signature.

pub mod accounts;
pub mod instruction;

pub use accounts::{
    ApproveAccounts, InitTokenAccounts, MintTokensAccounts, ToAccountMetas, TransferAccounts,
};
pub use instruction::InitTokenParams;

use log::info;
use spl_common::{
    address::{associated_token_address, mint_address},
    config::SPL_PROGRAM_ID,
    crypto::{Keypair, Pubkey, Signature},
    transaction::Instruction,
};
use std::sync::Arc;

use crate::{error::ProgramError, provider::Provider};

/// Handle on a deployed SPL token program.
#[derive(Clone)]
pub struct SplProgram {
    provider: Arc<Provider>,
    program_id: Pubkey,
}

impl SplProgram {
    /// Client for the program at its compiled-in address.
    pub fn new(provider: Arc<Provider>) -> Self {
        Self::with_program_id(provider, SPL_PROGRAM_ID)
    }

    pub fn with_program_id(provider: Arc<Provider>, program_id: Pubkey) -> Self {
        Self {
            provider,
            program_id,
        }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn provider(&self) -> &Arc<Provider> {
        &self.provider
    }

    /// The program's mint PDA.
    pub fn mint(&self) -> Result<Pubkey, ProgramError> {
        Ok(mint_address(&self.program_id)?)
    }

    /// Associated token account of `owner` for the program's mint.
    pub fn token_account(&self, owner: &Pubkey) -> Result<Pubkey, ProgramError> {
        Ok(associated_token_address(owner, &self.mint()?)?)
    }

    /// Context for `initialize` paid by the provider's payer.
    pub fn init_token_accounts(&self) -> Result<InitTokenAccounts, ProgramError> {
        Ok(InitTokenAccounts::new(&self.program_id, self.provider.pubkey())?)
    }

    /// Context for `mint_tokens` into the payer's own token account.
    pub fn mint_tokens_accounts(&self) -> Result<MintTokensAccounts, ProgramError> {
        Ok(MintTokensAccounts::new(&self.program_id, self.provider.pubkey())?)
    }

    /// Create the mint and its metadata (`initialize` on chain).
    pub async fn init_token(
        &self,
        params: &InitTokenParams,
        accounts: &InitTokenAccounts,
    ) -> Result<Signature, ProgramError> {
        let ix = instruction::init_token(&self.program_id, params, accounts)?;
        self.rpc("initialize", ix, &[]).await
    }

    /// Mint `quantity` base units to `accounts.destination`.
    pub async fn mint_tokens(
        &self,
        quantity: u64,
        accounts: &MintTokensAccounts,
    ) -> Result<Signature, ProgramError> {
        let ix = instruction::mint_tokens(&self.program_id, quantity, accounts)?;
        self.rpc("mint_tokens", ix, &[]).await
    }

    /// Transfer `amount` base units; `authority` signs unless it is the payer.
    pub async fn transfer(
        &self,
        amount: u64,
        accounts: &TransferAccounts,
        authority: Option<&Keypair>,
    ) -> Result<Signature, ProgramError> {
        let ix = instruction::transfer(&self.program_id, amount, accounts)?;
        self.rpc("transfer", ix, authority.as_slice()).await
    }

    /// Allow `accounts.delegate` to spend `amount` base units.
    pub async fn approve(
        &self,
        amount: u64,
        accounts: &ApproveAccounts,
        authority: Option<&Keypair>,
    ) -> Result<Signature, ProgramError> {
        let ix = instruction::approve(&self.program_id, amount, accounts)?;
        self.rpc("approve", ix, authority.as_slice()).await
    }

    async fn rpc(
        &self,
        name: &str,
        ix: Instruction,
        signers: &[&Keypair],
    ) -> Result<Signature, ProgramError> {
        let signature = self.provider.send_and_confirm(&[ix], signers).await?;
        info!("{} confirmed: {}", name, signature);
        Ok(signature)
    }
}
