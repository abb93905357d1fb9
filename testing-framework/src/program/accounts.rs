// File: testing-framework/src/program/accounts.rs
//
// Account contexts of the SPL token program's instructions.
//
// Each struct names the roles an instruction expects and renders them in the
// exact order and with the exact flags the program declares.

use spl_common::{
    address::{associated_token_address, metadata_address, mint_address},
    config::{
        ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID, SYSVAR_RENT_ID, TOKEN_METADATA_PROGRAM_ID,
        TOKEN_PROGRAM_ID,
    },
    crypto::{CryptoError, Pubkey},
    transaction::AccountMeta,
};

/// Ordered account list for an instruction.
pub trait ToAccountMetas {
    fn to_account_metas(&self) -> Vec<AccountMeta>;
}

/// Accounts of `initialize`: creates the mint PDA and its metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitTokenAccounts {
    pub metadata: Pubkey,
    pub mint: Pubkey,
    pub payer: Pubkey,
    pub rent: Pubkey,
    pub system_program: Pubkey,
    pub token_program: Pubkey,
    pub token_metadata_program: Pubkey,
}

impl InitTokenAccounts {
    /// Derive the mint and metadata addresses for `program_id`.
    pub fn new(program_id: &Pubkey, payer: Pubkey) -> Result<Self, CryptoError> {
        let mint = mint_address(program_id)?;
        Ok(Self {
            metadata: metadata_address(&mint)?,
            mint,
            payer,
            rent: SYSVAR_RENT_ID,
            system_program: SYSTEM_PROGRAM_ID,
            token_program: TOKEN_PROGRAM_ID,
            token_metadata_program: TOKEN_METADATA_PROGRAM_ID,
        })
    }
}

impl ToAccountMetas for InitTokenAccounts {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.metadata, false),
            AccountMeta::new(self.mint, false),
            AccountMeta::new(self.payer, true),
            AccountMeta::new_readonly(self.rent, false),
            AccountMeta::new_readonly(self.system_program, false),
            AccountMeta::new_readonly(self.token_program, false),
            AccountMeta::new_readonly(self.token_metadata_program, false),
        ]
    }
}

/// Accounts of `mint_tokens`: the destination is created on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintTokensAccounts {
    pub mint: Pubkey,
    pub destination: Pubkey,
    pub payer: Pubkey,
    pub rent: Pubkey,
    pub system_program: Pubkey,
    pub token_program: Pubkey,
    pub associated_token_program: Pubkey,
}

impl MintTokensAccounts {
    /// Mint into the payer's associated token account.
    pub fn new(program_id: &Pubkey, payer: Pubkey) -> Result<Self, CryptoError> {
        Self::to_owner(program_id, payer, payer)
    }

    /// Mint into `owner`'s associated token account, paid by `payer`.
    pub fn to_owner(program_id: &Pubkey, payer: Pubkey, owner: Pubkey) -> Result<Self, CryptoError> {
        let mint = mint_address(program_id)?;
        Ok(Self {
            mint,
            destination: associated_token_address(&owner, &mint)?,
            payer,
            rent: SYSVAR_RENT_ID,
            system_program: SYSTEM_PROGRAM_ID,
            token_program: TOKEN_PROGRAM_ID,
            associated_token_program: ASSOCIATED_TOKEN_PROGRAM_ID,
        })
    }
}

impl ToAccountMetas for MintTokensAccounts {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.mint, false),
            AccountMeta::new(self.destination, false),
            AccountMeta::new(self.payer, true),
            AccountMeta::new_readonly(self.rent, false),
            AccountMeta::new_readonly(self.system_program, false),
            AccountMeta::new_readonly(self.token_program, false),
            AccountMeta::new_readonly(self.associated_token_program, false),
        ]
    }
}

/// Accounts of `transfer`, signed by the owner of `from_ata`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferAccounts {
    pub from_ata: Pubkey,
    pub to_ata: Pubkey,
    pub from: Pubkey,
    pub token_program: Pubkey,
}

impl TransferAccounts {
    /// Move `mint` tokens between the associated accounts of `from` and `to`.
    pub fn new(from: Pubkey, to: &Pubkey, mint: &Pubkey) -> Result<Self, CryptoError> {
        Ok(Self {
            from_ata: associated_token_address(&from, mint)?,
            to_ata: associated_token_address(to, mint)?,
            from,
            token_program: TOKEN_PROGRAM_ID,
        })
    }
}

impl ToAccountMetas for TransferAccounts {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.from_ata, false),
            AccountMeta::new(self.to_ata, false),
            AccountMeta::new_readonly(self.from, true),
            AccountMeta::new_readonly(self.token_program, false),
        ]
    }
}

/// Accounts of `approve`: lets `delegate` spend from `from_ata`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproveAccounts {
    pub from_ata: Pubkey,
    pub delegate: Pubkey,
    pub from: Pubkey,
    pub token_program: Pubkey,
}

impl ApproveAccounts {
    pub fn new(from: Pubkey, delegate: Pubkey, mint: &Pubkey) -> Result<Self, CryptoError> {
        Ok(Self {
            from_ata: associated_token_address(&from, mint)?,
            delegate,
            from,
            token_program: TOKEN_PROGRAM_ID,
        })
    }
}

impl ToAccountMetas for ApproveAccounts {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.from_ata, false),
            AccountMeta::new_readonly(self.delegate, false),
            AccountMeta::new(self.from, true),
            AccountMeta::new_readonly(self.token_program, false),
        ]
    }
}
