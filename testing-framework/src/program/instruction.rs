// File: testing-framework/src/program/instruction.rs
//
// Instruction builders for the SPL token program.
//
// Data layout: 8-byte selector for the instruction name, then the Borsh
// encoding of its arguments in declaration order.

use borsh::{BorshDeserialize, BorshSerialize};
use spl_common::{
    crypto::Pubkey,
    transaction::{encoding::instruction_discriminator, Instruction},
};
use std::io;

use super::accounts::{
    ApproveAccounts, InitTokenAccounts, MintTokensAccounts, ToAccountMetas, TransferAccounts,
};

/// On-chain instruction names.
pub mod names {
    pub const INITIALIZE: &str = "initialize";
    pub const MINT_TOKENS: &str = "mint_tokens";
    pub const TRANSFER: &str = "transfer";
    pub const APPROVE: &str = "approve";
}

/// Metadata and precision of the token created by `initialize`.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct InitTokenParams {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub decimals: u8,
}

impl InitTokenParams {
    /// `amount` whole tokens in base units, `None` on overflow.
    pub fn base_units(&self, amount: u64) -> Option<u64> {
        10u64
            .checked_pow(u32::from(self.decimals))
            .and_then(|scale| amount.checked_mul(scale))
    }
}

fn instruction_data<T: BorshSerialize>(name: &str, args: &T) -> io::Result<Vec<u8>> {
    let mut data = instruction_discriminator(name).to_vec();
    args.serialize(&mut data)?;
    Ok(data)
}

fn build<A: ToAccountMetas, T: BorshSerialize>(
    program_id: &Pubkey,
    name: &str,
    args: &T,
    accounts: &A,
) -> io::Result<Instruction> {
    Ok(Instruction::new(
        *program_id,
        instruction_data(name, args)?,
        accounts.to_account_metas(),
    ))
}

pub fn init_token(
    program_id: &Pubkey,
    params: &InitTokenParams,
    accounts: &InitTokenAccounts,
) -> io::Result<Instruction> {
    build(program_id, names::INITIALIZE, params, accounts)
}

/// `quantity` is in base units.
pub fn mint_tokens(
    program_id: &Pubkey,
    quantity: u64,
    accounts: &MintTokensAccounts,
) -> io::Result<Instruction> {
    build(program_id, names::MINT_TOKENS, &quantity, accounts)
}

pub fn transfer(
    program_id: &Pubkey,
    amount: u64,
    accounts: &TransferAccounts,
) -> io::Result<Instruction> {
    build(program_id, names::TRANSFER, &amount, accounts)
}

pub fn approve(
    program_id: &Pubkey,
    amount: u64,
    accounts: &ApproveAccounts,
) -> io::Result<Instruction> {
    build(program_id, names::APPROVE, &amount, accounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spl_common::{config::SPL_PROGRAM_ID, transaction::encoding::DISCRIMINATOR_SIZE};

    fn params() -> InitTokenParams {
        InitTokenParams {
            name: "Just a Test Token".to_string(),
            symbol: "TEST".to_string(),
            uri: "https://example.com/token.json".to_string(),
            decimals: 9,
        }
    }

    #[test]
    fn test_init_token_data_layout() {
        let payer = Pubkey::new_unique();
        let accounts = InitTokenAccounts::new(&SPL_PROGRAM_ID, payer).unwrap();
        let ix = init_token(&SPL_PROGRAM_ID, &params(), &accounts).unwrap();

        assert_eq!(ix.program_id, SPL_PROGRAM_ID);
        assert_eq!(
            ix.data[..DISCRIMINATOR_SIZE],
            instruction_discriminator("initialize")
        );

        // Borsh strings are a u32 length followed by UTF-8 bytes
        let args = &ix.data[DISCRIMINATOR_SIZE..];
        assert_eq!(&args[..4], &17u32.to_le_bytes());
        assert_eq!(&args[4..21], b"Just a Test Token");
        assert_eq!(*args.last().unwrap(), 9);

        let decoded = InitTokenParams::try_from_slice(args).unwrap();
        assert_eq!(decoded, params());
    }

    #[test]
    fn test_mint_tokens_amount_is_little_endian() {
        let payer = Pubkey::new_unique();
        let accounts = MintTokensAccounts::new(&SPL_PROGRAM_ID, payer).unwrap();
        let quantity = params().base_units(10).unwrap();
        let ix = mint_tokens(&SPL_PROGRAM_ID, quantity, &accounts).unwrap();

        assert_eq!(ix.data.len(), DISCRIMINATOR_SIZE + 8);
        assert_eq!(
            ix.data[..DISCRIMINATOR_SIZE],
            instruction_discriminator("mint_tokens")
        );
        assert_eq!(ix.data[DISCRIMINATOR_SIZE..], 10_000_000_000u64.to_le_bytes());
        assert_eq!(ix.accounts, accounts.to_account_metas());
    }

    #[test]
    fn test_distinct_selectors() {
        let selectors = [
            names::INITIALIZE,
            names::MINT_TOKENS,
            names::TRANSFER,
            names::APPROVE,
        ]
        .map(instruction_discriminator);

        for (i, a) in selectors.iter().enumerate() {
            for b in &selectors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_base_units_overflow() {
        let mut p = params();
        assert_eq!(p.base_units(10), Some(10_000_000_000));
        p.decimals = 30;
        assert_eq!(p.base_units(1), None);
    }
}
