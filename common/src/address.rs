//! Deterministic addresses used by the SPL token program.

use crate::{
    config::{
        ASSOCIATED_TOKEN_PROGRAM_ID, METADATA_SEED, MINT_SEED, TOKEN_METADATA_PROGRAM_ID,
        TOKEN_PROGRAM_ID,
    },
    crypto::{CryptoError, Pubkey},
};

/// Mint account owned by `program_id`, derived from the fixed `"mint"` seed.
pub fn mint_address(program_id: &Pubkey) -> Result<Pubkey, CryptoError> {
    Pubkey::find_program_address(&[MINT_SEED], program_id).map(|(address, _)| address)
}

/// Metaplex metadata account for `mint`.
pub fn metadata_address(mint: &Pubkey) -> Result<Pubkey, CryptoError> {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            TOKEN_METADATA_PROGRAM_ID.as_bytes(),
            mint.as_bytes(),
        ],
        &TOKEN_METADATA_PROGRAM_ID,
    )
    .map(|(address, _)| address)
}

/// Associated token account holding `mint` tokens for `owner`.
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey, CryptoError> {
    Pubkey::find_program_address(
        &[owner.as_bytes(), TOKEN_PROGRAM_ID.as_bytes(), mint.as_bytes()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .map(|(address, _)| address)
}
