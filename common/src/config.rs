use crate::crypto::Pubkey;

pub const VERSION: &str = env!("BUILD_VERSION");

// Workspace name of the program in Anchor.toml
pub const PROGRAM_NAME: &str = "spl";

// Deployed SPL token program (declare_id! of the on-chain crate)
pub const SPL_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("2asoQGDxqfPXZSP5xSKd5ksT4v2rqy5BKNF2MwQhoRmt");

// Metaplex token metadata program
pub const TOKEN_METADATA_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

pub const TOKEN_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::new([0u8; 32]);

pub const SYSVAR_RENT_ID: Pubkey =
    Pubkey::from_str_const("SysvarRent111111111111111111111111111111111");

// Seeds
pub const MINT_SEED: &[u8] = b"mint";
pub const METADATA_SEED: &[u8] = b"metadata";

// Confirmation polling defaults
pub const DEFAULT_CONFIRM_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

// Environment variables read by the provider
pub const PROVIDER_URL_ENV: &str = "ANCHOR_PROVIDER_URL";
pub const WALLET_ENV: &str = "ANCHOR_WALLET";

// Explorer base for logging submitted transactions
pub const EXPLORER_URL: &str = "https://explorer.solana.com";
