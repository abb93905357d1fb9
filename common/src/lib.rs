//! Shared building blocks for talking to the SPL token program's ledger:
//! addresses and signatures, program address derivation, legacy transaction
//! encoding, the JSON-RPC collaborator interface and provider configuration.

pub mod address;
pub mod cluster;
pub mod commitment;
pub mod config;
pub mod crypto;
pub mod rpc;
pub mod transaction;
