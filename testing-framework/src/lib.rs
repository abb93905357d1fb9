//! # SPL Testing Framework
//!
//! Deterministic integration testing for the SPL token program.
//!
//! ## Architecture Overview
//!
//! - **orchestrator**: injected [`Clock`] so polling logic runs on virtual time
//! - **tier2_integration**: confirmation waiters, assertion helpers and an
//!   in-memory ledger, all on top of [`spl_common::rpc::LedgerRpc`]
//! - **provider**: connection, payer and confirmation options as one value
//! - **program**: typed client for the program's instructions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spl_testing_framework::prelude::*;
//!
//! #[tokio::test]
//! async fn test_mint() {
//!     let ledger = Arc::new(MockLedger::new().with_auto_confirm(CommitmentLevel::Confirmed));
//!     let provider = Provider::new(ledger.clone(), Keypair::new())
//!         .with_clock(Arc::new(PausedClock::new()));
//!     let program = SplProgram::new(Arc::new(provider));
//!
//!     let accounts = program.mint_tokens_accounts().unwrap();
//!     program.mint_tokens(10_000_000_000, &accounts).await.unwrap();
//! }
//! ```
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: every wait goes through the clock abstraction
//! 2. **Explicit context**: no process-wide provider
//! 3. **Distinct failures**: lookup, transaction, timeout and transport errors never blur

#![warn(clippy::all)]

/// Core orchestration - provides the clock abstraction
pub mod orchestrator;

/// Tier 2: Integration testing (single ledger node + RPC)
pub mod tier2_integration;

/// Error type of provider and program client calls
pub mod error;

/// Client context shared by program clients
pub mod provider;

/// SPL token program client
pub mod program;

// Convenient re-exports for common usage
pub mod prelude;

// Re-export commonly used types at crate root
pub use error::ProgramError;
pub use orchestrator::{Clock, PausedClock, SystemClock};
pub use program::SplProgram;
pub use provider::Provider;
pub use tier2_integration::{wait_for_confirmation, ConfirmOptions, ConfirmationError};
