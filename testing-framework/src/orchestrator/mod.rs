// File: testing-framework/src/orchestrator/mod.rs
//
// Time control shared by the provider and the confirmation waiters.

/// Clock abstractions for deterministic time control in tests
pub mod clock;

pub use clock::{Clock, PausedClock, SystemClock};
