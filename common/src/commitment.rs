//! Confirmation levels for transaction finality.
//!
//! The ledger reports how far a transaction has progressed as one of
//! `processed < confirmed < finalized`.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Confirmation level reported by the ledger for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentLevel {
    /// Seen by the node in a block that may still be skipped.
    Processed,

    /// Voted on by a supermajority of the cluster.
    Confirmed,

    /// Rooted; cannot be rolled back.
    Finalized,
}

impl CommitmentLevel {
    /// Whether an observed level satisfies a desired one.
    ///
    /// An exact match satisfies, and `Finalized` satisfies everything because
    /// it is the terminal level. A stronger non-terminal observation does not
    /// satisfy a weaker request.
    pub fn satisfies(&self, desired: CommitmentLevel) -> bool {
        *self == desired || self.is_finalized()
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self, Self::Finalized)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }
}

impl Default for CommitmentLevel {
    fn default() -> Self {
        Self::Confirmed
    }
}

impl fmt::Display for CommitmentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CommitmentLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            other => Err(format!("unknown commitment level '{}'", other)),
        }
    }
}
