//! Usage counter kinds tracked per account.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The per-account usage counters subject to free-tier limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterKind {
    /// Number of documents the account currently owns.
    Document,
    /// Number of conversions the account has performed.
    Conversion,
}

impl CounterKind {
    /// Return the counter kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Conversion => "conversion",
        }
    }
}

impl fmt::Display for CounterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
