//! Free-tier quota configuration.

use serde::{Deserialize, Serialize};

/// Usage limits applied to free-tier accounts.
///
/// Premium and admin accounts are not subject to these limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Maximum number of documents a free account may own.
    #[serde(default = "default_document_limit")]
    pub free_document_limit: i64,
    /// Maximum number of conversions a free account may perform.
    #[serde(default = "default_conversion_limit")]
    pub free_conversion_limit: i64,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            free_document_limit: default_document_limit(),
            free_conversion_limit: default_conversion_limit(),
        }
    }
}

fn default_document_limit() -> i64 {
    5
}

fn default_conversion_limit() -> i64 {
    10
}
