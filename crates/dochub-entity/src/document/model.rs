//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dochub_core::types::{AccountId, DocumentId};

/// A markdown document owned by an account.
///
/// Deleted documents are tombstoned (`is_deleted = true`) rather than
/// physically removed; they are excluded from every listing but retained.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: DocumentId,
    /// Owning account.
    pub owner_id: AccountId,
    /// Document title.
    pub title: String,
    /// Markdown content.
    pub content: String,
    /// Optional description.
    pub description: Option<String>,
    /// Whether the document appears in public listings.
    pub is_public: bool,
    /// Soft-delete tombstone.
    pub is_deleted: bool,
    /// Number of times the document has been viewed.
    pub view_count: i64,
    /// Number of times the document has been converted.
    pub conversion_count: i64,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
    /// When the document was last converted.
    pub last_converted_at: Option<DateTime<Utc>>,
}

/// Data required to create a new document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    /// Document title.
    pub title: String,
    /// Markdown content.
    pub content: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Data for updating an existing document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUpdate {
    /// New title (optional).
    pub title: Option<String>,
    /// New content (optional).
    pub content: Option<String>,
    /// New description (optional).
    pub description: Option<String>,
}
