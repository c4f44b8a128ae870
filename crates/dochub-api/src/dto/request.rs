//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Profile update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New username (optional).
    pub username: Option<String>,
    /// New email (optional).
    pub email: Option<String>,
}

/// Premium upgrade request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeRequest {
    /// Number of months to purchase (1-12).
    pub months: u32,
}

/// Document creation request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocumentRequest {
    /// Document title.
    pub title: String,
    /// Markdown content.
    pub content: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Document update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDocumentRequest {
    /// New title (optional).
    pub title: Option<String>,
    /// New content (optional).
    pub content: Option<String>,
    /// New description (optional).
    pub description: Option<String>,
}

/// Share toggle request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRequest {
    /// Whether the document should be public.
    #[serde(default = "default_public")]
    pub is_public: bool,
}

/// Query parameters for document listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDocumentsQuery {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Optional search term over title, content, and description.
    pub search: Option<String>,
}

/// Query parameters for account listings (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAccountsQuery {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_public() -> bool {
    true
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    25
}
