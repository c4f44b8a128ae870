//! # dochub-service
//!
//! Business logic service layer for DocHub. Each service orchestrates
//! repositories and the auth core to implement application-level use
//! cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod auth;
pub mod context;
pub mod document;

pub use account::{AccountService, RegisterRequest, UsageStats};
pub use auth::{AuthService, AuthenticatedSession};
pub use context::RequestContext;
pub use document::DocumentService;
