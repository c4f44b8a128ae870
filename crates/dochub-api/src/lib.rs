//! # dochub-api
//!
//! HTTP transport layer for DocHub: the axum router, request/response
//! DTOs, the bearer-token extractor, and the mapping from domain errors
//! to HTTP status codes. All policy decisions live below this crate.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
