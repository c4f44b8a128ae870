//! # dochub-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for DocHub entities, plus an in-memory account store
//! for tests and single-node development.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
