//! Concrete repository implementations.

pub mod account;
pub mod document;
pub mod memory;

pub use account::AccountRepository;
pub use document::DocumentRepository;
pub use memory::MemoryAccountStore;
