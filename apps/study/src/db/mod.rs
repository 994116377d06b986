//! Durable key-value storage for the study library.

pub mod error;
pub mod memory;
pub mod repository;
pub mod schema;

pub use error::DbError;
pub use memory::MemoryStore;
pub use repository::{KeyValueStore, SqliteStore};
