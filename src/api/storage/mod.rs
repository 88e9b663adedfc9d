//! Storage module for the API.
//!
//! Provides the widget store abstraction with in-memory and PostgreSQL
//! backends.

pub mod error;
pub mod traits;

// Storage backend implementations
pub mod memory;
pub mod postgres;

pub use error::StorageError;
pub use memory::MemoryWidgetStore;
pub use postgres::PostgresWidgetStore;
pub use traits::WidgetStore;
