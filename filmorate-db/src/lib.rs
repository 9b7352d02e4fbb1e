//! Storage layer for the film catalog.
//!
//! Defines the storage contracts every backend implements and ships two
//! interchangeable backends: [`MemoryStore`], a process-local map store, and
//! [`SqliteStore`], a normalized relational store backed by SQLite (via
//! rusqlite with the bundled feature).

pub mod contracts;
pub mod error;
pub mod memory;
pub mod operations;
pub mod queries;
pub mod schema;
pub mod sqlite;

pub use contracts::{
    DirectorStorage, FilmStorage, FriendshipStorage, ReferenceStorage, Store, UserStorage,
};
pub use error::StorageError;
pub use memory::MemoryStore;
pub use operations::{SeedStats, seed_reference};
pub use queries::{CatalogStats, catalog_stats};
pub use schema::{SchemaError, open_database, open_memory};
pub use sqlite::SqliteStore;
