#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;
pub mod state_store;

pub use repository::{InMemoryKeyValueStore, KeyValueStore, Storage, StorageError};
pub use state_store::{LocalStateStore, STORAGE_KEY, StateStore};
