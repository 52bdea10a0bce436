//! Local SQLite storage

pub mod kv_store;
pub mod manager;

pub use kv_store::SqliteKeyValueStore;
pub use manager::{DbManager, SqliteConnection};
